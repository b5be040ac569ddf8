//! Line identifiers and the sources that issue them.

use core::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a draft-order line.
///
/// Opaque to the domain: ids issued by other hosts (for instance the legacy
/// base-36 timestamp ids) are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineId(String);

impl LineId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for LineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LineId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("LineId: empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for LineId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LineId> for String {
    fn from(value: LineId) -> Self {
        value.0
    }
}

/// Issues fresh line identifiers.
///
/// Injected into the reducer so hosts choose between globally unique ids and
/// deterministic ones.
pub trait LineIdSource: Send + Sync {
    fn next_id(&self) -> LineId;
}

/// UUIDv7 ids (time-ordered, unique under rapid creation).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidLineIds;

impl LineIdSource for UuidLineIds {
    fn next_id(&self) -> LineId {
        LineId(Uuid::now_v7().simple().to_string())
    }
}

/// Monotonic counter ids rendered in base 36 behind a fixed prefix.
#[derive(Debug)]
pub struct SequentialLineIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialLineIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialLineIds {
    fn default() -> Self {
        Self::new("line-")
    }
}

impl LineIdSource for SequentialLineIds {
    fn next_id(&self) -> LineId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        LineId(format!("{}{}", self.prefix, to_base36(n)))
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}
