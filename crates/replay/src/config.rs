//! Environment-driven replay configuration.

use core::str::FromStr;

use draftorder_core::DomainError;

pub const ID_SCHEME_VAR: &str = "DRAFTORDER_ID_SCHEME";
pub const ID_PREFIX_VAR: &str = "DRAFTORDER_ID_PREFIX";

/// How new line ids are issued during a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdScheme {
    #[default]
    Uuid,
    Sequential,
}

impl FromStr for IdScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(IdScheme::Uuid),
            "sequential" => Ok(IdScheme::Sequential),
            other => Err(DomainError::validation(format!("unknown id scheme: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    pub id_scheme: IdScheme,
    pub id_prefix: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            id_scheme: IdScheme::default(),
            id_prefix: "line-".to_string(),
        }
    }
}

impl ReplayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or invalid values fall back
    /// to defaults.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let id_scheme = match lookup(ID_SCHEME_VAR) {
            None => defaults.id_scheme,
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "{ID_SCHEME_VAR} invalid; using uuid ids");
                defaults.id_scheme
            }),
        };

        let id_prefix = lookup(ID_PREFIX_VAR).unwrap_or(defaults.id_prefix);

        Self {
            id_scheme,
            id_prefix,
        }
    }
}
