//! Replays a JSON action log through the line store.
//!
//! Useful for reproducing what the order form rendered from a captured
//! sequence of dispatched actions.

pub mod config;

use std::sync::Arc;

use anyhow::Context;

use draftorder_core::{LineIdSource, SequentialLineIds, UuidLineIds};
use draftorder_dispatch::LineStore;
use draftorder_lines::{LinesReducer, parse_actions};

pub use config::{IdScheme, ReplayConfig};

/// Build the id source a config asks for.
pub fn id_source(config: &ReplayConfig) -> Arc<dyn LineIdSource> {
    match config.id_scheme {
        IdScheme::Uuid => Arc::new(UuidLineIds),
        IdScheme::Sequential => Arc::new(SequentialLineIds::new(config.id_prefix.clone())),
    }
}

/// Apply every action in `input` (a JSON array of wire actions) and return the
/// resulting lines as pretty-printed JSON.
pub fn run(config: &ReplayConfig, input: &str) -> anyhow::Result<String> {
    let actions = parse_actions(input).context("failed to parse action log")?;
    tracing::info!(actions = actions.len(), scheme = ?config.id_scheme, "replaying action log");

    let mut store = LineStore::for_lines(LinesReducer::new(id_source(config)));
    let lines = store.dispatch_all(actions);
    tracing::info!(lines = lines.len(), "replay finished");

    serde_json::to_string_pretty(lines).context("failed to render lines")
}
