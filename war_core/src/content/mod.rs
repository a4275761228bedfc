//! Narrative content, loaded once and indexed by team, tier, kind and outcome

mod library;
mod loader;

pub use library::ContentLibrary;

use thiserror::Error;

use crate::types::{ActionKind, Outcome, Team};

/// Content loading or lookup failure
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read content file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse content document: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid content document: {0}")]
    InvalidDocument(String),
    #[error("No content for {team}s tier {tier}, {kind:?} with outcome {outcome:?}")]
    NoMatchingContent {
        team: Team,
        tier: u8,
        kind: ActionKind,
        outcome: Outcome,
    },
    #[error("The bribe pool is empty")]
    EmptyBribePool,
}
