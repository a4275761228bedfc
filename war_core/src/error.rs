//! Crate-wide error taxonomy
//!
//! Every abort path leaves storage untouched: validation happens before any
//! read, and the record write is the last step of each pipeline.

use thiserror::Error;

use crate::config::ConfigError;
use crate::content::ContentError;
use crate::storage::StorageError;

/// Anything that can abort a single war-command invocation
#[derive(Error, Debug)]
pub enum WarError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
