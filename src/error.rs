//! Caller-facing error taxonomy.
//!
//! Loading and schema plumbing use `anyhow` internally; these types are what
//! the presentation layer sees when a command or the startup load is rejected.

use crate::coordinator::FilterMode;
use std::path::PathBuf;
use thiserror::Error;

/// The static wallet catalog could not be loaded or failed integrity checks.
///
/// Fatal at startup: no match results are produced without a catalog.
#[derive(Debug, Error)]
#[error("wallet catalog {} failed to load: {detail}", .path.display())]
pub struct CatalogLoadError {
    pub path: PathBuf,
    pub detail: String,
}

impl CatalogLoadError {
    pub(crate) fn from_anyhow(path: PathBuf, err: anyhow::Error) -> Self {
        Self {
            path,
            detail: format!("{err:#}"),
        }
    }
}

/// Rejected filter commands. Every variant leaves the filter state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown persona '{0}'")]
    UnknownPersona(String),

    #[error("invalid capability key '{0}'")]
    InvalidCapabilityKey(String),

    #[error("{operation} is not available while {} is active", .mode.label())]
    ModeMismatch {
        operation: &'static str,
        mode: FilterMode,
    },
}
