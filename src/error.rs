//! Crate-level error type.
//!
//! Every failure is fatal to the operation that raised it: a generation is
//! computed all-or-nothing from its parent, so nothing here is retried or
//! recovered internally.

use std::path::PathBuf;

use crate::catalog::DataSourceError;

/// Errors produced by catalog loading, configuration, and the GA itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The item catalog is missing or malformed.
    #[error("DataSourceError: {0}")]
    DataSource(#[from] DataSourceError),

    /// A selection vector does not match the catalog length.
    #[error("InvalidCandidateError: selection has {actual} bits, catalog has {expected} items")]
    InvalidCandidate { expected: usize, actual: usize },

    /// Roulette-wheel selection could not pick a candidate because the
    /// remaining pool carries no positive fitness.
    #[error("SelectionExhaustedError: no candidate selectable among {remaining} remaining (total fitness is zero)")]
    SelectionExhausted { remaining: usize },

    /// A run parameter is invalid.
    #[error("ConfigurationError: {0}")]
    Configuration(String),

    /// A configuration file could not be read or parsed.
    #[error("ConfigurationError: {path}: {reason}")]
    ConfigFile { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
