//! Error types for imbib-core

use impress_domain::DomainError;
use thiserror::Error;

use crate::bulk::BulkOutcome;
use crate::config::ConfigError;

/// Result type alias for imbib operations
pub type Result<T> = std::result::Result<T, ImbibError>;

/// Main error type for imbib operations
#[derive(Error, Debug)]
pub enum ImbibError {
    /// Bulk operation errors
    #[error("Bulk operation error: {0}")]
    Bulk(#[from] BulkError),

    /// Library and entry errors
    #[error("Library error: {0}")]
    Domain(#[from] DomainError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Failure raised by a transform for a single entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A field held a value the transform cannot work with
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Any other failure
    #[error("{0}")]
    Failed(String),
}

/// Bulk operation errors
#[derive(Error, Debug)]
pub enum BulkError {
    /// The transform failed for one entry; later entries were not visited.
    ///
    /// `partial` holds the counts and changes accumulated before the
    /// failing entry.
    #[error("Transform failed on entry {index} ('{cite_key}'): {source}")]
    TransformFailed {
        index: usize,
        cite_key: String,
        partial: Box<BulkOutcome>,
        source: TransformError,
    },

    /// The background worker thread could not be started
    #[error("Failed to start bulk worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// The background worker thread panicked
    #[error("Bulk worker panicked")]
    WorkerPanicked,
}

impl BulkError {
    /// Outcome accumulated before the failure, if any entry was visited.
    pub fn partial_outcome(&self) -> Option<&BulkOutcome> {
        match self {
            BulkError::TransformFailed { partial, .. } => Some(partial.as_ref()),
            _ => None,
        }
    }
}
