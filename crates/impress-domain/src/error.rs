//! Error types for impress-domain

use thiserror::Error;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, DomainError>;

/// Errors from library and entry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No entry with this id in the library
    #[error("Entry not found: {0}")]
    EntryNotFound(String),
}
