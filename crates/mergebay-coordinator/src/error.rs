//! Error types for the merge dialog and its collaborators.

use thiserror::Error;

use mergebay_types::TypeError;

/// A failure reported by an external collaborator (item source, merge API,
/// history lookup).
///
/// The message is meant for the user: the dialog shows it verbatim so they
/// can decide to retry or cancel.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur while driving a merge dialog.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The item source could not supply candidates.
    #[error("item source error: {0}")]
    Source(#[source] ApiError),

    /// The candidates violate a precondition (empty or duplicate ids).
    #[error("invalid candidates: {0}")]
    InvalidItems(#[from] TypeError),

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for coordinator operations.
pub type CoordinatorResult<T> = std::result::Result<T, CoordinatorError>;
