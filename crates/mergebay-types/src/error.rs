use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("item id must not be empty")]
    EmptyId,

    #[error("unknown bucket: {0}")]
    UnknownBucket(String),

    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("duplicate item id: {0}")]
    DuplicateId(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
