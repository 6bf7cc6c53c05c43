use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}
