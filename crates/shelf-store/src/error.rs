//! Error types for repository operations.

use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A product with this name is already stored.
    #[error("product already exists: {name}")]
    AlreadyExists { name: String },

    /// No product is stored under this name.
    #[error("product not found: {name}")]
    NotFound { name: String },

    /// The request is inconsistent with itself (e.g. mismatched names).
    #[error("validation failed for {name}: {reason}")]
    ValidationFailed { name: String, reason: String },

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// The store configuration could not be read or parsed.
    #[error("invalid store config: {0}")]
    Config(String),
}

impl StoreError {
    pub fn already_exists(name: impl Into<String>) -> Self {
        Self::AlreadyExists { name: name.into() }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

/// Result alias for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;
