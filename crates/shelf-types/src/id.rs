use std::fmt;

use serde::{Deserialize, Serialize};

/// System-assigned identifier of a stored product.
///
/// The value is opaque to the store: only uniqueness matters. Freshly
/// generated identifiers are UUID v7 strings, but any text (including the
/// empty string for a product that has not been stored yet) is accepted.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Generate a new time-ordered identifier (UUID v7).
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The empty identifier carried by products that were never stored.
    pub fn unassigned() -> Self {
        Self(String::new())
    }

    /// Returns `true` if no identifier has been assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({})", self.short_id())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
