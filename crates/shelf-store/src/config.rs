use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::page::ListOptions;

/// Construction-time settings for an [`InMemoryProductStore`](crate::InMemoryProductStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of bootstrap products to insert at startup. Zero means empty.
    pub seed_count: usize,
    /// Page size used when a listing does not specify one.
    pub default_limit: usize,
    /// Sort key used when a listing does not specify one.
    pub default_order_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_count: 0,
            default_limit: 20,
            default_order_key: "name".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Listing options from the configured defaults, starting at 0.
    pub fn list_options(&self) -> ListOptions {
        ListOptions::new(0, self.default_limit, self.default_order_key.clone(), false)
    }
}
