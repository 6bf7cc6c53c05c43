use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ProductId;

/// Identity and descriptive fields shared by every product.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// System-assigned identifier. Empty until the product is stored.
    pub uid: ProductId,
    /// Caller-assigned primary key, unique within a store.
    pub name: String,
    /// Human-facing display name.
    pub alias: String,
    pub description: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

/// Commercial attributes of a product.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSpec {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Sale state of a product.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_timestamp: Option<DateTime<Utc>>,
}

/// The entity held by the repository store.
///
/// Only `metadata.name` (the key) and `metadata.uid` (the identifier) carry
/// meaning for the store; the remaining fields are payload owned by the
/// service layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<ProductSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
}

impl Product {
    /// Create a product with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: Metadata {
                name: name.into(),
                ..Metadata::default()
            },
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn uid(&self) -> &ProductId {
        &self.metadata.uid
    }

    /// Price from the spec, if both are present.
    pub fn price(&self) -> Option<f64> {
        self.spec.as_ref().and_then(|s| s.price)
    }

    /// Set the price, creating an empty spec if needed.
    pub fn with_price(mut self, price: f64) -> Self {
        self.spec.get_or_insert_with(ProductSpec::default).price = Some(price);
        self
    }

    /// Set the category, creating an empty spec if needed.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.spec.get_or_insert_with(ProductSpec::default).category = category.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.metadata.alias = alias.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = description.into();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.labels.insert(key.into(), value.into());
        self
    }
}
