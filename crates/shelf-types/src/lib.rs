//! Foundation types for Shelf.
//!
//! This crate provides the product data model and the sort-key vocabulary
//! shared by the repository store and its callers. Every other Shelf crate
//! depends on `shelf-types`.
//!
//! # Key Types
//!
//! - [`Product`] -- The stored entity: metadata, spec, and status
//! - [`ProductId`] -- Opaque system-assigned identifier (UUID v7 text)
//! - [`SortKey`] -- Named product field used to order listings

pub mod error;
pub mod id;
pub mod product;
pub mod sort;

pub use error::TypeError;
pub use id::ProductId;
pub use product::{Metadata, Product, ProductSpec, ProductStatus};
pub use sort::SortKey;
