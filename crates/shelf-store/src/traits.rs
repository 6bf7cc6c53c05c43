//! The [`ProductRepository`] trait and the collaborators a store depends on.
//!
//! The service layer talks to products only through [`ProductRepository`].
//! Stores in turn rely on an [`IdGenerator`] to mint identifiers and a
//! [`ProductComparator`] to order listings; both are injected so tests can
//! substitute deterministic versions.

use std::cmp::Ordering;
use std::sync::Arc;

use shelf_types::{Product, ProductId};

use crate::error::StoreResult;
use crate::page::ListOptions;

/// Storage backend for products keyed by name.
///
/// Implementations must be thread-safe (`Send + Sync`). Every mutation is a
/// check-then-act sequence (does the name exist? then insert/replace/remove)
/// and must run as one atomic step: two concurrent `add` calls for the same
/// name never both succeed.
pub trait ProductRepository: Send + Sync {
    /// Store a new product, assigning it a fresh identifier.
    ///
    /// Fails with `AlreadyExists` if a product with the same name is stored;
    /// the store is unchanged in that case.
    fn add(&self, product: Product) -> StoreResult<Arc<Product>>;

    /// Look up a product by name.
    ///
    /// Returns `Ok(None)` if the product does not exist.
    fn get(&self, name: &str) -> StoreResult<Option<Arc<Product>>>;

    /// Return one page of products ordered by `options.order_key`.
    ///
    /// The page is cut from a point-in-time snapshot; mutations that land
    /// while it is being sorted are not reflected in it.
    fn get_all(&self, options: &ListOptions) -> StoreResult<Vec<Arc<Product>>>;

    /// Remove a product by name. Fails with `NotFound` if absent.
    fn delete(&self, name: &str) -> StoreResult<()>;

    /// Replace the product stored under `name` wholesale.
    ///
    /// Fails with `ValidationFailed` if `product`'s own name differs from
    /// `name`, and with `NotFound` if nothing is stored under `name`. The
    /// replacement's identifier is stored exactly as given.
    fn update(&self, name: &str, product: Product) -> StoreResult<()>;
}

/// Source of product identifiers.
///
/// Must return a distinct identifier on every call and must not block.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> ProductId;
}

/// Orders two products by a named field.
///
/// How an unrecognized `key` is handled is up to the implementation.
pub trait ProductComparator: Send + Sync {
    fn compare(&self, a: &Product, b: &Product, key: &str) -> Ordering;

    /// Stable-sort `products` by `key`, descending when `reverse` is set.
    ///
    /// Default implementation calls `compare()` for every pair. Comparators
    /// may override to resolve `key` once per sort.
    fn sort(&self, products: &mut [Arc<Product>], key: &str, reverse: bool) {
        products.sort_by(|a, b| {
            let ord = self.compare(a, b, key);
            if reverse {
                ord.reverse()
            } else {
                ord
            }
        });
    }
}
