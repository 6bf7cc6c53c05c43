//! Listing options and the page-cutting rule applied to sorted snapshots.

use serde::{Deserialize, Serialize};

/// Parameters of a [`get_all`](crate::ProductRepository::get_all) call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Index of the first product in the sorted listing.
    pub start: usize,
    /// Maximum number of products to return.
    pub limit: usize,
    /// Field to order by, resolved by the store's comparator.
    pub order_key: String,
    /// Order descending instead of ascending.
    pub reverse: bool,
}

impl ListOptions {
    pub fn new(start: usize, limit: usize, order_key: impl Into<String>, reverse: bool) -> Self {
        Self {
            start,
            limit,
            order_key: order_key.into(),
            reverse,
        }
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::new(0, 20, "name", false)
    }
}

/// Cut the page `[start, start + limit)` out of `items`.
///
/// A `start` past the end does not produce an empty page: it is clamped to
/// the last element, so callers paging too far still see the final product.
/// An empty input always yields an empty page.
pub fn paginate<T>(items: &[T], start: usize, limit: usize) -> &[T] {
    let len = items.len();
    if len == 0 {
        return &[];
    }
    let start = start.min(len - 1);
    let end = start.saturating_add(limit).min(len);
    &items[start..end]
}
