//! Default [`IdGenerator`] and [`ProductComparator`] implementations.

use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use shelf_types::{Product, ProductId, SortKey};
use tracing::warn;

use crate::traits::{IdGenerator, ProductComparator};

/// Generates UUID v7 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> ProductId {
        ProductId::generate()
    }
}

/// Generates `{prefix}-{n}` identifiers from a counter starting at 1.
///
/// Unique within one generator instance only; meant for tests and demos
/// that need predictable output.
#[derive(Debug)]
pub struct SequentialGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&self) -> ProductId {
        let n = self.next.fetch_add(1, AtomicOrdering::Relaxed);
        ProductId::new(format!("{}-{n}", self.prefix))
    }
}

/// Compares products by the field a [`SortKey`] names.
///
/// Keys that do not parse fall back to ordering by name, so listings stay
/// deterministic even for a bad `order_key`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldComparator;

impl FieldComparator {
    /// Resolve `key`, falling back to [`SortKey::Name`].
    pub fn resolve(key: &str) -> SortKey {
        key.parse().unwrap_or_else(|_| {
            warn!(key, "unknown sort key; ordering by name");
            SortKey::Name
        })
    }
}

impl ProductComparator for FieldComparator {
    fn compare(&self, a: &Product, b: &Product, key: &str) -> Ordering {
        key.parse::<SortKey>().unwrap_or(SortKey::Name).compare(a, b)
    }

    fn sort(&self, products: &mut [Arc<Product>], key: &str, reverse: bool) {
        let key = Self::resolve(key);
        if reverse {
            products.sort_by(|a, b| key.compare(b, a));
        } else {
            products.sort_by(|a, b| key.compare(a, b));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_generator_is_unique() {
        let g = UuidGenerator;
        let ids: std::collections::HashSet<_> = (0..100).map(|_| g.next_id()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn sequential_generator_counts_from_one() {
        let g = SequentialGenerator::new("uid");
        assert_eq!(g.next_id().as_str(), "uid-1");
        assert_eq!(g.next_id().as_str(), "uid-2");
    }

    #[test]
    fn field_comparator_orders_by_price() {
        let cheap = Product::new("z").with_price(1.0);
        let dear = Product::new("a").with_price(2.0);
        assert_eq!(FieldComparator.compare(&cheap, &dear, "price"), Ordering::Less);
    }

    #[test]
    fn unknown_key_falls_back_to_name() {
        let a = Product::new("a").with_price(2.0);
        let b = Product::new("b").with_price(1.0);
        assert_eq!(FieldComparator::resolve("bogus"), SortKey::Name);
        assert_eq!(FieldComparator.compare(&a, &b, "bogus"), Ordering::Less);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let mut products: Vec<Arc<Product>> = ["a", "b", "c"]
            .into_iter()
            .map(|n| Arc::new(Product::new(n).with_price(1.0)))
            .collect();
        FieldComparator.sort(&mut products, "price", true);
        let names: Vec<&str> = products.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
