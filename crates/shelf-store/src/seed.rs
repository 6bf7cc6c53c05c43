//! Bootstrap products for demos and manual testing.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use shelf_types::{Metadata, Product, ProductSpec, ProductStatus};

use crate::traits::IdGenerator;

/// Price given to every seeded product.
pub const SEED_PRICE: f64 = 22.3;

/// Build `count` sample products named `product0`, `product1`, ...
///
/// Each gets an identifier from `ids`, a creation timestamp of now, and a
/// sold timestamp one day later.
pub fn seed_products(count: usize, ids: &dyn IdGenerator) -> Vec<Product> {
    (0..count)
        .map(|i| {
            let created = Utc::now();
            Product {
                metadata: Metadata {
                    uid: ids.next_id(),
                    name: format!("product{i}"),
                    alias: format!("产品{i}"),
                    description: "这是一个普通的产品".to_string(),
                    labels: BTreeMap::from([("label1".to_string(), "labelTest".to_string())]),
                    annotations: BTreeMap::from([(
                        "annotations".to_string(),
                        "annotationsTest".to_string(),
                    )]),
                    creation_timestamp: Some(created),
                },
                spec: Some(ProductSpec {
                    category: "test".to_string(),
                    price: Some(SEED_PRICE),
                }),
                status: Some(ProductStatus {
                    sold: Some(true),
                    sold_timestamp: Some(created + Duration::hours(24)),
                }),
            }
        })
        .collect()
}
