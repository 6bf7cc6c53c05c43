//! Sort-key vocabulary for product listings.
//!
//! A [`SortKey`] names one product field and knows how to order two products
//! by it. Absent optional values (no spec, no price, no timestamp) order
//! before present ones, so ascending listings put incomplete products first.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::product::Product;

/// A product field that listings can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Alias,
    Description,
    Uid,
    CreationTimestamp,
    Category,
    Price,
    Sold,
    SoldTimestamp,
}

impl SortKey {
    /// All keys, in declaration order.
    pub const ALL: [SortKey; 9] = [
        SortKey::Name,
        SortKey::Alias,
        SortKey::Description,
        SortKey::Uid,
        SortKey::CreationTimestamp,
        SortKey::Category,
        SortKey::Price,
        SortKey::Sold,
        SortKey::SoldTimestamp,
    ];

    /// Canonical (camelCase) spelling of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Alias => "alias",
            Self::Description => "description",
            Self::Uid => "uid",
            Self::CreationTimestamp => "creationTimestamp",
            Self::Category => "category",
            Self::Price => "price",
            Self::Sold => "sold",
            Self::SoldTimestamp => "soldTimestamp",
        }
    }

    /// Order two products by this key (ascending).
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let (am, bm) = (&a.metadata, &b.metadata);
        match self {
            Self::Name => am.name.cmp(&bm.name),
            Self::Alias => am.alias.cmp(&bm.alias),
            Self::Description => am.description.cmp(&bm.description),
            Self::Uid => am.uid.cmp(&bm.uid),
            Self::CreationTimestamp => am.creation_timestamp.cmp(&bm.creation_timestamp),
            Self::Category => {
                let category = |p: &Product| p.spec.as_ref().map(|s| s.category.clone());
                category(a).cmp(&category(b))
            }
            Self::Price => match (a.price(), b.price()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (x, y) => x.is_some().cmp(&y.is_some()),
            },
            Self::Sold => {
                let sold = |p: &Product| p.status.as_ref().and_then(|s| s.sold);
                sold(a).cmp(&sold(b))
            }
            Self::SoldTimestamp => {
                let at = |p: &Product| p.status.as_ref().and_then(|s| s.sold_timestamp);
                at(a).cmp(&at(b))
            }
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TypeError;

    /// Case-insensitive; `_` and `-` separators are ignored, so
    /// `creationTimestamp`, `creation_timestamp` and `creation-timestamp`
    /// all resolve to [`SortKey::CreationTimestamp`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| TypeError::UnknownSortKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductStatus;
    use chrono::{Duration, Utc};
    use proptest::prelude::*;

    #[test]
    fn parse_accepts_spelling_variants() {
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!("Price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!(
            "creationTimestamp".parse::<SortKey>().unwrap(),
            SortKey::CreationTimestamp
        );
        assert_eq!(
            "sold_timestamp".parse::<SortKey>().unwrap(),
            SortKey::SoldTimestamp
        );
    }

    #[test]
    fn parse_rejects_unknown_key() {
        let err = "weight".parse::<SortKey>().unwrap_err();
        assert_eq!(err, TypeError::UnknownSortKey("weight".into()));
    }

    #[test]
    fn canonical_spelling_round_trips() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn missing_price_sorts_first() {
        let priced = Product::new("a").with_price(1.0);
        let unpriced = Product::new("b");
        assert_eq!(SortKey::Price.compare(&unpriced, &priced), Ordering::Less);
        assert_eq!(SortKey::Price.compare(&priced, &unpriced), Ordering::Greater);
        assert_eq!(SortKey::Price.compare(&unpriced, &unpriced), Ordering::Equal);
    }

    #[test]
    fn compares_sold_timestamps() {
        let now = Utc::now();
        let mut early = Product::new("early");
        early.status = Some(ProductStatus {
            sold: Some(true),
            sold_timestamp: Some(now),
        });
        let mut late = Product::new("late");
        late.status = Some(ProductStatus {
            sold: Some(true),
            sold_timestamp: Some(now + Duration::hours(1)),
        });
        assert_eq!(SortKey::SoldTimestamp.compare(&early, &late), Ordering::Less);
        assert_eq!(SortKey::Sold.compare(&early, &late), Ordering::Equal);
    }

    proptest! {
        #[test]
        fn price_order_is_antisymmetric(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let a = Product::new("a").with_price(x);
            let b = Product::new("b").with_price(y);
            prop_assert_eq!(
                SortKey::Price.compare(&a, &b),
                SortKey::Price.compare(&b, &a).reverse()
            );
        }
    }
}
