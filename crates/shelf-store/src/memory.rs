//! In-memory product store.
//!
//! [`InMemoryProductStore`] keeps every product in a `HashMap` keyed by name,
//! behind a single `RwLock` that covers the whole map. Writers hold the lock
//! in exclusive mode across their existence check and their mutation, so a
//! check can never be invalidated before the mutation it guards. Listings
//! copy the map's `Arc` handles under the read lock and sort the copy after
//! releasing it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shelf_types::Product;
use tracing::{debug, info};

use crate::collaborators::{FieldComparator, UuidGenerator};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::page::{paginate, ListOptions};
use crate::seed::seed_products;
use crate::traits::{IdGenerator, ProductComparator, ProductRepository};

type ProductMap = HashMap<String, Arc<Product>>;

/// An in-memory implementation of [`ProductRepository`].
///
/// Data is lost when the store is dropped. Share one instance between
/// threads with `Arc<InMemoryProductStore>`.
pub struct InMemoryProductStore {
    products: RwLock<ProductMap>,
    ids: Box<dyn IdGenerator>,
    comparator: Box<dyn ProductComparator>,
}

impl InMemoryProductStore {
    /// Create an empty store with UUID identifiers and field ordering.
    pub fn new() -> Self {
        Self::with_collaborators(Box::new(UuidGenerator), Box::new(FieldComparator))
    }

    /// Create an empty store with custom collaborators.
    pub fn with_collaborators(
        ids: Box<dyn IdGenerator>,
        comparator: Box<dyn ProductComparator>,
    ) -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
            ids,
            comparator,
        }
    }

    /// Create a store pre-populated with `count` bootstrap products.
    pub fn seeded(count: usize) -> Self {
        let store = Self::new();
        {
            let mut map = store
                .products
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            for product in seed_products(count, store.ids.as_ref()) {
                map.insert(product.metadata.name.clone(), Arc::new(product));
            }
        }
        info!(count, "seeded product store");
        store
    }

    /// Create a store as described by `config`.
    pub fn from_config(config: &StoreConfig) -> Self {
        if config.seed_count > 0 {
            Self::seeded(config.seed_count)
        } else {
            Self::new()
        }
    }

    /// Number of products currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_map()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_map()?.is_empty())
    }

    /// Returns `true` if a product is stored under `name`.
    pub fn contains(&self, name: &str) -> StoreResult<bool> {
        Ok(self.read_map()?.contains_key(name))
    }

    fn read_map(&self) -> StoreResult<RwLockReadGuard<'_, ProductMap>> {
        self.products
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write_map(&self) -> StoreResult<RwLockWriteGuard<'_, ProductMap>> {
        self.products
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductRepository for InMemoryProductStore {
    fn add(&self, mut product: Product) -> StoreResult<Arc<Product>> {
        // Minted outside the lock; a failed add just discards the id.
        product.metadata.uid = self.ids.next_id();
        let product = Arc::new(product);

        let mut map = self.write_map()?;
        if map.contains_key(product.name()) {
            return Err(StoreError::already_exists(product.name()));
        }
        map.insert(product.metadata.name.clone(), Arc::clone(&product));
        drop(map);

        debug!(name = %product.name(), uid = %product.uid(), "product added");
        Ok(product)
    }

    fn get(&self, name: &str) -> StoreResult<Option<Arc<Product>>> {
        Ok(self.read_map()?.get(name).cloned())
    }

    fn get_all(&self, options: &ListOptions) -> StoreResult<Vec<Arc<Product>>> {
        let mut snapshot: Vec<Arc<Product>> = self.read_map()?.values().cloned().collect();

        self.comparator
            .sort(&mut snapshot, &options.order_key, options.reverse);
        Ok(paginate(&snapshot, options.start, options.limit).to_vec())
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        let mut map = self.write_map()?;
        if map.remove(name).is_none() {
            return Err(StoreError::not_found(name));
        }
        drop(map);

        debug!(name, "product deleted");
        Ok(())
    }

    fn update(&self, name: &str, product: Product) -> StoreResult<()> {
        if product.name() != name {
            return Err(StoreError::ValidationFailed {
                name: name.to_string(),
                reason: format!("product name {:?} does not match", product.name()),
            });
        }

        let mut map = self.write_map()?;
        let slot = map.get_mut(name).ok_or_else(|| StoreError::not_found(name))?;
        *slot = Arc::new(product);
        drop(map);

        debug!(name, "product updated");
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.products.read().map(|m| m.len()).ok();
        f.debug_struct("InMemoryProductStore")
            .field("product_count", &count)
            .finish()
    }
}
