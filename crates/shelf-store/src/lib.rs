//! Concurrent in-memory product repository for Shelf.
//!
//! This crate is the data-access layer behind the Shelf product service. It
//! owns the name → product mapping and guarantees that concurrent callers
//! see linearizable adds, updates, and deletes.
//!
//! # Operations
//!
//! All backends implement the [`ProductRepository`] trait:
//!
//! - `add` -- insert a new product and assign its identifier
//! - `get` -- look up by name (`Ok(None)` when absent)
//! - `get_all` -- sorted, paginated listing from a point-in-time snapshot
//! - `update` -- replace a product wholesale
//! - `delete` -- remove by name
//!
//! # Design Rules
//!
//! 1. One `RwLock` covers the whole map; there is no per-key locking.
//! 2. Every existence check runs under the same write-lock acquisition as the
//!    mutation it guards.
//! 3. Listings sort a private copy after the read lock is released.
//! 4. Stored products are immutable `Arc`s, replaced wholesale on update.
//! 5. Errors are returned to the caller immediately and never retried.
//! 6. A listing whose `start` is past the end returns the last product.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod memory;
pub mod page;
pub mod seed;
pub mod traits;

pub use collaborators::{FieldComparator, SequentialGenerator, UuidGenerator};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryProductStore;
pub use page::{paginate, ListOptions};
pub use seed::seed_products;
pub use traits::{IdGenerator, ProductComparator, ProductRepository};
