//! In-memory product store.
//!
//! Products live for as long as the process does. The store is append-only:
//! there is no update or delete, and insertion order is the only ordering.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use stockroom_core::{NewProduct, Product};

/// Append-only, insertion-ordered product store.
///
/// Cheap to clone; clones share the same underlying sequence.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `product` with the current time and add it to the end.
    ///
    /// Returns the stored record. Duplicates are allowed.
    pub fn append(&self, product: NewProduct) -> Product {
        // Append-only: a poisoned lock still guards a consistent sequence.
        let mut products = self
            .products
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Stamped under the lock so timestamps follow insertion order.
        let product = Product::new(product, Utc::now());
        products.push(product.clone());
        product
    }

    /// Snapshot of every product, oldest first.
    #[must_use]
    pub fn list_all(&self) -> Vec<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of stored products.
    #[must_use]
    pub fn count(&self) -> usize {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
