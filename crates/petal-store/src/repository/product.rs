//! # Product Store
//!
//! Catalog operations for products.
//!
//! ## Key Operations
//! - Substring search with category filter
//! - CRUD operations
//! - Soft deactivation
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Catalog Search Works                             │
//! │                                                                         │
//! │  User types: "rose", category tab: Bouquet                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lowercase substring match on name, exact match on category            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ Red Roses Dozen    | Bouquet            │ ← MATCH!                  │
//! │  │ Rose Petal Box     | Gift               │   (name hits, wrong tab)  │
//! │  │ Tulip Bunch        | Bouquet            │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [Red Roses Dozen]                                            │
//! │                                                                         │
//! │  The catalog is small enough that a linear scan is instant.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use petal_core::Product;

/// Catalog access used by checkout, reports, and the UI layer.
///
/// ## Usage
/// ```rust,ignore
/// let products = MemoryProductStore::new();
///
/// // Search the catalog
/// let results = products.search("rose", None)?;
///
/// // Get by ID
/// let product = products.get("prod_red_roses_dozen")?;
/// ```
pub trait ProductStore: Send + Sync {
    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(StoreError::UniqueViolation)` - id already exists
    fn insert(&self, product: Product) -> StoreResult<()>;

    /// Replaces an existing product and bumps its `updated_at`.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - product doesn't exist
    fn update(&self, product: Product) -> StoreResult<()>;

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - product found
    /// * `Ok(None)` - product not found
    fn get(&self, id: &str) -> StoreResult<Option<Product>>;

    /// Lists active products sorted by name.
    fn list_active(&self) -> StoreResult<Vec<Product>>;

    /// Searches active products.
    ///
    /// ## How It Works
    /// 1. `query` matches as a case-insensitive substring of the name
    /// 2. `category` (when given) must match exactly, ignoring case
    /// 3. An empty query matches everything in the category
    fn search(&self, query: &str, category: Option<&str>) -> StoreResult<Vec<Product>>;

    /// Deactivates a product so it stops appearing in the catalog.
    ///
    /// ## Why Soft Delete?
    /// - Historical sales still reference this product
    /// - Can be restored if deactivated by mistake
    fn deactivate(&self, id: &str) -> StoreResult<()>;

    /// Counts active products (for diagnostics).
    fn count(&self) -> StoreResult<usize>;
}

/// In-memory [`ProductStore`] keyed by product id.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    rows: RwLock<HashMap<String, Product>>,
}

impl MemoryProductStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        MemoryProductStore::default()
    }
}

impl ProductStore for MemoryProductStore {
    fn insert(&self, product: Product) -> StoreResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        let mut rows = self.rows.write().expect("product store lock poisoned");
        if rows.contains_key(&product.id) {
            return Err(StoreError::duplicate("product id", &product.id));
        }
        rows.insert(product.id.clone(), product);
        Ok(())
    }

    fn update(&self, mut product: Product) -> StoreResult<()> {
        debug!(id = %product.id, "Updating product");

        let mut rows = self.rows.write().expect("product store lock poisoned");
        if !rows.contains_key(&product.id) {
            return Err(StoreError::not_found("Product", &product.id));
        }
        product.updated_at = Utc::now();
        rows.insert(product.id.clone(), product);
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        let rows = self.rows.read().expect("product store lock poisoned");
        Ok(rows.get(id).cloned())
    }

    fn list_active(&self) -> StoreResult<Vec<Product>> {
        let rows = self.rows.read().expect("product store lock poisoned");
        let mut products: Vec<Product> =
            rows.values().filter(|p| p.is_active).cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    fn search(&self, query: &str, category: Option<&str>) -> StoreResult<Vec<Product>> {
        let query = query.trim().to_lowercase();
        debug!(query = %query, category = ?category, "Searching catalog");

        let mut products: Vec<Product> = {
            let rows = self.rows.read().expect("product store lock poisoned");
            rows.values()
                .filter(|p| p.is_active)
                .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
                .filter(|p| {
                    category
                        .map(|c| p.category.eq_ignore_ascii_case(c))
                        .unwrap_or(true)
                })
                .cloned()
                .collect()
        };
        products.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    fn deactivate(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deactivating product");

        let mut rows = self.rows.write().expect("product store lock poisoned");
        match rows.get_mut(id) {
            Some(product) => {
                product.is_active = false;
                product.updated_at = Utc::now();
                Ok(())
            }
            None => Err(StoreError::not_found("Product", id)),
        }
    }

    fn count(&self) -> StoreResult<usize> {
        let rows = self.rows.read().expect("product store lock poisoned");
        Ok(rows.values().filter(|p| p.is_active).count())
    }
}
