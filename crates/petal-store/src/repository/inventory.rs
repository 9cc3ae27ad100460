//! # Inventory Store
//!
//! Raw material stock levels and the adjustment log.
//!
//! ## Adjustment Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Adjustment Strategy                            │
//! │                                                                         │
//! │  Every change goes through adjust(), which records what happened:      │
//! │                                                                         │
//! │  adjust("inv_rose_red", Remove(24), "sale ORD-...")                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stock: 500 → 476        log: { delta: -24, stock_after: 476, ... }    │
//! │                                                                         │
//! │  Remove floors at zero, Set clamps its target at zero. Stock is        │
//! │  never negative, so the composite resolver can floor-divide safely.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use petal_core::InventoryItem;

/// How a stock level changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustKind {
    /// Restock: adds the given amount.
    Add(i64),
    /// Consumption or spoilage: removes the given amount, flooring at 0.
    Remove(i64),
    /// Recount: replaces the stock, clamping the target at 0.
    Set(i64),
}

/// One recorded stock change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub id: String,
    pub inventory_item_id: String,
    /// Signed change actually applied (after flooring/clamping).
    pub delta: i64,
    /// Stock level after the change.
    pub stock_after: i64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Raw material stock access used by checkout, availability, and reports.
pub trait InventoryStore: Send + Sync {
    /// Inserts a new inventory item.
    ///
    /// ## Returns
    /// * `Err(StoreError::UniqueViolation)` - id already exists
    fn insert(&self, item: InventoryItem) -> StoreResult<()>;

    /// Gets an item by its ID.
    fn get(&self, id: &str) -> StoreResult<Option<InventoryItem>>;

    /// Lists all items sorted by name.
    fn list(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Snapshot of the whole inventory keyed by id.
    ///
    /// ## Usage
    /// The composite stock resolver takes this index so it can stay a pure
    /// function over values.
    fn index(&self) -> StoreResult<HashMap<String, InventoryItem>>;

    /// Applies a stock change and records it in the adjustment log.
    ///
    /// ## Returns
    /// * `Ok(i64)` - the stock level after the change
    /// * `Err(StoreError::NotFound)` - item doesn't exist
    fn adjust(&self, id: &str, kind: AdjustKind, reason: &str) -> StoreResult<i64>;

    /// The adjustment log, oldest first.
    fn adjustments(&self) -> StoreResult<Vec<StockAdjustment>>;
}

/// In-memory [`InventoryStore`] keyed by item id.
#[derive(Debug, Default)]
pub struct MemoryInventoryStore {
    rows: RwLock<HashMap<String, InventoryItem>>,
    log: RwLock<Vec<StockAdjustment>>,
}

impl MemoryInventoryStore {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        MemoryInventoryStore::default()
    }
}

impl InventoryStore for MemoryInventoryStore {
    fn insert(&self, item: InventoryItem) -> StoreResult<()> {
        debug!(id = %item.id, name = %item.name, stock = item.stock, "Inserting inventory item");

        let mut rows = self.rows.write().expect("inventory store lock poisoned");
        if rows.contains_key(&item.id) {
            return Err(StoreError::duplicate("inventory item id", &item.id));
        }
        rows.insert(item.id.clone(), item);
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<InventoryItem>> {
        let rows = self.rows.read().expect("inventory store lock poisoned");
        Ok(rows.get(id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        let rows = self.rows.read().expect("inventory store lock poisoned");
        let mut items: Vec<InventoryItem> = rows.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn index(&self) -> StoreResult<HashMap<String, InventoryItem>> {
        let rows = self.rows.read().expect("inventory store lock poisoned");
        Ok(rows.clone())
    }

    fn adjust(&self, id: &str, kind: AdjustKind, reason: &str) -> StoreResult<i64> {
        let mut rows = self.rows.write().expect("inventory store lock poisoned");
        let item = rows
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("Inventory item", id))?;

        let before = item.stock;
        let target = match kind {
            AdjustKind::Add(amount) => before + amount,
            AdjustKind::Remove(amount) => before - amount,
            AdjustKind::Set(amount) => amount,
        };
        // Stock never goes negative
        let after = target.max(0);
        item.stock = after;

        debug!(
            id = %id,
            kind = ?kind,
            before = before,
            after = after,
            reason = %reason,
            "Adjusting stock"
        );

        let mut log = self.log.write().expect("inventory log lock poisoned");
        log.push(StockAdjustment {
            id: format!("adj_{}", Uuid::new_v4()),
            inventory_item_id: id.to_string(),
            delta: after - before,
            stock_after: after,
            reason: reason.to_string(),
            created_at: Utc::now(),
        });

        Ok(after)
    }

    fn adjustments(&self) -> StoreResult<Vec<StockAdjustment>> {
        let log = self.log.read().expect("inventory log lock poisoned");
        Ok(log.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_core::Money;

    fn rose_stems(stock: i64) -> InventoryItem {
        InventoryItem {
            id: "inv_rose_red".to_string(),
            name: "Red Rose".to_string(),
            stock,
            unit: "stem".to_string(),
            unit_cost: Money::from_major_minor(1, 50),
        }
    }

    #[test]
    fn test_add_and_remove() {
        let store = MemoryInventoryStore::new();
        store.insert(rose_stems(100)).unwrap();

        assert_eq!(
            store
                .adjust("inv_rose_red", AdjustKind::Add(50), "restock")
                .unwrap(),
            150
        );
        assert_eq!(
            store
                .adjust("inv_rose_red", AdjustKind::Remove(24), "sale")
                .unwrap(),
            126
        );
    }

    #[test]
    fn test_remove_floors_at_zero() {
        let store = MemoryInventoryStore::new();
        store.insert(rose_stems(10)).unwrap();

        let after = store
            .adjust("inv_rose_red", AdjustKind::Remove(25), "spoilage")
            .unwrap();
        assert_eq!(after, 0);

        // The log records what actually happened, not what was asked
        let log = store.adjustments().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].delta, -10);
        assert_eq!(log[0].stock_after, 0);
    }

    #[test]
    fn test_set_clamps_at_zero() {
        let store = MemoryInventoryStore::new();
        store.insert(rose_stems(10)).unwrap();

        assert_eq!(
            store
                .adjust("inv_rose_red", AdjustKind::Set(75), "recount")
                .unwrap(),
            75
        );
        assert_eq!(
            store
                .adjust("inv_rose_red", AdjustKind::Set(-5), "bad recount")
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_adjust_unknown_item() {
        let store = MemoryInventoryStore::new();
        let err = store
            .adjust("inv_ghost", AdjustKind::Add(1), "restock")
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_index_is_a_snapshot() {
        let store = MemoryInventoryStore::new();
        store.insert(rose_stems(100)).unwrap();

        let index = store.index().unwrap();
        store
            .adjust("inv_rose_red", AdjustKind::Remove(40), "sale")
            .unwrap();

        // The snapshot keeps the stock it was taken with
        assert_eq!(index["inv_rose_red"].stock, 100);
        assert_eq!(store.get("inv_rose_red").unwrap().unwrap().stock, 60);
    }

    #[test]
    fn test_log_is_chronological() {
        let store = MemoryInventoryStore::new();
        store.insert(rose_stems(100)).unwrap();

        store
            .adjust("inv_rose_red", AdjustKind::Remove(10), "sale one")
            .unwrap();
        store
            .adjust("inv_rose_red", AdjustKind::Remove(5), "sale two")
            .unwrap();

        let log = store.adjustments().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].reason, "sale one");
        assert_eq!(log[1].reason, "sale two");
        assert_eq!(log[1].stock_after, 85);
    }
}
