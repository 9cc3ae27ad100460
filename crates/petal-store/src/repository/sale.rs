//! # Sale Store
//!
//! The sales ledger.
//!
//! ## Status Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Lifecycle                                       │
//! │                                                                         │
//! │                ┌──────────┐                                             │
//! │      ┌────────►│ pending  │────────┐                                    │
//! │      │         └────┬─────┘        │                                    │
//! │   checkout          │              │                                    │
//! │                     ▼              ▼                                    │
//! │               ┌────────────┐  ┌───────────┐                             │
//! │               │ processing │─►│ cancelled │  (terminal)                 │
//! │               └────┬───────┘  └───────────┘                             │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │               ┌───────────┐                                             │
//! │               │ completed │  (terminal, stamps completed_at)            │
//! │               └───────────┘                                             │
//! │                                                                         │
//! │  update_status enforces these edges; everything else is rejected.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use petal_core::{CoreError, Sale, SaleStatus};

/// Sales ledger access used by checkout and reports.
pub trait SaleStore: Send + Sync {
    /// Inserts a completed checkout.
    ///
    /// ## Returns
    /// * `Err(StoreError::UniqueViolation)` - id already exists
    fn insert(&self, sale: Sale) -> StoreResult<()>;

    /// Gets a sale by its ID.
    fn get(&self, id: &str) -> StoreResult<Option<Sale>>;

    /// Lists sales, newest first.
    fn list(&self) -> StoreResult<Vec<Sale>>;

    /// Moves a sale along the status machine.
    ///
    /// Stamps `completed_at` when the sale reaches `completed` and bumps
    /// `updated_at` on every transition.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - the updated sale
    /// * `Err(StoreError::NotFound)` - sale doesn't exist
    /// * `Err(StoreError::Core(InvalidStatusTransition))` - edge not allowed
    fn update_status(&self, id: &str, next: SaleStatus) -> StoreResult<Sale>;
}

/// In-memory [`SaleStore`] keyed by sale id.
#[derive(Debug, Default)]
pub struct MemorySaleStore {
    rows: RwLock<HashMap<String, Sale>>,
}

impl MemorySaleStore {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        MemorySaleStore::default()
    }
}

impl SaleStore for MemorySaleStore {
    fn insert(&self, sale: Sale) -> StoreResult<()> {
        debug!(id = %sale.id, receipt = %sale.receipt_number, "Inserting sale");

        let mut rows = self.rows.write().expect("sale store lock poisoned");
        if rows.contains_key(&sale.id) {
            return Err(StoreError::duplicate("sale id", &sale.id));
        }
        rows.insert(sale.id.clone(), sale);
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<Sale>> {
        let rows = self.rows.read().expect("sale store lock poisoned");
        Ok(rows.get(id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<Sale>> {
        let rows = self.rows.read().expect("sale store lock poisoned");
        let mut sales: Vec<Sale> = rows.values().cloned().collect();
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sales)
    }

    fn update_status(&self, id: &str, next: SaleStatus) -> StoreResult<Sale> {
        let mut rows = self.rows.write().expect("sale store lock poisoned");
        let sale = rows
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("Sale", id))?;

        if !sale.status.can_transition_to(next) {
            return Err(CoreError::InvalidStatusTransition {
                sale_id: id.to_string(),
                from: sale.status.to_string(),
                to: next.to_string(),
            }
            .into());
        }

        debug!(id = %id, from = %sale.status, to = %next, "Updating sale status");

        let now = Utc::now();
        sale.status = next;
        sale.updated_at = now;
        if next == SaleStatus::Completed {
            sale.completed_at = Some(now);
        }

        Ok(sale.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use petal_core::{Money, Payment, PaymentMethod, ServiceType};

    fn test_sale(id: &str, minutes_ago: i64) -> Sale {
        let at = Utc::now() - Duration::minutes(minutes_ago);
        Sale {
            id: id.to_string(),
            receipt_number: format!("ORD-{}", at.timestamp_millis()),
            status: SaleStatus::Pending,
            lines: vec![],
            subtotal: Money::from_major_minor(45, 99),
            discount: Money::zero(),
            tax: Money::from_major_minor(2, 30),
            delivery_fee: Money::zero(),
            total: Money::from_major_minor(48, 29),
            coupon_code: None,
            service_type: ServiceType::Pickup,
            delivery_address: None,
            note: None,
            payment: Payment {
                method: PaymentMethod::Cash,
                tendered: Money::from_major_minor(50, 0),
                change: Money::from_major_minor(1, 71),
            },
            customer_name: None,
            customer_phone: None,
            staff_name: Some("Maya".to_string()),
            created_at: at,
            updated_at: at,
            completed_at: None,
        }
    }

    #[test]
    fn test_list_newest_first() {
        let store = MemorySaleStore::new();
        store.insert(test_sale("sale_old", 60)).unwrap();
        store.insert(test_sale("sale_new", 1)).unwrap();
        store.insert(test_sale("sale_mid", 30)).unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["sale_new", "sale_mid", "sale_old"]);
    }

    #[test]
    fn test_full_lifecycle_stamps_completed_at() {
        let store = MemorySaleStore::new();
        store.insert(test_sale("sale_1", 0)).unwrap();

        let processing = store
            .update_status("sale_1", SaleStatus::Processing)
            .unwrap();
        assert_eq!(processing.status, SaleStatus::Processing);
        assert!(processing.completed_at.is_none());

        let completed = store.update_status("sale_1", SaleStatus::Completed).unwrap();
        assert_eq!(completed.status, SaleStatus::Completed);
        assert!(completed.completed_at.is_some());
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let store = MemorySaleStore::new();
        store.insert(test_sale("sale_1", 0)).unwrap();
        store.update_status("sale_1", SaleStatus::Cancelled).unwrap();

        let err = store
            .update_status("sale_1", SaleStatus::Processing)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_pending_cannot_skip_to_completed() {
        let store = MemorySaleStore::new();
        store.insert(test_sale("sale_1", 0)).unwrap();

        let err = store
            .update_status("sale_1", SaleStatus::Completed)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InvalidStatusTransition { .. })
        ));

        // The stored sale is untouched
        let sale = store.get("sale_1").unwrap().unwrap();
        assert_eq!(sale.status, SaleStatus::Pending);
    }

    #[test]
    fn test_unknown_sale() {
        let store = MemorySaleStore::new();
        let err = store
            .update_status("sale_ghost", SaleStatus::Processing)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
