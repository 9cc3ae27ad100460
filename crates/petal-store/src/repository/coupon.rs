//! # Coupon Store
//!
//! The coupon book. Codes are case-insensitive: `save10`, `Save10`, and
//! `SAVE10` all hit the same coupon, so lookups normalize to uppercase.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use petal_core::Coupon;

/// Coupon lookup used at checkout.
pub trait CouponStore: Send + Sync {
    /// Inserts a coupon, normalizing its code to uppercase.
    ///
    /// ## Returns
    /// * `Err(StoreError::UniqueViolation)` - code already exists
    fn insert(&self, coupon: Coupon) -> StoreResult<()>;

    /// Finds a coupon by code, ignoring case and surrounding whitespace.
    fn find(&self, code: &str) -> StoreResult<Option<Coupon>>;

    /// Lists all coupons sorted by code.
    fn list(&self) -> StoreResult<Vec<Coupon>>;
}

/// In-memory [`CouponStore`] keyed by uppercased code.
#[derive(Debug, Default)]
pub struct MemoryCouponStore {
    rows: RwLock<HashMap<String, Coupon>>,
}

impl MemoryCouponStore {
    /// Creates an empty coupon book.
    pub fn new() -> Self {
        MemoryCouponStore::default()
    }
}

impl CouponStore for MemoryCouponStore {
    fn insert(&self, mut coupon: Coupon) -> StoreResult<()> {
        coupon.code = coupon.code.trim().to_uppercase();
        debug!(code = %coupon.code, "Inserting coupon");

        let mut rows = self.rows.write().expect("coupon store lock poisoned");
        if rows.contains_key(&coupon.code) {
            return Err(StoreError::duplicate("coupon code", &coupon.code));
        }
        rows.insert(coupon.code.clone(), coupon);
        Ok(())
    }

    fn find(&self, code: &str) -> StoreResult<Option<Coupon>> {
        let normalized = code.trim().to_uppercase();
        let rows = self.rows.read().expect("coupon store lock poisoned");
        Ok(rows.get(&normalized).cloned())
    }

    fn list(&self) -> StoreResult<Vec<Coupon>> {
        let rows = self.rows.read().expect("coupon store lock poisoned");
        let mut coupons: Vec<Coupon> = rows.values().cloned().collect();
        coupons.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(coupons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_core::CouponKind;
    use rust_decimal_macros::dec;

    fn save10() -> Coupon {
        Coupon {
            code: "SAVE10".to_string(),
            kind: CouponKind::Percent,
            value: dec!(10),
            label: "10% Off".to_string(),
        }
    }

    #[test]
    fn test_find_ignores_case_and_whitespace() {
        let store = MemoryCouponStore::new();
        store.insert(save10()).unwrap();

        assert!(store.find("SAVE10").unwrap().is_some());
        assert!(store.find("save10").unwrap().is_some());
        assert!(store.find("  Save10  ").unwrap().is_some());
        assert!(store.find("SAVE20").unwrap().is_none());
    }

    #[test]
    fn test_insert_normalizes_code() {
        let store = MemoryCouponStore::new();
        let mut coupon = save10();
        coupon.code = " save10 ".to_string();
        store.insert(coupon).unwrap();

        let found = store.find("SAVE10").unwrap().unwrap();
        assert_eq!(found.code, "SAVE10");
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let store = MemoryCouponStore::new();
        store.insert(save10()).unwrap();

        let mut again = save10();
        again.code = "save10".to_string();
        let err = store.insert(again).unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }
}
