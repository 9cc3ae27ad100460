//! # Finance Store
//!
//! Manual ledger entries outside the sales flow: supplier invoices, rent,
//! wedding deposits taken over the phone. Reports fold these into the
//! profit summary alongside sales revenue.

use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::StoreResult;
use petal_core::{ExpenseEntry, IncomeEntry};

/// Manual expense and income ledger.
pub trait FinanceStore: Send + Sync {
    /// Records an expense.
    fn record_expense(&self, entry: ExpenseEntry) -> StoreResult<()>;

    /// Records income that did not come through checkout.
    fn record_income(&self, entry: IncomeEntry) -> StoreResult<()>;

    /// Expenses dated within the inclusive range.
    fn expenses_between(&self, from: NaiveDate, to: NaiveDate)
        -> StoreResult<Vec<ExpenseEntry>>;

    /// Manual income dated within the inclusive range.
    fn income_between(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<IncomeEntry>>;
}

/// In-memory [`FinanceStore`] holding entries in insertion order.
#[derive(Debug, Default)]
pub struct MemoryFinanceStore {
    expenses: RwLock<Vec<ExpenseEntry>>,
    income: RwLock<Vec<IncomeEntry>>,
}

impl MemoryFinanceStore {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        MemoryFinanceStore::default()
    }
}

impl FinanceStore for MemoryFinanceStore {
    fn record_expense(&self, entry: ExpenseEntry) -> StoreResult<()> {
        debug!(category = %entry.category, amount = %entry.amount, "Recording expense");
        let mut expenses = self.expenses.write().expect("finance ledger lock poisoned");
        expenses.push(entry);
        Ok(())
    }

    fn record_income(&self, entry: IncomeEntry) -> StoreResult<()> {
        debug!(amount = %entry.amount, "Recording manual income");
        let mut income = self.income.write().expect("finance ledger lock poisoned");
        income.push(entry);
        Ok(())
    }

    fn expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<ExpenseEntry>> {
        let expenses = self.expenses.read().expect("finance ledger lock poisoned");
        Ok(expenses
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .cloned()
            .collect())
    }

    fn income_between(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<IncomeEntry>> {
        let income = self.income.read().expect("finance ledger lock poisoned");
        Ok(income
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_core::Money;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: &str, on: NaiveDate, category: &str, major: i64) -> ExpenseEntry {
        ExpenseEntry {
            id: id.to_string(),
            date: on,
            category: category.to_string(),
            description: format!("{category} invoice"),
            amount: Money::from_major_minor(major, 0),
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let store = MemoryFinanceStore::new();
        store
            .record_expense(expense("exp_1", date(2025, 6, 1), "Flowers", 120))
            .unwrap();
        store
            .record_expense(expense("exp_2", date(2025, 6, 15), "Rent", 900))
            .unwrap();
        store
            .record_expense(expense("exp_3", date(2025, 6, 30), "Flowers", 80))
            .unwrap();
        store
            .record_expense(expense("exp_4", date(2025, 7, 1), "Flowers", 60))
            .unwrap();

        let june = store
            .expenses_between(date(2025, 6, 1), date(2025, 6, 30))
            .unwrap();
        assert_eq!(june.len(), 3);

        let mid = store
            .expenses_between(date(2025, 6, 2), date(2025, 6, 29))
            .unwrap();
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].id, "exp_2");
    }

    #[test]
    fn test_income_recorded_separately() {
        let store = MemoryFinanceStore::new();
        store
            .record_income(IncomeEntry {
                id: "inc_1".to_string(),
                date: date(2025, 6, 10),
                description: "Wedding deposit".to_string(),
                amount: Money::from_major_minor(250, 0),
            })
            .unwrap();

        let income = store
            .income_between(date(2025, 6, 1), date(2025, 6, 30))
            .unwrap();
        assert_eq!(income.len(), 1);

        let expenses = store
            .expenses_between(date(2025, 6, 1), date(2025, 6, 30))
            .unwrap();
        assert!(expenses.is_empty());
    }
}
