//! # Reports
//!
//! Read-only aggregation over the ledgers.
//!
//! ## Report Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What the Back Office Sees                            │
//! │                                                                         │
//! │  SaleStore ────┬──► sales_summary      revenue / count / average       │
//! │                ├──► staff_performance  per-staff totals, top seller    │
//! │                │                                                        │
//! │  FinanceStore ─┴──► profit_summary     revenue + income − expenses     │
//! │                                                                         │
//! │  InventoryStore ──► inventory_kpis     low stock / out / valuation     │
//! │                                                                         │
//! │  Cancelled sales never count as revenue. Date ranges are inclusive     │
//! │  on both ends and compare against the sale's creation date.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreResult;
use crate::repository::{FinanceStore, InventoryStore, SaleStore};
use petal_core::{Money, Sale, SaleStatus};

// =============================================================================
// Sales Summary
// =============================================================================

/// Revenue summary for a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub revenue: Money,
    pub transactions: usize,
    pub average_order_value: Money,
}

/// Summarizes sales created within the inclusive date range.
///
/// Cancelled sales are excluded; pending and processing orders count, since
/// the shop treats a placed order as earned revenue.
pub fn sales_summary(
    sales: &dyn SaleStore,
    from: NaiveDate,
    to: NaiveDate,
) -> StoreResult<SalesSummary> {
    debug!(%from, %to, "Building sales summary");

    let counted: Vec<Sale> = sales
        .list()?
        .into_iter()
        .filter(|s| in_range(s, from, to) && s.status != SaleStatus::Cancelled)
        .collect();

    let revenue: Money = counted.iter().map(|s| s.total).sum();
    let transactions = counted.len();
    let average_order_value = if transactions > 0 {
        Money::new(revenue.amount() / Decimal::from(transactions as i64))
    } else {
        Money::zero()
    };

    Ok(SalesSummary {
        from,
        to,
        revenue,
        transactions,
        average_order_value,
    })
}

// =============================================================================
// Staff Performance
// =============================================================================

/// One staff member's totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPerformance {
    pub staff_name: String,
    pub transactions: usize,
    pub revenue: Money,
}

/// Per-staff breakdown with the top seller first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffReport {
    /// Sorted by revenue, highest first.
    pub breakdown: Vec<StaffPerformance>,
    pub top_performer: Option<String>,
}

/// Groups non-cancelled sales by the staff member who rang them up.
///
/// Sales without a staff name land in an "Unassigned" bucket.
pub fn staff_performance(
    sales: &dyn SaleStore,
    from: NaiveDate,
    to: NaiveDate,
) -> StoreResult<StaffReport> {
    let mut totals: HashMap<String, (usize, Money)> = HashMap::new();

    for sale in sales.list()? {
        if !in_range(&sale, from, to) || sale.status == SaleStatus::Cancelled {
            continue;
        }
        let name = sale
            .staff_name
            .clone()
            .unwrap_or_else(|| "Unassigned".to_string());
        let entry = totals.entry(name).or_insert((0, Money::zero()));
        entry.0 += 1;
        entry.1 += sale.total;
    }

    let mut breakdown: Vec<StaffPerformance> = totals
        .into_iter()
        .map(|(staff_name, (transactions, revenue))| StaffPerformance {
            staff_name,
            transactions,
            revenue,
        })
        .collect();
    breakdown.sort_by(|a, b| b.revenue.cmp(&a.revenue).then(a.staff_name.cmp(&b.staff_name)));

    let top_performer = breakdown.first().map(|p| p.staff_name.clone());

    Ok(StaffReport {
        breakdown,
        top_performer,
    })
}

// =============================================================================
// Inventory KPIs
// =============================================================================

/// Stock health indicators over raw inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryKpis {
    /// Items with 0 < stock <= threshold.
    pub low_stock: usize,
    /// Items with no stock at all.
    pub out_of_stock: usize,
    /// Sum of unit cost x stock across all items.
    pub total_valuation: Money,
}

/// Computes stock health over the whole inventory.
pub fn inventory_kpis(
    inventory: &dyn InventoryStore,
    low_stock_threshold: i64,
) -> StoreResult<InventoryKpis> {
    let items = inventory.list()?;

    let low_stock = items
        .iter()
        .filter(|i| i.stock > 0 && i.stock <= low_stock_threshold)
        .count();
    let out_of_stock = items.iter().filter(|i| i.stock == 0).count();
    let total_valuation = items
        .iter()
        .map(|i| i.unit_cost.multiply_quantity(i.stock))
        .sum();

    Ok(InventoryKpis {
        low_stock,
        out_of_stock,
        total_valuation,
    })
}

// =============================================================================
// Profit Summary
// =============================================================================

/// Expenses grouped by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category: String,
    pub amount: Money,
}

/// Profit for a date range: what came in minus what went out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub sales_revenue: Money,
    pub manual_income: Money,
    pub expenses: Money,
    /// sales_revenue + manual_income - expenses; negative months happen.
    pub net: Money,
    /// Sorted by amount, largest first.
    pub expense_breakdown: Vec<CategoryExpense>,
}

/// Folds sales revenue and the manual ledgers into one profit figure.
pub fn profit_summary(
    sales: &dyn SaleStore,
    finance: &dyn FinanceStore,
    from: NaiveDate,
    to: NaiveDate,
) -> StoreResult<ProfitSummary> {
    debug!(%from, %to, "Building profit summary");

    let sales_revenue = sales_summary(sales, from, to)?.revenue;

    let manual_income: Money = finance
        .income_between(from, to)?
        .iter()
        .map(|e| e.amount)
        .sum();

    let expense_entries = finance.expenses_between(from, to)?;
    let expenses: Money = expense_entries.iter().map(|e| e.amount).sum();

    let mut by_category: HashMap<String, Money> = HashMap::new();
    for entry in &expense_entries {
        *by_category
            .entry(entry.category.clone())
            .or_insert_with(Money::zero) += entry.amount;
    }
    let mut expense_breakdown: Vec<CategoryExpense> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryExpense { category, amount })
        .collect();
    expense_breakdown
        .sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));

    Ok(ProfitSummary {
        from,
        to,
        sales_revenue,
        manual_income,
        expenses,
        net: sales_revenue + manual_income - expenses,
        expense_breakdown,
    })
}

fn in_range(sale: &Sale, from: NaiveDate, to: NaiveDate) -> bool {
    let date = sale.created_at.date_naive();
    date >= from && date <= to
}

// =============================================================================
// Unit Tests
// =============================================================================
