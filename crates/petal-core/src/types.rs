//! # Domain Types
//!
//! Core domain types used throughout Petal POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  InventoryItem  │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  code           │       │
//! │  │  price (Money)  │   │  stock          │   │  kind           │       │
//! │  │  options        │   │  unit           │   │  value          │       │
//! │  │  stocking ──────┼──►│  unit_cost      │   │  label          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Stocking     │   │   SaleStatus    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Simple{stock}  │   │  Pending        │   │  Cash           │       │
//! │  │  Composite{     │   │  Processing     │   │  CreditCard     │       │
//! │  │    recipe }     │   │  Completed      │   │  DebitCard      │       │
//! │  └─────────────────┘   │  Cancelled      │   │  QrTransfer     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Anything that ends up inside a Sale (line items, selected options) carries
//! denormalized copies of name and price taken at selection time, so later
//! catalog edits never rewrite history.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (the fixed sales tax in this shop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact decimal fraction (500 bps → 0.05).
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// A raw stock-keeping unit (rose stems, ribbon, vases).
///
/// Inventory items are what composite products consume; they are not sellable
/// on their own. Stock is a non-negative count in `unit`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique identifier.
    pub id: String,

    /// Display name shown in inventory screens.
    pub name: String,

    /// On-hand quantity, in units of `unit`.
    pub stock: i64,

    /// Unit of measure ("stem", "meter", "piece").
    pub unit: String,

    /// Cost per unit (for inventory valuation).
    pub unit_cost: Money,
}

// =============================================================================
// Product Options
// =============================================================================

/// How an option behaves when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// Independently toggle-able add-on (gift wrap, card).
    Checkbox,
    /// Mutually exclusive variant; at most one radio option per product.
    Radio,
}

/// A named add-on or variant choice defined on a product.
///
/// Immutable once defined; cart lines copy what they need.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: String,
    pub name: String,
    /// Price delta added to the product's base price.
    pub price: Money,
    pub kind: OptionKind,
}

/// An option chosen for one cart line.
///
/// Denormalized copy of id/name/price at selection time, so historical
/// orders are unaffected by later option edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub option_id: String,
    pub name: String,
    pub price: Money,
}

impl SelectedOption {
    /// Snapshots a product option into a selection.
    pub fn from_option(option: &ProductOption) -> Self {
        SelectedOption {
            option_id: option.id.clone(),
            name: option.name.clone(),
            price: option.price,
        }
    }
}

// =============================================================================
// Recipe (Bill of Materials)
// =============================================================================

/// One component of a composite product's recipe.
///
/// Pairs an inventory item id with the quantity consumed per unit of
/// finished product. Order matters: ties in stock resolution break toward
/// the first entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    pub inventory_item_id: String,
    /// Units of the inventory item needed per finished product.
    pub quantity: i64,
}

// =============================================================================
// Stocking
// =============================================================================

/// How a product's sellable stock is determined.
///
/// The tagged variant replaces the "empty recipe array means simple"
/// convention: a simple product carries its own count, a composite product
/// never stores one (stock is derived from inventory at read time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stocking {
    /// Manually tracked on-hand quantity.
    Simple { stock: i64 },
    /// Stock derived from raw inventory via the recipe.
    Composite { recipe: Vec<RecipeItem> },
}

impl Stocking {
    /// Checks whether stock is derived from a recipe.
    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(self, Stocking::Composite { .. })
    }

    /// Returns the recipe for composite stocking.
    pub fn recipe(&self) -> Option<&[RecipeItem]> {
        match self {
            Stocking::Simple { .. } => None,
            Stocking::Composite { recipe } => Some(recipe),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A sellable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name shown on the POS grid and on receipts.
    pub name: String,

    /// Base price before options.
    pub price: Money,

    /// Unit of sale ("bouquet", "stem", "arrangement").
    pub unit: String,

    /// Category tag for the POS grid ("Rose", "Lily", "New", ...).
    pub category: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Optional image reference for the UI.
    pub image: Option<String>,

    /// Whether product is active (soft delete).
    pub is_active: bool,

    /// Stock at or below this level counts as "low" in inventory KPIs.
    pub low_stock_threshold: i64,

    /// Add-ons and variants offered with this product.
    pub options: Vec<ProductOption>,

    /// Simple (own stock) or composite (recipe-derived stock).
    pub stocking: Stocking,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether stock is derived from a recipe.
    #[inline]
    pub fn is_composite(&self) -> bool {
        self.stocking.is_composite()
    }

    /// Looks up an option defined on this product.
    pub fn find_option(&self, option_id: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Returns the default radio option: the first one in definition order.
    ///
    /// Products with a radio group always display one variant pre-selected.
    pub fn default_radio(&self) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.kind == OptionKind::Radio)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// Discount kind for a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// `value` is a percentage of the subtotal (10 = 10% off).
    Percent,
    /// `value` is a flat money amount.
    Amount,
}

/// A discount rule applied to an order's subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Uppercase redemption code ("SAVE10").
    pub code: String,
    pub kind: CouponKind,
    /// Percentage points or flat amount depending on `kind`.
    #[ts(type = "number")]
    pub value: Decimal,
    /// Human-readable label ("10% Off").
    pub label: String,
}

impl Coupon {
    /// Computes the discount this coupon grants on a subtotal.
    ///
    /// A flat coupon is capped at the subtotal so the taxable base never
    /// goes negative; a percent coupon of at most 100% cannot exceed it.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        match self.kind {
            CouponKind::Percent => subtotal.percentage(self.value),
            CouponKind::Amount => Money::new(self.value).min(subtotal),
        }
    }
}

// =============================================================================
// Service Type
// =============================================================================

/// Fulfillment mode of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Customer collects in store; delivery fee never applies.
    Pickup,
    /// Courier delivery; the configured fee applies.
    Delivery,
}

// =============================================================================
// Payment
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash; change may be due.
    Cash,
    CreditCard,
    DebitCard,
    /// QR-code bank transfer.
    QrTransfer,
}

/// The settled payment on a sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub method: PaymentMethod,
    /// Amount the customer handed over. Equals the total for non-cash.
    pub tendered: Money,
    /// Change returned. Zero for non-cash.
    pub change: Money,
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale.
///
/// ## State Machine
/// ```text
/// pending ──► processing ──► completed
///    │             │
///    └─────────────┴───────► cancelled
/// ```
/// `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Just placed; awaiting preparation.
    Pending,
    /// Being prepared / out for delivery.
    Processing,
    /// Fulfilled and closed.
    Completed,
    /// Called off before completion.
    Cancelled,
}

impl SaleStatus {
    /// Checks whether a transition to `next` is allowed by the machine.
    pub fn can_transition_to(self, next: SaleStatus) -> bool {
        use SaleStatus::*;
        matches!(
            (self, next),
            (Pending, Processing) | (Pending, Cancelled) | (Processing, Completed) | (Processing, Cancelled)
        )
    }

    /// Checks whether this status admits no further transitions.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SaleStatus::Completed | SaleStatus::Cancelled)
    }
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Pending
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SaleStatus::Pending => "pending",
            SaleStatus::Processing => "processing",
            SaleStatus::Completed => "completed",
            SaleStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    /// Unit price at time of sale: base price + selected option prices.
    pub unit_price: Money,
    pub quantity: i64,
    /// Option snapshots carried from the cart line.
    pub options: Vec<SelectedOption>,
    /// unit_price × quantity.
    pub line_total: Money,
}

/// An immutable record of a completed order.
///
/// Created at checkout; only `status` (and the bookkeeping timestamps) may
/// change afterward, and only along the status machine.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    /// Human-readable order number printed on the receipt.
    pub receipt_number: String,
    pub status: SaleStatus,
    pub lines: Vec<SaleLine>,

    /// Totals as computed at checkout, unrounded.
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    pub total: Money,

    /// Coupon code redeemed on this order, if any.
    pub coupon_code: Option<String>,
    pub service_type: ServiceType,
    /// Required for delivery orders.
    pub delivery_address: Option<String>,
    pub note: Option<String>,
    pub payment: Payment,

    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    /// Operator who rang up the sale.
    pub staff_name: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Finance Ledger
// =============================================================================

/// An operating cost entry in the finance ledger.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Free-form category ("Supplies", "Rent", "Utilities").
    pub category: String,
    pub description: String,
    pub amount: Money,
}

/// Manual (non-sale) income recorded in the finance ledger.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntry {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert_eq!(rate.as_decimal(), dec!(0.05));
        assert!((rate.percentage() - 5.0).abs() < 0.001);
        assert!(TaxRate::zero().is_zero());
    }

    #[test]
    fn test_status_machine() {
        use SaleStatus::*;

        assert!(Pending.can_transition_to(Processing));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Cancelled));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Processing.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));

        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn test_coupon_discount() {
        let subtotal = Money::from_major_minor(130, 97);

        let percent = Coupon {
            code: "SAVE10".to_string(),
            kind: CouponKind::Percent,
            value: dec!(10),
            label: "10% Off".to_string(),
        };
        assert_eq!(percent.discount_for(subtotal).amount(), dec!(13.097));

        let flat = Coupon {
            code: "MINUS5".to_string(),
            kind: CouponKind::Amount,
            value: dec!(5),
            label: "$5.00 Off".to_string(),
        };
        assert_eq!(flat.discount_for(subtotal), Money::from_major_minor(5, 0));
    }

    #[test]
    fn test_amount_coupon_caps_at_subtotal() {
        let small_order = Money::from_major_minor(3, 50);
        let big_coupon = Coupon {
            code: "MINUS20".to_string(),
            kind: CouponKind::Amount,
            value: dec!(20),
            label: "$20.00 Off".to_string(),
        };
        assert_eq!(big_coupon.discount_for(small_order), small_order);
    }

    #[test]
    fn test_stocking_wire_shape() {
        let simple = Stocking::Simple { stock: 25 };
        let json = serde_json::to_string(&simple).unwrap();
        assert_eq!(json, r#"{"kind":"simple","stock":25}"#);

        let composite = Stocking::Composite {
            recipe: vec![RecipeItem {
                inventory_item_id: "inv_rose_red".to_string(),
                quantity: 12,
            }],
        };
        let json = serde_json::to_string(&composite).unwrap();
        assert!(json.starts_with(r#"{"kind":"composite"#));
        assert!(json.contains(r#""inventoryItemId":"inv_rose_red""#));
    }

    #[test]
    fn test_default_radio_is_first_defined() {
        let product = Product {
            id: "prod_mix".to_string(),
            name: "Seasonal Mix".to_string(),
            price: Money::from_major_minor(65, 0),
            unit: "arrangement".to_string(),
            category: "New".to_string(),
            description: None,
            image: None,
            is_active: true,
            low_stock_threshold: 5,
            options: vec![
                ProductOption {
                    id: "opt_card".to_string(),
                    name: "Greeting Card".to_string(),
                    price: Money::from_major_minor(3, 50),
                    kind: OptionKind::Checkbox,
                },
                ProductOption {
                    id: "opt_standard".to_string(),
                    name: "Standard".to_string(),
                    price: Money::zero(),
                    kind: OptionKind::Radio,
                },
                ProductOption {
                    id: "opt_large".to_string(),
                    name: "Large".to_string(),
                    price: Money::from_major_minor(15, 0),
                    kind: OptionKind::Radio,
                },
            ],
            stocking: Stocking::Simple { stock: 10 },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(product.default_radio().map(|o| o.id.as_str()), Some("opt_standard"));
        assert!(product.find_option("opt_large").is_some());
        assert!(product.find_option("opt_missing").is_none());
    }
}
