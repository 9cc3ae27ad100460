//! # Order Pricing Engine
//!
//! Deterministic derivation of order totals from cart lines, an optional
//! coupon, the service type, and the delivery fee.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Pricing                                        │
//! │                                                                         │
//! │  lines ────────► subtotal = Σ (base + options) × qty                   │
//! │                      │                                                  │
//! │  coupon ───────► discount = percent: subtotal × value / 100            │
//! │                             amount:  min(value, subtotal)              │
//! │                      │                                                  │
//! │                  tax = (subtotal − discount) × 5%                      │
//! │                      │                                                  │
//! │  service type ─► fee = delivery ? delivery_fee : 0                     │
//! │                      │                                                  │
//! │                  total = max(0, subtotal − discount + tax + fee)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order of steps is fixed: the discount applies to the subtotal, tax
//! applies to the discounted amount, and the delivery fee is added untaxed.
//!
//! ## Purity
//! `price_order` is a total function over value objects: no I/O, no hidden
//! state, no failure path. Input validation happens at the boundary before
//! this module is reached; amounts accumulate unrounded and are rounded to
//! cents only when displayed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::money::Money;
use crate::types::{Coupon, ServiceType};
use crate::SALES_TAX_RATE;

// =============================================================================
// Order Totals
// =============================================================================

/// The full totals breakdown for an order.
///
/// Every field is non-negative. Amounts are exact (unrounded); use
/// [`OrderTotals::rounded`] for receipt display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Sum of line contributions before any adjustment.
    pub subtotal: Money,
    /// Coupon discount applied to the subtotal.
    pub discount: Money,
    /// Tax on (subtotal − discount) at the fixed 5% rate.
    pub tax: Money,
    /// Effective delivery fee: zero for pickup orders.
    pub delivery_fee: Money,
    /// Grand total, floored at zero.
    pub total: Money,
}

impl OrderTotals {
    /// Totals for an empty order.
    pub fn zero() -> Self {
        OrderTotals {
            subtotal: Money::zero(),
            discount: Money::zero(),
            tax: Money::zero(),
            delivery_fee: Money::zero(),
            total: Money::zero(),
        }
    }

    /// Returns a copy with every field rounded to cents for display.
    pub fn rounded(&self) -> Self {
        OrderTotals {
            subtotal: self.subtotal.rounded(),
            discount: self.discount.rounded(),
            tax: self.tax.rounded(),
            delivery_fee: self.delivery_fee.rounded(),
            total: self.total.rounded(),
        }
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Computes the totals breakdown for an order.
///
/// ## Arguments
/// * `lines` - cart lines (may be empty; checkout rejects empty carts
///   separately, the math itself is defined for them)
/// * `coupon` - optional discount rule, already resolved by code
/// * `service_type` - pickup forces the effective delivery fee to zero
/// * `delivery_fee` - caller-supplied fee, only meaningful for delivery
///
/// ## Guarantees
/// - every returned field is >= 0
/// - never fails, performs no I/O, reads no hidden state
/// - identical inputs produce identical results
///
/// ## Example
/// ```rust
/// use petal_core::money::Money;
/// use petal_core::pricing::price_order;
/// use petal_core::types::ServiceType;
///
/// let totals = price_order(&[], None, ServiceType::Pickup, Money::zero());
/// assert_eq!(totals.total, Money::zero());
/// ```
pub fn price_order(
    lines: &[CartLine],
    coupon: Option<&Coupon>,
    service_type: ServiceType,
    delivery_fee: Money,
) -> OrderTotals {
    // Step 1: subtotal over line contributions
    let subtotal: Money = lines.iter().map(|l| l.line_total()).sum();

    // Step 2: coupon discount (percent of subtotal, or flat capped at it)
    let discount = coupon
        .map(|c| c.discount_for(subtotal))
        .unwrap_or_default();

    // Step 3: tax on the discounted amount, fixed 5% rate, unrounded
    let taxable = subtotal - discount;
    let tax = taxable.calculate_tax(SALES_TAX_RATE);

    // Step 4: delivery fee only applies to delivery orders
    let effective_fee = match service_type {
        ServiceType::Delivery => delivery_fee,
        ServiceType::Pickup => Money::zero(),
    };

    // Step 5: grand total, floored at zero
    let total = (taxable + tax + effective_fee).max(Money::zero());

    OrderTotals {
        subtotal,
        discount,
        tax,
        delivery_fee: effective_fee,
        total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
