//! # petal-core: Pure Business Logic for Petal POS
//!
//! This crate is the **heart** of Petal POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Petal POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Counter UI / Demo Binary                    │   │
//! │  │    Catalog ──► Cart ──► Coupon ──► Checkout ──► Receipt        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 petal-store (Shop State Layer)                  │   │
//! │  │     repositories, cart register, checkout service, reports     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ petal-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │   stock   │  │   │
//! │  │   │  Product  │  │   Money   │  │  totals   │  │ composite │  │   │
//! │  │   │   Sale    │  │  TaxRate  │  │ breakdown │  │  resolver │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Coupon, Sale, inventory, etc.)
//! - [`money`] - Decimal-backed money with display-time rounding
//! - [`pricing`] - Order totals derivation (subtotal, discount, tax, fee)
//! - [`stock`] - Composite stock resolution from recipes
//! - [`cart`] - Cart lines with merge and quantity rules
//! - [`options`] - Checkbox/radio option selection
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation of user-supplied input
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Exact Money**: Amounts accumulate as unrounded decimals; rounding to
//!    cents happens only at display time
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use petal_core::money::Money;
//! use petal_core::SALES_TAX_RATE;
//!
//! // Create money from dollars and cents (never from floats!)
//! let price = Money::from_major_minor(45, 99); // $45.99
//!
//! // Tax accumulates unrounded at the fixed 5% rate
//! let tax = price.calculate_tax(SALES_TAX_RATE);
//!
//! // Rounding to cents happens when the amount is shown
//! assert_eq!(tax.to_string(), "$2.30");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod options;
pub mod pricing;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use petal_core::Money` instead of
// `use petal_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use options::OptionSelection;
pub use pricing::{price_order, OrderTotals};
pub use stock::{resolve_composite_stock, sellable_stock, CompositeStock};
pub use types::*;
pub use validation::ValidationResult;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied to every order: 5%, expressed in basis points.
///
/// ## Why a constant?
/// The shop operates in a single jurisdiction with one flat rate. Per-product
/// or per-region rates would move this onto `Product` or into configuration;
/// until then a crate constant keeps the pricing path trivially pure.
pub const SALES_TAX_RATE: TaxRate = TaxRate::from_bps(500);

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
