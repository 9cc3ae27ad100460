//! # Error Types
//!
//! Domain-specific error types for petal-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  petal-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  petal-store errors (separate crate)                                   │
//! │  └── StoreError       - Repository operation failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, ids, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message
//!
//! The pricing engine and the stock resolver never return these: they are
//! total functions. Errors surface at the validation boundary and in the
//! store layer, before computation runs.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Coupon code does not match any known coupon.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Sale not found in the ledger.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Cart line not found (stale line id from the UI).
    #[error("Line not in cart: {0}")]
    LineNotFound(String),

    /// Insufficient stock to complete a sale of a simple product.
    ///
    /// ## When This Occurs
    /// - Trying to sell more units than the product has on hand
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Pink Tulips", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 Pink Tulips in stock"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A composite product cannot be built in the requested quantity.
    ///
    /// Carries the limiting inventory component so the UI can say which raw
    /// material ran out, not just that the bouquet did.
    #[error(
        "Cannot build {requested} x {product}: {component} limits stock to {available}"
    )]
    ComponentShortage {
        product: String,
        component: String,
        available: i64,
        requested: i64,
    },

    /// Sale is not in a state that allows the requested transition.
    ///
    /// ## When This Occurs
    /// - Moving a sale backwards (processing → pending)
    /// - Touching a terminal sale (completed or cancelled)
    #[error("Sale {sale_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        sale_id: String,
        from: String,
        to: String,
    },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout was attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash tendered does not cover the order total.
    #[error("Tendered {tendered} does not cover total {required}")]
    PaymentShortfall { required: Money, tendered: Money },

    /// Delivery order placed without a delivery address.
    #[error("Delivery orders require an address")]
    DeliveryAddressRequired,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements. Bad data
/// (negative quantities, dangling inventory references) is rejected at the
/// boundary; it never flows on into wrong-but-non-crashing totals.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive (quantities, recipe amounts).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater (prices, fees, tendered cash).
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// A reference points at an id that does not resolve.
    #[error("{field} references unknown id '{id}'")]
    UnknownReference { field: String, id: String },

    /// More than one radio option was selected for a single product.
    #[error("{field} may include at most one radio option")]
    MultipleRadioOptions { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Pink Tulips".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Pink Tulips: available 3, requested 5"
        );

        let err = CoreError::ComponentShortage {
            product: "Red Roses Dozen".to_string(),
            component: "Red Rose Stem".to_string(),
            available: 2,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "Cannot build 4 x Red Roses Dozen: Red Rose Stem limits stock to 2"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product name".to_string(),
        };
        assert_eq!(err.to_string(), "product name is required");

        let err = ValidationError::UnknownReference {
            field: "recipe".to_string(),
            id: "inv_missing".to_string(),
        };
        assert_eq!(err.to_string(), "recipe references unknown id 'inv_missing'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
