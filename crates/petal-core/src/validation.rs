//! # Validation Module
//!
//! Input validation for Petal POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Boundary                                │
//! │                                                                         │
//! │  Unguarded, bad data degrades quietly instead of crashing:             │
//! │  ├── negative quantities flow into negative line totals                │
//! │  ├── dangling recipe references just don't constrain stock             │
//! │  └── zero-quantity recipe lines get skipped without comment            │
//! │                                                                         │
//! │  So every computation sits behind this boundary:                       │
//! │                                                                         │
//! │  caller input ──► THIS MODULE ──► pricing / stock / checkout           │
//! │                       │                                                 │
//! │                       └── ValidationError (typed, before computation)  │
//! │                                                                         │
//! │  The pure functions behind the boundary stay total; they never see    │
//! │  data that would make them lie.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use petal_core::validation::{validate_quantity, validate_coupon_code};
//!
//! // Validate quantity before a cart operation
//! validate_quantity(5).unwrap();
//!
//! // Codes are normalized to uppercase at the boundary
//! assert_eq!(validate_coupon_code("save10").unwrap(), "SAVE10");
//! ```

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Coupon, CouponKind, InventoryItem, OptionKind, Product, RecipeItem, SelectedOption};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

use rust_decimal::Decimal;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use petal_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Red Roses Dozen").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates and normalizes a coupon code.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 30 characters
/// - Codes are matched case-insensitively, so the boundary uppercases them
///
/// ## Returns
/// The trimmed, uppercased code.
///
/// ## Example
/// ```rust
/// use petal_core::validation::validate_coupon_code;
///
/// assert_eq!(validate_coupon_code("flowerpower").unwrap(), "FLOWERPOWER");
/// assert!(validate_coupon_code("  ").is_err());
/// ```
pub fn validate_coupon_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: 30,
        });
    }

    Ok(code.to_uppercase())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Line                                                         │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_line                                   │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price or option price delta.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free add-ons, "Standard" radio variants)
///
/// ## Example
/// ```rust
/// use petal_core::money::Money;
/// use petal_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_major_minor(45, 99)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_major_minor(-1, 0)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a delivery fee.
///
/// ## Rules
/// - Must be non-negative; zero means free delivery
pub fn validate_delivery_fee(fee: Money) -> ValidationResult<()> {
    if fee.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "delivery fee".to_string(),
        });
    }

    Ok(())
}

/// Validates a tendered cash amount.
///
/// ## Rules
/// - Must be non-negative; whether it covers the total is checked later,
///   against the computed order total
pub fn validate_tendered(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "tendered amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a coupon definition.
///
/// ## Rules
/// - Value must be non-negative
/// - A percent coupon must not exceed 100%
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    if coupon.value < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "coupon value".to_string(),
        });
    }

    if coupon.kind == CouponKind::Percent && coupon.value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "coupon value".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of lines).
///
/// ## Rules
/// - Must not exceed MAX_CART_LINES (100)
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

/// Validates a composite product's recipe against the inventory index.
///
/// ## Rules
/// - Recipe must not be empty (an empty recipe means the product should be
///   simple, not composite)
/// - Every item quantity must be positive
/// - Every inventory reference must resolve
///
/// The stock resolver itself tolerates bad recipes by skipping entries;
/// this check runs first so stored recipes never contain any.
pub fn validate_recipe(
    recipe: &[RecipeItem],
    inventory: &HashMap<String, InventoryItem>,
) -> ValidationResult<()> {
    if recipe.is_empty() {
        return Err(ValidationError::Required {
            field: "recipe".to_string(),
        });
    }

    for item in recipe {
        if item.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "recipe quantity".to_string(),
            });
        }

        if !inventory.contains_key(&item.inventory_item_id) {
            return Err(ValidationError::UnknownReference {
                field: "recipe".to_string(),
                id: item.inventory_item_id.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a line's selected options against the product that defines them.
///
/// ## Rules
/// - Every selection must reference an option defined on the product
/// - At most one radio option may be selected
pub fn validate_selected_options(
    product: &Product,
    selections: &[SelectedOption],
) -> ValidationResult<()> {
    let mut radio_count = 0;

    for selection in selections {
        match product.find_option(&selection.option_id) {
            Some(option) => {
                if option.kind == OptionKind::Radio {
                    radio_count += 1;
                }
            }
            None => {
                return Err(ValidationError::UnknownReference {
                    field: "options".to_string(),
                    id: selection.option_id.clone(),
                });
            }
        }
    }

    if radio_count > 1 {
        return Err(ValidationError::MultipleRadioOptions {
            field: "options".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductOption, Stocking};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn inventory_index(entries: &[(&str, i64)]) -> HashMap<String, InventoryItem> {
        entries
            .iter()
            .map(|(id, stock)| {
                (
                    id.to_string(),
                    InventoryItem {
                        id: id.to_string(),
                        name: id.to_string(),
                        stock: *stock,
                        unit: "stem".to_string(),
                        unit_cost: Money::from_major_minor(1, 50),
                    },
                )
            })
            .collect()
    }

    fn product_with_options(options: Vec<ProductOption>) -> Product {
        Product {
            id: "prod_roses".to_string(),
            name: "Red Roses Dozen".to_string(),
            price: Money::from_major_minor(45, 99),
            unit: "bouquet".to_string(),
            category: "Rose".to_string(),
            description: None,
            image: None,
            is_active: true,
            low_stock_threshold: 5,
            options,
            stocking: Stocking::Simple { stock: 10 },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Red Roses Dozen").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_coupon_code_normalizes() {
        assert_eq!(validate_coupon_code("save10").unwrap(), "SAVE10");
        assert_eq!(validate_coupon_code(" Minus5 ").unwrap(), "MINUS5");
        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code(&"X".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_major_minor(45, 99)).is_ok());
        assert!(validate_price(Money::from_major_minor(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_coupon() {
        let ok = Coupon {
            code: "SAVE10".to_string(),
            kind: CouponKind::Percent,
            value: dec!(10),
            label: "10% Off".to_string(),
        };
        assert!(validate_coupon(&ok).is_ok());

        let over = Coupon {
            value: dec!(120),
            ..ok.clone()
        };
        assert!(validate_coupon(&over).is_err());

        let negative = Coupon {
            kind: CouponKind::Amount,
            value: dec!(-5),
            ..ok
        };
        assert!(validate_coupon(&negative).is_err());
    }

    #[test]
    fn test_validate_recipe() {
        let inventory = inventory_index(&[("inv_rose_red", 500), ("inv_ribbon", 200)]);

        let good = vec![
            RecipeItem {
                inventory_item_id: "inv_rose_red".to_string(),
                quantity: 12,
            },
            RecipeItem {
                inventory_item_id: "inv_ribbon".to_string(),
                quantity: 1,
            },
        ];
        assert!(validate_recipe(&good, &inventory).is_ok());

        let empty: Vec<RecipeItem> = vec![];
        assert!(validate_recipe(&empty, &inventory).is_err());

        let zero_qty = vec![RecipeItem {
            inventory_item_id: "inv_rose_red".to_string(),
            quantity: 0,
        }];
        assert!(matches!(
            validate_recipe(&zero_qty, &inventory),
            Err(ValidationError::MustBePositive { .. })
        ));

        let dangling = vec![RecipeItem {
            inventory_item_id: "inv_missing".to_string(),
            quantity: 1,
        }];
        assert!(matches!(
            validate_recipe(&dangling, &inventory),
            Err(ValidationError::UnknownReference { .. })
        ));
    }

    #[test]
    fn test_validate_selected_options() {
        let ribbon = ProductOption {
            id: "opt_ribbon".to_string(),
            name: "Premium Ribbon".to_string(),
            price: Money::from_major_minor(2, 0),
            kind: OptionKind::Checkbox,
        };
        let standard = ProductOption {
            id: "opt_standard".to_string(),
            name: "Standard".to_string(),
            price: Money::zero(),
            kind: OptionKind::Radio,
        };
        let large = ProductOption {
            id: "opt_large".to_string(),
            name: "Large".to_string(),
            price: Money::from_major_minor(15, 0),
            kind: OptionKind::Radio,
        };
        let product =
            product_with_options(vec![ribbon.clone(), standard.clone(), large.clone()]);

        let ok = vec![
            SelectedOption::from_option(&ribbon),
            SelectedOption::from_option(&large),
        ];
        assert!(validate_selected_options(&product, &ok).is_ok());

        let unknown = vec![SelectedOption {
            option_id: "opt_missing".to_string(),
            name: "Ghost".to_string(),
            price: Money::zero(),
        }];
        assert!(matches!(
            validate_selected_options(&product, &unknown),
            Err(ValidationError::UnknownReference { .. })
        ));

        let two_radios = vec![
            SelectedOption::from_option(&standard),
            SelectedOption::from_option(&large),
        ];
        assert!(matches!(
            validate_selected_options(&product, &two_radios),
            Err(ValidationError::MultipleRadioOptions { .. })
        ));
    }
}
