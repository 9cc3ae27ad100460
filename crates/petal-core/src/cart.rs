//! # Cart
//!
//! The in-progress order: an ordered list of cart lines.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  POS Action               Operation               Cart Change           │
//! │  ──────────               ─────────               ───────────           │
//! │                                                                         │
//! │  Click Product ──────────► add_line() ──────────► merge or push        │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ───► lines[i].qty = n     │
//! │                                                    (n <= 0 removes)     │
//! │  Click Remove ───────────► remove_line() ───────► lines.remove(i)      │
//! │                                                                         │
//! │  Click Clear ────────────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  Checkout ───────────────► price_order(&cart.lines, ...) (pricing.rs)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Merge Rule
//! Adding a product merges into an existing line only when BOTH the product
//! id and the selected option set match (order-insensitive). "Red Roses
//! Dozen with vase" and "Red Roses Dozen without vase" are different lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, SelectedOption};
use crate::validation::validate_quantity;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One entry in an in-progress order.
///
/// ## Design Notes
/// - `line_id`: unique per line; quantity updates and removals address
///   lines, not products, because one product can appear on several lines
///   with different options
/// - name and base price are frozen copies taken at add time, so a catalog
///   edit never changes what the customer already has in the cart
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Unique line identifier (UUID v4).
    pub line_id: String,

    /// Product this line refers to.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Base price at time of adding (frozen, before options).
    pub base_price: Money,

    /// Option snapshots chosen for this line.
    pub options: Vec<SelectedOption>,

    /// Quantity in cart (always positive).
    pub quantity: i64,

    /// When this line was added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a product, quantity, and option choices.
    ///
    /// ## Price Freezing
    /// Base price and option prices are captured at this moment. If the
    /// catalog changes afterwards, this line retains the original prices.
    pub fn from_product(product: &Product, quantity: i64, options: Vec<SelectedOption>) -> Self {
        CartLine {
            line_id: format!("line_{}", Uuid::new_v4()),
            product_id: product.id.clone(),
            name: product.name.clone(),
            base_price: product.price,
            options,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Unit price: base price + sum of selected option prices.
    pub fn unit_price(&self) -> Money {
        self.options
            .iter()
            .fold(self.base_price, |acc, o| acc + o.price)
    }

    /// Line contribution: unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Checks whether this line carries exactly the given option set,
    /// ignoring order.
    fn has_same_options(&self, options: &[SelectedOption]) -> bool {
        if self.options.len() != options.len() {
            return false;
        }
        let mut mine: Vec<&str> = self.options.iter().map(|o| o.option_id.as_str()).collect();
        let mut theirs: Vec<&str> = options.iter().map(|o| o.option_id.as_str()).collect();
        mine.sort_unstable();
        theirs.sort_unstable();
        mine == theirs
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress order.
///
/// ## Invariants
/// - Lines are unique by (product id, option set); adding the same
///   combination again increases quantity instead
/// - Line quantity is always positive (an update to <= 0 removes the line)
/// - Maximum lines: 100; maximum quantity per line: 999
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, in the order they were added.
    pub lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, merging with an existing line when the
    /// product and option set both match.
    pub fn add_line(
        &mut self,
        product: &Product,
        quantity: i64,
        options: Vec<SelectedOption>,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;

        // Merge when the same product/options combination is already present
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id && l.has_same_options(&options))
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines
            .push(CartLine::from_product(product, quantity, options));
        Ok(())
    }

    /// Updates the quantity of a line.
    ///
    /// ## Behavior
    /// - quantity <= 0 removes the line
    /// - unknown line id is an error
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_line(line_id);
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        match self.lines.iter_mut().find(|l| l.line_id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::LineNotFound(line_id.to_string())),
        }
    }

    /// Removes a line from the cart.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.line_id != line_id);

        if self.lines.len() == initial_len {
            Err(CoreError::LineNotFound(line_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line contributions, before discount/tax/fees.
    ///
    /// The full breakdown (discount, tax, delivery fee, total) comes from
    /// the pricing engine, which also needs the coupon and service type.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionKind, ProductOption, Stocking};

    fn test_product(id: &str, major: i64, minor: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_major_minor(major, minor),
            unit: "bouquet".to_string(),
            category: "Rose".to_string(),
            description: None,
            image: None,
            is_active: true,
            low_stock_threshold: 5,
            options: vec![ProductOption {
                id: "opt_vase".to_string(),
                name: "Glass Vase".to_string(),
                price: Money::from_major_minor(12, 0),
                kind: OptionKind::Checkbox,
            }],
            stocking: Stocking::Simple { stock: 50 },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn vase_selection(product: &Product) -> Vec<SelectedOption> {
        vec![SelectedOption::from_option(&product.options[0])]
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        let product = test_product("p1", 45, 99);

        cart.add_line(&product, 2, vec![]).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), Money::from_major_minor(91, 98));
    }

    #[test]
    fn test_add_same_product_same_options_merges() {
        let mut cart = Cart::new();
        let product = test_product("p1", 45, 99);

        cart.add_line(&product, 2, vec![]).unwrap();
        cart.add_line(&product, 3, vec![]).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_add_same_product_different_options_is_new_line() {
        let mut cart = Cart::new();
        let product = test_product("p1", 45, 99);

        cart.add_line(&product, 1, vec![]).unwrap();
        cart.add_line(&product, 1, vase_selection(&product)).unwrap();

        assert_eq!(cart.line_count(), 2);
        // $45.99 + ($45.99 + $12.00)
        assert_eq!(cart.subtotal(), Money::from_major_minor(103, 98));
    }

    #[test]
    fn test_option_price_in_line_total() {
        let mut cart = Cart::new();
        let product = test_product("p1", 45, 99);

        cart.add_line(&product, 2, vase_selection(&product)).unwrap();

        let line = &cart.lines[0];
        assert_eq!(line.unit_price(), Money::from_major_minor(57, 99));
        assert_eq!(line.line_total(), Money::from_major_minor(115, 98));
    }

    #[test]
    fn test_update_quantity_and_remove() {
        let mut cart = Cart::new();
        let product = test_product("p1", 10, 0);

        cart.add_line(&product, 2, vec![]).unwrap();
        let line_id = cart.lines[0].line_id.clone();

        cart.update_quantity(&line_id, 7).unwrap();
        assert_eq!(cart.total_quantity(), 7);

        // Zero or below removes the line
        cart.update_quantity(&line_id, 0).unwrap();
        assert!(cart.is_empty());

        assert!(matches!(
            cart.update_quantity(&line_id, 1),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_quantity_caps() {
        let mut cart = Cart::new();
        let product = test_product("p1", 10, 0);

        assert!(cart.add_line(&product, 0, vec![]).is_err());
        assert!(cart.add_line(&product, 1000, vec![]).is_err());

        cart.add_line(&product, 998, vec![]).unwrap();
        assert!(matches!(
            cart.add_line(&product, 2, vec![]),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        let product = test_product("p1", 10, 0);

        cart.add_line(&product, 2, vec![]).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }
}
