//! # Option Selection
//!
//! Builds the `SelectedOption` list for a cart line from a product's
//! option definitions.
//!
//! ## Selection Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Customization                                │
//! │                                                                         │
//! │  ☑ Premium Ribbon        +$2.00     checkbox: toggles on/off           │
//! │  ☐ Glass Vase            +$12.00    checkbox: toggles on/off           │
//! │                                                                         │
//! │  ◉ Standard              +$0.00     radio: exactly one selected;       │
//! │  ○ Large                 +$15.00    picking another replaces it        │
//! │  ○ Deluxe                +$25.00                                       │
//! │                                                                         │
//! │  Unit price = base price + sum of selected option prices               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! When a product defines radio options, the first one in definition order
//! starts selected. Selections snapshot id/name/price immediately, so a
//! later edit to the product cannot change what a cart line already holds.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{OptionKind, Product, SelectedOption};
use crate::validation::ValidationResult;

/// In-progress option choices for one product, prior to add-to-cart.
///
/// Maintains the radio invariant by construction: toggling a radio option
/// removes any other radio selection first.
#[derive(Debug, Clone, Default)]
pub struct OptionSelection {
    selected: Vec<SelectedOption>,
}

impl OptionSelection {
    /// Starts an empty selection.
    pub fn new() -> Self {
        OptionSelection::default()
    }

    /// Starts with the product's default selection: the first radio option
    /// in definition order, when the product has a radio group.
    pub fn defaults_for(product: &Product) -> Self {
        let selected = product
            .default_radio()
            .map(|o| vec![SelectedOption::from_option(o)])
            .unwrap_or_default();
        OptionSelection { selected }
    }

    /// Toggles the option with the given id.
    ///
    /// ## Behavior
    /// - checkbox: selected ⇒ deselected, deselected ⇒ selected
    /// - radio: becomes the selected radio, replacing any other
    /// - unknown id: rejected
    pub fn toggle(&mut self, product: &Product, option_id: &str) -> ValidationResult<()> {
        let option = product.find_option(option_id).ok_or_else(|| {
            ValidationError::UnknownReference {
                field: "options".to_string(),
                id: option_id.to_string(),
            }
        })?;

        match option.kind {
            OptionKind::Checkbox => {
                if let Some(pos) = self.selected.iter().position(|s| s.option_id == option.id) {
                    self.selected.remove(pos);
                } else {
                    self.selected.push(SelectedOption::from_option(option));
                }
            }
            OptionKind::Radio => {
                // Drop any currently selected radio, then select this one
                self.selected.retain(|s| {
                    product
                        .find_option(&s.option_id)
                        .map(|o| o.kind != OptionKind::Radio)
                        .unwrap_or(true)
                });
                self.selected.push(SelectedOption::from_option(option));
            }
        }

        Ok(())
    }

    /// Checks whether an option id is currently selected.
    pub fn is_selected(&self, option_id: &str) -> bool {
        self.selected.iter().any(|s| s.option_id == option_id)
    }

    /// Unit price preview: base price + selected option prices.
    pub fn unit_price(&self, product: &Product) -> Money {
        self.selected
            .iter()
            .fold(product.price, |acc, s| acc + s.price)
    }

    /// Returns the current selections.
    pub fn selections(&self) -> &[SelectedOption] {
        &self.selected
    }

    /// Consumes the builder, yielding the selections for a cart line.
    pub fn into_selections(self) -> Vec<SelectedOption> {
        self.selected
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductOption, Stocking};
    use chrono::Utc;

    fn customizable_product() -> Product {
        Product {
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
                    id: "opt_ribbon".to_string(),
                    name: "Premium Ribbon".to_string(),
                    price: Money::from_major_minor(2, 0),
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
        }
    }

    #[test]
    fn test_defaults_select_first_radio() {
        let product = customizable_product();
        let selection = OptionSelection::defaults_for(&product);

        assert!(selection.is_selected("opt_standard"));
        assert!(!selection.is_selected("opt_large"));
        assert_eq!(selection.unit_price(&product), Money::from_major_minor(65, 0));
    }

    #[test]
    fn test_checkbox_toggles() {
        let product = customizable_product();
        let mut selection = OptionSelection::new();

        selection.toggle(&product, "opt_ribbon").unwrap();
        assert!(selection.is_selected("opt_ribbon"));
        assert_eq!(selection.unit_price(&product), Money::from_major_minor(67, 0));

        selection.toggle(&product, "opt_ribbon").unwrap();
        assert!(!selection.is_selected("opt_ribbon"));
        assert_eq!(selection.unit_price(&product), Money::from_major_minor(65, 0));
    }

    #[test]
    fn test_radio_replaces_radio() {
        let product = customizable_product();
        let mut selection = OptionSelection::defaults_for(&product);

        selection.toggle(&product, "opt_large").unwrap();
        assert!(selection.is_selected("opt_large"));
        assert!(!selection.is_selected("opt_standard"));
        assert_eq!(selection.unit_price(&product), Money::from_major_minor(80, 0));

        // Checkbox selection survives a radio swap
        selection.toggle(&product, "opt_ribbon").unwrap();
        selection.toggle(&product, "opt_standard").unwrap();
        assert!(selection.is_selected("opt_ribbon"));
        assert!(selection.is_selected("opt_standard"));
        assert!(!selection.is_selected("opt_large"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let product = customizable_product();
        let mut selection = OptionSelection::new();

        assert!(selection.toggle(&product, "opt_missing").is_err());
    }

    #[test]
    fn test_selection_snapshots_price() {
        let product = customizable_product();
        let mut selection = OptionSelection::new();
        selection.toggle(&product, "opt_large").unwrap();

        let snapshots = selection.into_selections();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].name, "Large");
        assert_eq!(snapshots[0].price, Money::from_major_minor(15, 0));
    }
}
