//! # Composite Stock Resolver
//!
//! Derives how many units of a recipe-built product can be assembled from
//! current inventory, and which component runs out first.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            Recipe                      Inventory                        │
//! │                                                                         │
//! │   rose_red    × 12  ──────────►  rose_red:    500  →  ⌊500/12⌋ = 41    │
//! │   ribbon_satin × 1  ──────────►  ribbon_satin: 200  →  ⌊200/1⌋ = 200   │
//! │                                                                         │
//! │                     stock = min(41, 200) = 41                           │
//! │                     limiting item = rose_red                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - each component allows `⌊inventory stock / required quantity⌋` builds
//! - the buildable stock is the minimum across components
//! - the limiting item is the first component (in recipe order) that
//!   reaches the minimum; later components only take over with a strictly
//!   smaller allowance
//! - components with a non-positive quantity or an unknown inventory id
//!   contribute nothing; a recipe where every component is skipped
//!   resolves to zero with no limiting item
//!
//! The resolver never fails. Malformed recipes are rejected upstream by
//! [`crate::validation::validate_recipe`]; here they simply resolve to zero.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{InventoryItem, Product, RecipeItem, Stocking};

// =============================================================================
// Resolution Result
// =============================================================================

/// The component that caps a composite product's buildable stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LimitingItem {
    /// Inventory id of the constraining component.
    pub inventory_item_id: String,
    /// Display name of the constraining component.
    pub name: String,
}

/// Buildable stock for a composite product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompositeStock {
    /// Units that can be assembled from current inventory.
    pub stock: i64,
    /// The component that caps the stock, if any component constrained it.
    pub limiting_item: Option<LimitingItem>,
}

impl CompositeStock {
    /// Resolution for a recipe with no usable components.
    pub fn empty() -> Self {
        CompositeStock {
            stock: 0,
            limiting_item: None,
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves how many units a recipe can build from the given inventory.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use petal_core::money::Money;
/// use petal_core::stock::resolve_composite_stock;
/// use petal_core::types::{InventoryItem, RecipeItem};
///
/// let mut inventory = HashMap::new();
/// inventory.insert(
///     "inv_rose_red".to_string(),
///     InventoryItem {
///         id: "inv_rose_red".to_string(),
///         name: "Red Rose".to_string(),
///         stock: 500,
///         unit: "stem".to_string(),
///         unit_cost: Money::from_major_minor(1, 50),
///     },
/// );
/// let recipe = vec![RecipeItem {
///     inventory_item_id: "inv_rose_red".to_string(),
///     quantity: 12,
/// }];
///
/// let resolved = resolve_composite_stock(&recipe, &inventory);
/// assert_eq!(resolved.stock, 41);
/// ```
pub fn resolve_composite_stock(
    recipe: &[RecipeItem],
    inventory: &HashMap<String, InventoryItem>,
) -> CompositeStock {
    let mut limiting: Option<(i64, &InventoryItem)> = None;

    for component in recipe {
        if component.quantity <= 0 {
            continue;
        }
        let Some(item) = inventory.get(&component.inventory_item_id) else {
            continue;
        };
        // Validation keeps stock non-negative, so this is a floor
        let possible = item.stock / component.quantity;

        match limiting {
            // Strictly smaller only: on a tie the earlier component wins
            Some((current_min, _)) if possible < current_min => {
                limiting = Some((possible, item));
            }
            None => {
                limiting = Some((possible, item));
            }
            _ => {}
        }
    }

    match limiting {
        Some((stock, item)) => CompositeStock {
            stock: stock.max(0),
            limiting_item: Some(LimitingItem {
                inventory_item_id: item.id.clone(),
                name: item.name.clone(),
            }),
        },
        None => CompositeStock::empty(),
    }
}

/// Returns the sellable stock for any product.
///
/// Simple products report their stored count; composite products resolve
/// their recipe against inventory.
pub fn sellable_stock(product: &Product, inventory: &HashMap<String, InventoryItem>) -> i64 {
    match &product.stocking {
        Stocking::Simple { stock } => *stock,
        Stocking::Composite { recipe } => resolve_composite_stock(recipe, inventory).stock,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
