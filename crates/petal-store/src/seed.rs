//! # Seed Data
//!
//! Installs the demo flower shop: raw inventory, a catalog of simple and
//! composite products, and the coupon book.
//!
//! ## Dataset Shape
//! - raw materials priced per stem/bunch/meter, some deliberately scarce
//!   so low-stock reporting has something to show
//! - bouquets assembled from recipes (their stock is resolved, not stored)
//! - potted plants tracked as plain stock
//! - add-ons as checkbox options, arrangement sizes as a radio group

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::StoreResult;
use crate::repository::{CouponStore, InventoryStore, ProductStore};
use petal_core::{
    Coupon, CouponKind, InventoryItem, Money, OptionKind, Product, ProductOption, RecipeItem,
    Stocking,
};

/// Raw materials: id, name, stock, unit, unit cost (major, minor).
const INVENTORY: &[(&str, &str, i64, &str, (i64, i64))] = &[
    ("inv_rose_red", "Red Rose", 500, "stem", (1, 50)),
    ("inv_lily_white", "White Lily", 120, "stem", (2, 25)),
    ("inv_tulip_yellow", "Yellow Tulip", 180, "stem", (0, 95)),
    ("inv_babys_breath", "Baby's Breath", 90, "bunch", (3, 0)),
    ("inv_eucalyptus", "Eucalyptus", 75, "bunch", (2, 80)),
    ("inv_ribbon_satin", "Satin Ribbon", 200, "meter", (0, 10)),
    ("inv_vase_glass", "Glass Vase", 40, "piece", (4, 75)),
    ("inv_wrap_kraft", "Kraft Wrap", 150, "sheet", (0, 35)),
];

/// Coupon book: code, kind, value, label.
const COUPONS: &[(&str, CouponKind, i64, &str)] = &[
    ("SAVE10", CouponKind::Percent, 10, "10% Off"),
    ("MINUS5", CouponKind::Amount, 5, "$5.00 Off"),
    ("FLOWERPOWER", CouponKind::Percent, 20, "20% Summer Sale"),
];

/// Inserts the raw material inventory.
pub fn seed_inventory(store: &dyn InventoryStore) -> StoreResult<usize> {
    for (id, name, stock, unit, (major, minor)) in INVENTORY {
        store.insert(InventoryItem {
            id: id.to_string(),
            name: name.to_string(),
            stock: *stock,
            unit: unit.to_string(),
            unit_cost: Money::from_major_minor(*major, *minor),
        })?;
    }
    Ok(INVENTORY.len())
}

/// Inserts the demo catalog.
pub fn seed_products(store: &dyn ProductStore) -> StoreResult<usize> {
    let products = catalog();
    let count = products.len();
    for product in products {
        store.insert(product)?;
    }
    Ok(count)
}

/// Inserts the coupon book.
pub fn seed_coupons(store: &dyn CouponStore) -> StoreResult<usize> {
    for (code, kind, value, label) in COUPONS {
        store.insert(Coupon {
            code: code.to_string(),
            kind: *kind,
            value: Decimal::from(*value),
            label: label.to_string(),
        })?;
    }
    Ok(COUPONS.len())
}

/// Seeds everything and logs what went in.
pub fn seed_all(
    products: &dyn ProductStore,
    inventory: &dyn InventoryStore,
    coupons: &dyn CouponStore,
) -> StoreResult<()> {
    let items = seed_inventory(inventory)?;
    let catalog = seed_products(products)?;
    let codes = seed_coupons(coupons)?;
    info!(items, catalog, codes, "Demo shop seeded");
    Ok(())
}

fn checkbox(id: &str, name: &str, major: i64, minor: i64) -> ProductOption {
    ProductOption {
        id: id.to_string(),
        name: name.to_string(),
        price: Money::from_major_minor(major, minor),
        kind: OptionKind::Checkbox,
    }
}

fn radio(id: &str, name: &str, major: i64) -> ProductOption {
    ProductOption {
        id: id.to_string(),
        name: name.to_string(),
        price: Money::from_major_minor(major, 0),
        kind: OptionKind::Radio,
    }
}

fn component(inventory_item_id: &str, quantity: i64) -> RecipeItem {
    RecipeItem {
        inventory_item_id: inventory_item_id.to_string(),
        quantity,
    }
}

fn catalog() -> Vec<Product> {
    let now = Utc::now();
    let base = |id: &str, name: &str, price: Money, unit: &str, category: &str| Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        unit: unit.to_string(),
        category: category.to_string(),
        description: None,
        image: None,
        is_active: true,
        low_stock_threshold: 5,
        options: vec![],
        stocking: Stocking::Simple { stock: 0 },
        created_at: now,
        updated_at: now,
    };

    vec![
        Product {
            description: Some(
                "Twelve long-stem red roses hand-tied with satin ribbon.".to_string(),
            ),
            options: vec![
                checkbox("opt_gift_wrap", "Gift Wrap", 2, 0),
                checkbox("opt_vase", "Glass Vase", 12, 0),
                checkbox("opt_card", "Greeting Card", 3, 50),
            ],
            stocking: Stocking::Composite {
                recipe: vec![component("inv_rose_red", 12), component("inv_ribbon_satin", 1)],
            },
            ..base(
                "prod_red_roses_dozen",
                "Red Roses Dozen",
                Money::from_major_minor(45, 99),
                "bouquet",
                "Bouquet",
            )
        },
        Product {
            options: vec![checkbox("opt_vase", "Glass Vase", 12, 0)],
            stocking: Stocking::Composite {
                recipe: vec![
                    component("inv_lily_white", 8),
                    component("inv_eucalyptus", 1),
                    component("inv_wrap_kraft", 1),
                ],
            },
            ..base(
                "prod_lily_elegance",
                "White Lily Elegance",
                Money::from_major_minor(38, 99),
                "bouquet",
                "Bouquet",
            )
        },
        Product {
            description: Some("Florist's choice of the week, wrapped in kraft.".to_string()),
            options: vec![
                radio("opt_size_standard", "Standard", 0),
                radio("opt_size_large", "Large", 15),
                radio("opt_size_deluxe", "Deluxe", 25),
            ],
            stocking: Stocking::Composite {
                recipe: vec![
                    component("inv_tulip_yellow", 8),
                    component("inv_lily_white", 4),
                    component("inv_babys_breath", 2),
                    component("inv_wrap_kraft", 1),
                ],
            },
            ..base(
                "prod_seasonal_mix",
                "Seasonal Mix",
                Money::from_major_minor(65, 0),
                "arrangement",
                "Arrangement",
            )
        },
        Product {
            stocking: Stocking::Simple { stock: 30 },
            ..base(
                "prod_tulip_bunch",
                "Tulip Bunch",
                Money::from_major_minor(18, 50),
                "bunch",
                "Bouquet",
            )
        },
        Product {
            stocking: Stocking::Simple { stock: 18 },
            ..base(
                "prod_succulent",
                "Potted Succulent",
                Money::from_major_minor(12, 99),
                "pot",
                "Plant",
            )
        },
        Product {
            stocking: Stocking::Simple { stock: 7 },
            ..base(
                "prod_orchid",
                "Phalaenopsis Orchid",
                Money::from_major_minor(54, 0),
                "pot",
                "Plant",
            )
        },
        Product {
            stocking: Stocking::Simple { stock: 22 },
            ..base(
                "prod_lavender_dried",
                "Dried Lavender Bundle",
                Money::from_major_minor(16, 75),
                "bundle",
                "Dried",
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MemoryCouponStore, MemoryInventoryStore, MemoryProductStore};
    use petal_core::resolve_composite_stock;

    #[test]
    fn test_seed_counts() {
        let products = MemoryProductStore::new();
        let inventory = MemoryInventoryStore::new();
        let coupons = MemoryCouponStore::new();

        seed_all(&products, &inventory, &coupons).unwrap();

        assert_eq!(products.count().unwrap(), 7);
        assert_eq!(inventory.list().unwrap().len(), 8);
        assert_eq!(coupons.list().unwrap().len(), 3);
    }

    #[test]
    fn test_seeded_dozen_resolves_from_roses() {
        let products = MemoryProductStore::new();
        let inventory = MemoryInventoryStore::new();
        seed_products(&products).unwrap();
        seed_inventory(&inventory).unwrap();

        let dozen = products.get("prod_red_roses_dozen").unwrap().unwrap();
        let index = inventory.index().unwrap();

        let recipe = match &dozen.stocking {
            Stocking::Composite { recipe } => recipe.clone(),
            Stocking::Simple { .. } => panic!("dozen should be composite"),
        };
        let resolved = resolve_composite_stock(&recipe, &index);

        // 500 roses / 12 per bouquet caps it at 41
        assert_eq!(resolved.stock, 41);
        assert_eq!(
            resolved.limiting_item.map(|l| l.inventory_item_id),
            Some("inv_rose_red".to_string())
        );
    }

    #[test]
    fn test_seeded_coupons_lookup() {
        let coupons = MemoryCouponStore::new();
        seed_coupons(&coupons).unwrap();

        let save10 = coupons.find("save10").unwrap().unwrap();
        assert_eq!(save10.kind, CouponKind::Percent);
        assert_eq!(save10.value, Decimal::from(10));

        let minus5 = coupons.find("MINUS5").unwrap().unwrap();
        assert_eq!(minus5.kind, CouponKind::Amount);
    }

    #[test]
    fn test_reseeding_rejected() {
        let inventory = MemoryInventoryStore::new();
        seed_inventory(&inventory).unwrap();

        let err = seed_inventory(&inventory).unwrap_err();
        assert!(matches!(err, crate::error::StoreError::UniqueViolation { .. }));
    }
}
