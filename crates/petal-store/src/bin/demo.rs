//! # Counter Demo
//!
//! Walks one shift at the counter: seed the shop, ring up a sample order,
//! check out, print the receipt, and close with the day's reports.
//!
//! ## Usage
//! ```bash
//! # Run the default walkthrough (SAVE10 coupon, staff Maya)
//! cargo run -p petal-store --bin demo
//!
//! # Redeem a different coupon, or none
//! cargo run -p petal-store --bin demo -- --coupon FLOWERPOWER
//! cargo run -p petal-store --bin demo -- --coupon none
//!
//! # Credit a different operator
//! cargo run -p petal-store --bin demo -- --staff Theo
//! ```
//!
//! ## What It Walks Through
//! - seeds inventory, catalog, and the coupon book
//! - lists the catalog with resolved sellable stock
//! - rings up 2x Red Roses Dozen + 1x White Lily Elegance
//! - checks out as pickup, cash $140.00, and completes the sale
//! - places a second order: Seasonal Mix sized Large, delivered, paid by card
//! - prints sales, inventory, and profit summaries

use std::env;
use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use petal_core::{
    sellable_stock, ExpenseEntry, IncomeEntry, Money, OptionSelection, PaymentMethod, SaleStatus,
    ServiceType,
};
use petal_store::repository::{
    CouponStore, FinanceStore, InventoryStore, MemoryCouponStore, MemoryFinanceStore,
    MemoryInventoryStore, MemoryProductStore, MemorySaleStore, ProductStore,
};
use petal_store::{
    inventory_kpis, profit_summary, sales_summary, seed, staff_performance, CartRegister,
    CartSummary, CheckoutRequest, CheckoutService, Receipt, ShopConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut coupon = String::from("SAVE10");
    let mut staff = String::from("Maya");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--coupon" | "-c" => {
                if i + 1 < args.len() {
                    coupon = args[i + 1].clone();
                    i += 1;
                }
            }
            "--staff" | "-s" => {
                if i + 1 < args.len() {
                    staff = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Petal POS Counter Demo");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --coupon <CODE>  Coupon to redeem, or 'none' (default: SAVE10)");
                println!("  -s, --staff <NAME>   Operator on the register (default: Maya)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing();

    println!("🌸 Petal POS Counter Demo");
    println!("=========================");
    println!();

    let config = ShopConfig::from_env();

    // Wire up the in-memory shop
    let products = Arc::new(MemoryProductStore::new());
    let inventory = Arc::new(MemoryInventoryStore::new());
    let coupons = Arc::new(MemoryCouponStore::new());
    let sales = Arc::new(MemorySaleStore::new());
    let finance = Arc::new(MemoryFinanceStore::new());

    seed::seed_all(products.as_ref(), inventory.as_ref(), coupons.as_ref())?;
    println!("✓ Shop seeded");
    println!("  Products:  {}", products.count()?);
    println!("  Inventory: {} raw materials", inventory.list()?.len());
    println!("  Coupons:   {}", coupons.list()?.len());
    println!();

    // Catalog with resolved stock
    println!("Catalog:");
    let index = inventory.index()?;
    for product in products.list_active()? {
        println!(
            "  {:<24} {:>8}   stock {}",
            product.name,
            config.format_money(product.price),
            sellable_stock(&product, &index)
        );
    }
    println!();

    // Ring up the sample order
    let register = CartRegister::new();
    let dozen = products
        .get("prod_red_roses_dozen")?
        .ok_or("demo catalog is missing the dozen")?;
    let lily = products
        .get("prod_lily_elegance")?
        .ok_or("demo catalog is missing the lilies")?;

    register.with_cart_mut(|cart| cart.add_line(&dozen, 2, vec![]))?;
    register.with_cart_mut(|cart| cart.add_line(&lily, 1, vec![]))?;

    let summary = register.with_cart(|cart| CartSummary::from(cart));
    println!(
        "🛒 Cart: {} lines, {} items, subtotal {}",
        summary.line_count,
        summary.total_quantity,
        config.format_money(summary.subtotal)
    );
    println!();

    // Check out: pickup, cash $140.00 (covers the total with or without a coupon)
    let service = CheckoutService::new(
        products.clone(),
        inventory.clone(),
        coupons.clone(),
        sales.clone(),
        config.clone(),
    );

    let mut request = CheckoutRequest::pickup_cash(Money::from_major_minor(140, 0));
    request.staff_name = Some(staff.clone());
    if !coupon.eq_ignore_ascii_case("none") {
        request.coupon_code = Some(coupon);
    }

    let sale = service.place_order(&register, request)?;
    println!(
        "✓ Order {} placed: {} due, {} change",
        sale.receipt_number,
        config.format_money(sale.total.rounded()),
        config.format_money(sale.payment.change)
    );
    println!();

    let receipt = Receipt::from_sale(&sale, &config);
    println!("{}", receipt.render(&config));

    // Move the order through its lifecycle
    service.advance_status(&sale.id, SaleStatus::Processing)?;
    service.advance_status(&sale.id, SaleStatus::Completed)?;
    println!("✓ Order completed");
    println!();

    // Second order: a customized arrangement, delivered, paid by card
    let mix = products
        .get("prod_seasonal_mix")?
        .ok_or("demo catalog is missing the seasonal mix")?;
    let mut sizing = OptionSelection::defaults_for(&mix);
    sizing.toggle(&mix, "opt_size_large")?;
    let selections = sizing.into_selections();
    register.with_cart_mut(|cart| cart.add_line(&mix, 1, selections))?;

    let mut delivery_request = CheckoutRequest::pickup_cash(Money::zero());
    delivery_request.service_type = ServiceType::Delivery;
    delivery_request.delivery_address = Some("22 Meadow Road, Bloomfield".to_string());
    delivery_request.payment_method = PaymentMethod::CreditCard;
    delivery_request.tendered = None;
    delivery_request.note = Some("Ring the side bell".to_string());
    delivery_request.staff_name = Some(staff);

    let delivery_sale = service.place_order(&register, delivery_request)?;
    println!(
        "✓ Order {} out for delivery: {} settled by card",
        delivery_sale.receipt_number,
        config.format_money(delivery_sale.total)
    );
    service.advance_status(&delivery_sale.id, SaleStatus::Processing)?;
    println!();

    // A couple of ledger entries so the profit report has both sides
    let today = Utc::now().date_naive();
    finance.record_expense(ExpenseEntry {
        id: "exp_wholesale".to_string(),
        date: today,
        category: "Flowers".to_string(),
        description: "Wholesale market run".to_string(),
        amount: Money::from_major_minor(120, 0),
    })?;
    finance.record_income(IncomeEntry {
        id: "inc_deposit".to_string(),
        date: today,
        description: "Wedding consultation deposit".to_string(),
        amount: Money::from_major_minor(250, 0),
    })?;

    // Close of day
    let day_sales = sales_summary(sales.as_ref(), today, today)?;
    println!("📈 Sales today");
    println!("  Orders:  {}", day_sales.transactions);
    println!("  Revenue: {}", config.format_money(day_sales.revenue));
    println!(
        "  Average: {}",
        config.format_money(day_sales.average_order_value)
    );

    let staff_report = staff_performance(sales.as_ref(), today, today)?;
    if let Some(top) = &staff_report.top_performer {
        println!("  Top seller: {}", top);
    }
    println!();

    let kpis = inventory_kpis(inventory.as_ref(), config.low_stock_threshold)?;
    println!("📦 Inventory");
    println!("  Low stock:    {}", kpis.low_stock);
    println!("  Out of stock: {}", kpis.out_of_stock);
    println!(
        "  Valuation:    {}",
        config.format_money(kpis.total_valuation)
    );
    println!();

    let profit = profit_summary(sales.as_ref(), finance.as_ref(), today, today)?;
    println!("💰 Profit today");
    println!("  Sales revenue: {}", config.format_money(profit.sales_revenue));
    println!("  Other income:  {}", config.format_money(profit.manual_income));
    println!("  Expenses:      {}", config.format_money(profit.expenses));
    println!("  Net:           {}", config.format_money(profit.net));
    println!();

    println!("✓ Demo complete!");

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to info with debug for the petal crates.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,petal_core=debug,petal_store=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
