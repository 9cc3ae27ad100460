//! # Checkout Service
//!
//! Turns the active cart into a priced, paid, stock-consuming sale.
//!
//! ## Order Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order Pipeline                                 │
//! │                                                                         │
//! │  cart snapshot ──► must not be empty                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  coupon code ────► normalized, looked up in the coupon book            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  every line ─────► product exists + active, quantity and options valid │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  availability ───► simple: stored stock, composite: resolver           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pricing ────────► subtotal / discount / tax / fee / total             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  payment ────────► cash needs tendered ≥ total, cards settle exactly   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  consume stock ──► simple decrements, composite eats raw inventory     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sale inserted (pending) ──► cart cleared ──► Sale returned            │
//! │                                                                         │
//! │  Any failure before "consume stock" leaves the shop untouched.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ShopConfig;
use crate::error::StoreResult;
use crate::register::CartRegister;
use crate::repository::{AdjustKind, CouponStore, InventoryStore, ProductStore, SaleStore};
use petal_core::{
    price_order, resolve_composite_stock, validation, CoreError, Money, OrderTotals, Payment,
    PaymentMethod, Product, Sale, SaleLine, SaleStatus, SelectedOption, ServiceType, Stocking,
    ValidationError,
};

// =============================================================================
// Checkout Request
// =============================================================================

/// Everything the counter collects before the checkout button.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub service_type: ServiceType,
    /// Fee for delivery orders; `None` falls back to the configured default.
    pub delivery_fee: Option<Money>,
    pub delivery_address: Option<String>,
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
    /// Cash handed over; required for cash payments, ignored otherwise.
    pub tendered: Option<Money>,
    pub note: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub staff_name: Option<String>,
}

impl CheckoutRequest {
    /// A pickup order paid in cash, the counter's common case.
    pub fn pickup_cash(tendered: Money) -> Self {
        CheckoutRequest {
            service_type: ServiceType::Pickup,
            delivery_fee: None,
            delivery_address: None,
            coupon_code: None,
            payment_method: PaymentMethod::Cash,
            tendered: Some(tendered),
            note: None,
            customer_name: None,
            customer_phone: None,
            staff_name: None,
        }
    }
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Orchestrates order placement over the shop's stores.
pub struct CheckoutService {
    products: Arc<dyn ProductStore>,
    inventory: Arc<dyn InventoryStore>,
    coupons: Arc<dyn CouponStore>,
    sales: Arc<dyn SaleStore>,
    config: ShopConfig,
}

impl CheckoutService {
    /// Wires the service to its stores.
    pub fn new(
        products: Arc<dyn ProductStore>,
        inventory: Arc<dyn InventoryStore>,
        coupons: Arc<dyn CouponStore>,
        sales: Arc<dyn SaleStore>,
        config: ShopConfig,
    ) -> Self {
        CheckoutService {
            products,
            inventory,
            coupons,
            sales,
            config,
        }
    }

    /// Places an order from the register's current cart.
    ///
    /// On success the sale is in the ledger with status `pending`, stock has
    /// been consumed, and the cart is empty. On failure the shop state is
    /// untouched and the cart keeps its lines.
    pub fn place_order(
        &self,
        register: &CartRegister,
        request: CheckoutRequest,
    ) -> StoreResult<Sale> {
        let cart = register.snapshot();
        debug!(lines = cart.line_count(), "Placing order");

        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        // Resolve the coupon before touching anything else
        let coupon = match &request.coupon_code {
            Some(code) => {
                let normalized =
                    validation::validate_coupon_code(code).map_err(CoreError::from)?;
                let coupon = self
                    .coupons
                    .find(&normalized)?
                    .ok_or(CoreError::CouponNotFound(normalized))?;
                Some(coupon)
            }
            None => None,
        };

        // Fetch every product once; a missing or deactivated product sinks
        // the whole order
        let mut catalog: HashMap<String, Product> = HashMap::new();
        for line in &cart.lines {
            if catalog.contains_key(&line.product_id) {
                continue;
            }
            let product = self
                .products
                .get(&line.product_id)?
                .filter(|p| p.is_active)
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;
            catalog.insert(line.product_id.clone(), product);
        }

        for line in &cart.lines {
            let product = &catalog[&line.product_id];
            validation::validate_quantity(line.quantity).map_err(CoreError::from)?;
            validation::validate_selected_options(product, &line.options)
                .map_err(CoreError::from)?;
        }

        if request.service_type == ServiceType::Delivery {
            let has_address = request
                .delivery_address
                .as_deref()
                .map(|a| !a.trim().is_empty())
                .unwrap_or(false);
            if !has_address {
                return Err(CoreError::DeliveryAddressRequired.into());
            }
        }

        // Quantities per product, in first-seen cart order so the first
        // offending product is the one reported
        let mut requested: Vec<(String, i64)> = Vec::new();
        for line in &cart.lines {
            match requested.iter_mut().find(|(id, _)| id == &line.product_id) {
                Some((_, qty)) => *qty += line.quantity,
                None => requested.push((line.product_id.clone(), line.quantity)),
            }
        }

        let inventory_index = self.inventory.index()?;
        for (product_id, quantity) in &requested {
            let product = &catalog[product_id];
            match &product.stocking {
                Stocking::Simple { stock } => {
                    if stock < quantity {
                        return Err(CoreError::InsufficientStock {
                            name: product.name.clone(),
                            available: *stock,
                            requested: *quantity,
                        }
                        .into());
                    }
                }
                Stocking::Composite { recipe } => {
                    let resolved = resolve_composite_stock(recipe, &inventory_index);
                    if resolved.stock < *quantity {
                        return Err(match resolved.limiting_item {
                            Some(limiting) => CoreError::ComponentShortage {
                                product: product.name.clone(),
                                component: limiting.name,
                                available: resolved.stock,
                                requested: *quantity,
                            },
                            None => CoreError::InsufficientStock {
                                name: product.name.clone(),
                                available: resolved.stock,
                                requested: *quantity,
                            },
                        }
                        .into());
                    }
                }
            }
        }

        let delivery_fee = request
            .delivery_fee
            .unwrap_or(self.config.default_delivery_fee);
        let totals = price_order(
            &cart.lines,
            coupon.as_ref(),
            request.service_type,
            delivery_fee,
        );

        let payment = settle_payment(&request, &totals)?;

        // Past this point the order is committed: consume stock, then insert.
        // Availability was already checked; concurrent operators are out of
        // scope for this register.
        let receipt_number = generate_receipt_number();
        for (product_id, quantity) in &requested {
            let product = &catalog[product_id];
            match &product.stocking {
                Stocking::Simple { stock } => {
                    let mut updated = product.clone();
                    updated.stocking = Stocking::Simple {
                        stock: stock - quantity,
                    };
                    self.products.update(updated)?;
                }
                Stocking::Composite { recipe } => {
                    let reason = format!("sale {receipt_number}");
                    for component in recipe {
                        // Components the resolver skipped consume nothing
                        if component.quantity <= 0
                            || !inventory_index.contains_key(&component.inventory_item_id)
                        {
                            continue;
                        }
                        self.inventory.adjust(
                            &component.inventory_item_id,
                            AdjustKind::Remove(component.quantity * quantity),
                            &reason,
                        )?;
                    }
                }
            }
        }

        let now = Utc::now();
        let lines: Vec<SaleLine> = cart
            .lines
            .iter()
            .map(|line| SaleLine {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                unit_price: line.unit_price(),
                quantity: line.quantity,
                options: line.options.clone(),
                line_total: line.line_total(),
            })
            .collect();

        let sale = Sale {
            id: format!("sale_{}", Uuid::new_v4()),
            receipt_number: receipt_number.clone(),
            status: SaleStatus::Pending,
            lines,
            subtotal: totals.subtotal,
            discount: totals.discount,
            tax: totals.tax,
            delivery_fee: totals.delivery_fee,
            total: totals.total,
            coupon_code: coupon.map(|c| c.code),
            service_type: request.service_type,
            delivery_address: match request.service_type {
                ServiceType::Delivery => request.delivery_address.clone(),
                ServiceType::Pickup => None,
            },
            note: request.note.clone(),
            payment,
            customer_name: request.customer_name.clone(),
            customer_phone: request.customer_phone.clone(),
            staff_name: request.staff_name.clone(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        self.sales.insert(sale.clone())?;
        register.with_cart_mut(|cart| cart.clear());

        info!(
            sale_id = %sale.id,
            receipt = %receipt_number,
            total = %sale.total,
            lines = sale.lines.len(),
            "Order placed"
        );

        Ok(sale)
    }

    /// Moves a sale along its lifecycle.
    ///
    /// Cancelling does not restock: consumed flowers are cut and arranged,
    /// so the ledger keeps the consumption.
    pub fn advance_status(&self, sale_id: &str, next: SaleStatus) -> StoreResult<Sale> {
        let sale = self.sales.update_status(sale_id, next)?;
        info!(sale_id = %sale_id, status = %next, "Sale status updated");
        Ok(sale)
    }
}

// =============================================================================
// Payment Settlement
// =============================================================================

/// Settles the payment for a priced order.
///
/// Cash changes hands in cents, so the comparison and the change are both
/// computed on display-rounded amounts. Non-cash methods settle for the
/// exact rounded total.
fn settle_payment(request: &CheckoutRequest, totals: &OrderTotals) -> StoreResult<Payment> {
    let due = totals.total.rounded();

    match request.payment_method {
        PaymentMethod::Cash => {
            let tendered = request.tendered.ok_or_else(|| {
                CoreError::from(ValidationError::Required {
                    field: "tendered".to_string(),
                })
            })?;
            validation::validate_tendered(tendered).map_err(CoreError::from)?;

            let tendered = tendered.rounded();
            if tendered < due {
                return Err(CoreError::PaymentShortfall {
                    required: due,
                    tendered,
                }
                .into());
            }

            Ok(Payment {
                method: PaymentMethod::Cash,
                tendered,
                change: (tendered - due).max(Money::zero()),
            })
        }
        method => Ok(Payment {
            method,
            tendered: due,
            change: Money::zero(),
        }),
    }
}

/// Receipt numbers embed the checkout timestamp.
fn generate_receipt_number() -> String {
    format!("ORD-{}", Utc::now().timestamp_millis())
}

// =============================================================================
// Receipt View
// =============================================================================

/// One printed line on a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
    pub options: Vec<SelectedOption>,
}

/// Printable view of a sale.
///
/// Amounts are display-rounded here; the sale itself keeps exact values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub sale_id: String,
    pub receipt_number: String,
    pub store_name: String,
    pub store_address: Vec<String>,
    pub timestamp: String,
    pub items: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    pub total: Money,
    pub coupon_code: Option<String>,
    pub service_type: ServiceType,
    pub payment: Payment,
}

impl Receipt {
    /// Builds the printable view from a ledger sale.
    pub fn from_sale(sale: &Sale, config: &ShopConfig) -> Self {
        Receipt {
            sale_id: sale.id.clone(),
            receipt_number: sale.receipt_number.clone(),
            store_name: config.store_name.clone(),
            store_address: config.store_address.clone(),
            timestamp: sale.created_at.to_rfc3339(),
            items: sale
                .lines
                .iter()
                .map(|line| ReceiptLine {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price.rounded(),
                    line_total: line.line_total.rounded(),
                    options: line.options.clone(),
                })
                .collect(),
            subtotal: sale.subtotal.rounded(),
            discount: sale.discount.rounded(),
            tax: sale.tax.rounded(),
            delivery_fee: sale.delivery_fee.rounded(),
            total: sale.total.rounded(),
            coupon_code: sale.coupon_code.clone(),
            service_type: sale.service_type,
            payment: sale.payment.clone(),
        }
    }

    /// Renders the receipt as printable text.
    pub fn render(&self, config: &ShopConfig) -> String {
        let width = 40;
        let mut out = String::new();

        out.push_str(&"=".repeat(width));
        out.push('\n');
        out.push_str(&format!("{:^width$}\n", self.store_name));
        for line in &self.store_address {
            out.push_str(&format!("{:^width$}\n", line));
        }
        out.push_str(&"=".repeat(width));
        out.push('\n');
        out.push_str(&format!("Receipt: {}\n", self.receipt_number));
        out.push_str(&format!("Date:    {}\n", self.timestamp));
        out.push_str(&"-".repeat(width));
        out.push('\n');

        for item in &self.items {
            let label = format!("{} x {}", item.quantity, item.name);
            out.push_str(&format!(
                "{:<28}{:>12}\n",
                label,
                config.format_money(item.line_total)
            ));
            for option in &item.options {
                out.push_str(&format!(
                    "    + {:<22}{:>12}\n",
                    option.name,
                    config.format_money(option.price)
                ));
            }
        }

        out.push_str(&"-".repeat(width));
        out.push('\n');
        out.push_str(&format!(
            "{:<28}{:>12}\n",
            "Subtotal",
            config.format_money(self.subtotal)
        ));
        if !self.discount.is_zero() {
            let label = match &self.coupon_code {
                Some(code) => format!("Discount ({code})"),
                None => "Discount".to_string(),
            };
            out.push_str(&format!(
                "{:<28}{:>12}\n",
                label,
                format!("-{}", config.format_money(self.discount))
            ));
        }
        out.push_str(&format!(
            "{:<28}{:>12}\n",
            "Tax (5%)",
            config.format_money(self.tax)
        ));
        if !self.delivery_fee.is_zero() {
            out.push_str(&format!(
                "{:<28}{:>12}\n",
                "Delivery",
                config.format_money(self.delivery_fee)
            ));
        }
        out.push_str(&format!(
            "{:<28}{:>12}\n",
            "Total",
            config.format_money(self.total)
        ));
        out.push_str(&"-".repeat(width));
        out.push('\n');
        out.push_str(&format!(
            "{:<28}{:>12}\n",
            format!("Paid ({})", method_label(self.payment.method)),
            config.format_money(self.payment.tendered)
        ));
        if !self.payment.change.is_zero() {
            out.push_str(&format!(
                "{:<28}{:>12}\n",
                "Change",
                config.format_money(self.payment.change)
            ));
        }
        out.push_str(&"=".repeat(width));
        out.push('\n');
        out.push_str(&format!("{:^width$}\n", "Thank you for shopping with us!"));

        out
    }
}

fn method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::CreditCard => "credit card",
        PaymentMethod::DebitCard => "debit card",
        PaymentMethod::QrTransfer => "QR transfer",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
