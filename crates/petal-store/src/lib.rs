//! # petal-store: Shop State Layer for Petal POS
//!
//! This crate owns the running shop: catalog, inventory, coupon book, sales
//! ledger, the active cart, and the checkout pipeline that ties them together.
//! All business math lives in `petal-core`; this crate adds state and
//! orchestration.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Petal POS Data Flow                              │
//! │                                                                         │
//! │  Counter / Demo Binary                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    petal-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CartRegister  │    │ CheckoutService│   │ Repositories │  │   │
//! │  │   │ (register.rs) │───►│ (checkout.rs) │───►│ (repository/)│  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ active cart   │    │ validate      │    │ ProductStore │  │   │
//! │  │   │ shared state  │    │ price, pay,   │    │ SaleStore    │  │   │
//! │  │   │               │    │ consume stock │    │ ...          │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   reports.rs reads the same stores; seed.rs fills them.        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              petal-core (pure business logic)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - Store traits and their in-memory implementations
//! - [`register`] - The shared active cart
//! - [`checkout`] - Order placement pipeline and receipts
//! - [`reports`] - Sales, staff, inventory, and profit summaries
//! - [`config`] - Shop configuration (name, currency, delivery fee)
//! - [`seed`] - Demo flower-shop dataset
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use petal_store::{
//!     seed, CartRegister, CheckoutRequest, CheckoutService, MemoryCouponStore,
//!     MemoryInventoryStore, MemoryProductStore, MemorySaleStore, ShopConfig,
//! };
//!
//! // Wire up an in-memory shop and fill it with the demo dataset
//! let products = Arc::new(MemoryProductStore::new());
//! let inventory = Arc::new(MemoryInventoryStore::new());
//! let coupons = Arc::new(MemoryCouponStore::new());
//! let sales = Arc::new(MemorySaleStore::new());
//! seed::seed_all(products.as_ref(), inventory.as_ref(), coupons.as_ref())?;
//!
//! // Ring up an order
//! let register = CartRegister::new();
//! let dozen = products.get("prod_red_roses_dozen")?.unwrap();
//! register.with_cart_mut(|cart| cart.add_line(&dozen, 2, vec![]))?;
//!
//! let service = CheckoutService::new(products, inventory, coupons, sales, ShopConfig::default());
//! let sale = service.place_order(&register, CheckoutRequest::pickup_cash(tendered))?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod register;
pub mod reports;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutRequest, CheckoutService, Receipt, ReceiptLine};
pub use config::ShopConfig;
pub use error::{StoreError, StoreResult};
pub use register::{CartRegister, CartSummary};

// Repository re-exports for convenience
pub use repository::{
    AdjustKind, CouponStore, FinanceStore, InventoryStore, MemoryCouponStore, MemoryFinanceStore,
    MemoryInventoryStore, MemoryProductStore, MemorySaleStore, ProductStore, SaleStore,
    StockAdjustment,
};

// Report re-exports
pub use reports::{
    inventory_kpis, profit_summary, sales_summary, staff_performance, CategoryExpense,
    InventoryKpis, ProfitSummary, SalesSummary, StaffPerformance, StaffReport,
};
