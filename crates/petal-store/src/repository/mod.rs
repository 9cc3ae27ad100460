//! # Repository Module
//!
//! Store traits and their in-memory implementations for Petal POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern puts shop state behind a trait instead of      │
//! │  global mutable collections.                                           │
//! │                                                                         │
//! │  Checkout / Reports                                                    │
//! │       │                                                                 │
//! │       │  products.search("rose", Some("Bouquet"))                      │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  dyn ProductStore                                                      │
//! │  ├── search(&self, query, category)                                    │
//! │  ├── get(&self, id)                                                    │
//! │  ├── insert(&self, product)                                            │
//! │  └── update(&self, product)                                            │
//! │       │                                                                 │
//! │       │  backed today by                                                │
//! │       ▼                                                                 │
//! │  MemoryProductStore (RwLock<HashMap>)                                  │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Checkout and reports depend on behavior, not storage                │
//! │  • Easy to test (hand a service any impl)                              │
//! │  • A persistent backend can slot in without touching callers           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Stores
//!
//! - [`ProductStore`] - Catalog CRUD and search
//! - [`InventoryStore`] - Raw material stock and adjustments
//! - [`CouponStore`] - Coupon book with code-normalized lookup
//! - [`SaleStore`] - Sales ledger and status transitions
//! - [`FinanceStore`] - Manual expense and income entries

pub mod coupon;
pub mod finance;
pub mod inventory;
pub mod product;
pub mod sale;

pub use coupon::{CouponStore, MemoryCouponStore};
pub use finance::{FinanceStore, MemoryFinanceStore};
pub use inventory::{AdjustKind, InventoryStore, MemoryInventoryStore, StockAdjustment};
pub use product::{MemoryProductStore, ProductStore};
pub use sale::{MemorySaleStore, SaleStore};
