//! # Cart Register
//!
//! Holds the single active cart for an operator session.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple callers may access/modify the cart
//! 2. Only one caller should modify the cart at a time
//! 3. UI handlers can run concurrently
//!
//! ## Register Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Register Operations                             │
//! │                                                                         │
//! │  Counter Action          Register Call            Cart Change           │
//! │  ──────────────          ─────────────            ───────────           │
//! │                                                                         │
//! │  Tap Product ──────────► with_cart_mut(add) ────► lines merge/push     │
//! │                                                                         │
//! │  Change Quantity ──────► with_cart_mut(update) ─► line.qty = n         │
//! │                                                                         │
//! │  Tap Remove ───────────► with_cart_mut(remove) ─► line dropped         │
//! │                                                                         │
//! │  Checkout ─────────────► snapshot() ────────────► (frozen copy)        │
//! │                                                                         │
//! │  NOTE: All write operations acquire the Mutex lock exclusively.         │
//! │        Read operations also acquire the lock but release it quickly.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use petal_core::{Cart, Money};

/// Shared handle to the active cart.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Cart>>` because:
/// - `Arc`: Allows shared ownership across threads
/// - `Mutex`: Ensures only one thread modifies the cart at a time
///
/// ## Why Not RwLock?
/// Cart operations are typically quick, and most operations modify state.
/// A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct CartRegister {
    cart: Arc<Mutex<Cart>>,
}

impl CartRegister {
    /// Creates a register with an empty cart.
    pub fn new() -> Self {
        CartRegister {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = register.with_cart(CartSummary::from);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// register.with_cart_mut(|cart| cart.add_line(&product, 1, selections))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    /// Returns a frozen copy of the cart.
    ///
    /// Checkout prices and consumes the snapshot so the cart can't change
    /// under it mid-order.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(|cart| cart.clone())
    }
}

impl Default for CartRegister {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart summary for display above the checkout button.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}
