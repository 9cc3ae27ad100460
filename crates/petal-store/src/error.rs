//! # Store Error Types
//!
//! Error types for shop state operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (petal-core)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError (petal-core) ← Domain failures (stock, payment, status)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds repository-level failures             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller displays user-friendly message                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use petal_core::CoreError;
use thiserror::Error;

/// Shop state operation errors.
///
/// These wrap domain errors from petal-core and add the failures only a
/// repository can produce.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    ///
    /// ## When This Occurs
    /// - Looking up an id that was never inserted
    /// - Looking up an id after deletion
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique key violation.
    ///
    /// ## When This Occurs
    /// - Inserting a product or inventory item with an existing id
    /// - Inserting a coupon with an existing code
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Domain rule failure from petal-core.
    ///
    /// ## When This Occurs
    /// - Insufficient stock at checkout
    /// - Payment does not cover the total
    /// - Illegal sale status transition
    /// - Input rejected by boundary validation
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for shop state operations.
pub type StoreResult<T> = Result<T, StoreError>;
