//! Storage-layer operations over the shared SQLite pool.
//!
//! Each submodule covers one group of operations: catalog reads/writes,
//! per-owner cart mutations, the checkout transaction, and account/history
//! reads. Store errors surface unchanged; the API layer translates them
//! into HTTP responses.

pub mod accounts;
pub mod cart;
pub mod catalog;
pub mod checkout;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing or invalid input fields on a write.
    #[error("{0}")]
    Validation(String),

    /// Lookup by id or key missed.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Checkout attempted against an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A storage failure inside the checkout transaction. The transaction
    /// is rolled back; neither the order nor the cart clear is applied.
    #[error("checkout failed: {0}")]
    CheckoutFailed(#[source] sqlx::Error),

    /// Unique-constraint violation, e.g. duplicate user email.
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Map a unique-constraint violation to `Conflict`, anything else to
/// `Database`.
fn map_unique_violation(err: sqlx::Error, conflict_message: &str) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.message().contains("UNIQUE constraint failed") {
            return StoreError::Conflict(conflict_message.to_string());
        }
    }
    StoreError::Database(err)
}
