//! Database operations for the storefront `PostgreSQL`.
//!
//! # Tables
//!
//! - `cart_items` - One row per product per cart session. Customer contact
//!   details are denormalized onto these rows once supplied at checkout;
//!   there is no separate customer table.
//!
//! # Migrations
//!
//! Migrations live in `crates/storefront/migrations/` and are applied on
//! startup via `sqlx::migrate!`.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod cart_items;

pub use cart_items::{CartSnapshot, CartStore, PgCartStore};

/// Errors from the cart row store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row held data the domain types reject.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
