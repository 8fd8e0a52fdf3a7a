//! HTTP route handlers for the cart service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (database ping)
//!
//! # Cart (JSON, keyed by client session id)
//! GET  /api/cart?session_id=       - Load cart for a session
//! POST /api/cart/items             - Add one unit of a product
//! POST /api/cart/items/quantity    - Set a line item's quantity (0 removes)
//! POST /api/cart/items/remove      - Remove a line item
//! POST /api/cart/clear             - Empty the cart
//! POST /api/cart/customer          - Record customer contact details
//!
//! # Checkout
//! POST /api/notify-order           - Format and log an order notification
//! ```
//!
//! The `/api` routes answer cross-origin requests (including preflights)
//! permissively; the storefront pages are served from a different origin.

pub mod cart;
pub mod notify;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/quantity", post(cart::set_quantity))
        .route("/items/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/customer", post(cart::set_customer))
}

/// Create all routes for the cart service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/cart", cart_routes())
        .route("/api/notify-order", post(notify::notify_order))
        .layer(CorsLayer::permissive())
}
