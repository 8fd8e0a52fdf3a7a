//! Cart route handlers.
//!
//! Every operation is keyed by the session id the browser generated and
//! persists in local storage; the client sends it explicitly on each
//! request rather than the server tracking it in a cookie.
//!
//! Mutations respond with the resulting cart view. When the row store
//! rejects an operation the failure is logged and the pre-operation view
//! returned; the cart is non-critical and never surfaces store errors to
//! the shopper.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use aurora_goods_core::{CartItem, CustomerInfo, Product, ProductId, SessionId};

use crate::cart::CartSession;
use crate::db::CartStore;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart display data returned by every cart endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_info: Option<CustomerInfo>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub item_count: u32,
}

impl CartView {
    fn from_session<S: CartStore>(cart: &CartSession<'_, S>) -> Self {
        Self {
            items: cart.items().to_vec(),
            customer_info: cart.customer_info().cloned(),
            total_price: cart.total_price(),
            item_count: cart.item_count(),
        }
    }
}

/// Query string for cart reads.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub session_id: String,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub session_id: String,
    pub product: Product,
}

/// Set quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    pub session_id: String,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove item request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub session_id: String,
    pub product_id: ProductId,
}

/// Clear cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCartRequest {
    pub session_id: String,
}

/// Customer details request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCustomerRequest {
    pub session_id: String,
    pub customer: CustomerInfo,
}

fn parse_session(raw: &str) -> Result<SessionId> {
    SessionId::parse(raw).map_err(|e| AppError::BadRequest(format!("invalid session id: {e}")))
}

/// Load the cart for a session.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<CartView>> {
    let session_id = parse_session(&query.session_id)?;
    let cart = CartSession::load(state.store(), session_id).await;
    Ok(Json(CartView::from_session(&cart)))
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, payload))]
pub async fn add(
    State(state): State<AppState>,
    Json(payload): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let session_id = parse_session(&payload.session_id)?;
    let mut cart = CartSession::load(state.store(), session_id).await;
    cart.add(&payload.product).await;
    Ok(Json(CartView::from_session(&cart)))
}

/// Set a line item's quantity. Zero removes the line item.
#[instrument(skip(state, payload))]
pub async fn set_quantity(
    State(state): State<AppState>,
    Json(payload): Json<SetQuantityRequest>,
) -> Result<Json<CartView>> {
    let session_id = parse_session(&payload.session_id)?;
    let mut cart = CartSession::load(state.store(), session_id).await;
    cart.set_quantity(payload.product_id, payload.quantity).await;
    Ok(Json(CartView::from_session(&cart)))
}

/// Remove a product's line item from the cart.
#[instrument(skip(state, payload))]
pub async fn remove(
    State(state): State<AppState>,
    Json(payload): Json<RemoveItemRequest>,
) -> Result<Json<CartView>> {
    let session_id = parse_session(&payload.session_id)?;
    let mut cart = CartSession::load(state.store(), session_id).await;
    cart.remove(payload.product_id).await;
    Ok(Json(CartView::from_session(&cart)))
}

/// Empty the cart.
#[instrument(skip(state, payload))]
pub async fn clear(
    State(state): State<AppState>,
    Json(payload): Json<ClearCartRequest>,
) -> Result<Json<CartView>> {
    let session_id = parse_session(&payload.session_id)?;
    let mut cart = CartSession::load(state.store(), session_id).await;
    cart.clear().await;
    Ok(Json(CartView::from_session(&cart)))
}

/// Record customer contact details for the session.
#[instrument(skip(state, payload))]
pub async fn set_customer(
    State(state): State<AppState>,
    Json(payload): Json<SetCustomerRequest>,
) -> Result<Json<CartView>> {
    let session_id = parse_session(&payload.session_id)?;
    let mut cart = CartSession::load(state.store(), session_id).await;
    cart.set_customer_info(payload.customer).await;
    Ok(Json(CartView::from_session(&cart)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::cart_items::memory::MemoryCartStore;

    #[test]
    fn test_parse_session_rejects_invalid_ids() {
        assert!(parse_session("k3j9x2m4q").is_ok());
        assert!(matches!(parse_session(""), Err(AppError::BadRequest(_))));
        assert!(matches!(
            parse_session("has space"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_cart_view_shape() {
        let store = MemoryCartStore::new();
        let mut cart = CartSession::new(&store, SessionId::generate());
        cart.add(&Product {
            id: ProductId::new(1),
            name: "Pen".to_owned(),
            price: Decimal::from(10),
        })
        .await;
        cart.add(&Product {
            id: ProductId::new(1),
            name: "Pen".to_owned(),
            price: Decimal::from(10),
        })
        .await;

        let view = CartView::from_session(&cart);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["itemCount"], 2);
        assert_eq!(json["totalPrice"], 20.0);
        assert_eq!(json["items"][0]["productName"], "Pen");
        // No customer info yet, so the key is omitted entirely
        assert!(json.get("customerInfo").is_none());
    }
}
