//! Cart line items and the products they reference.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CartItemId, ProductId};

/// A product as presented by the storefront catalog.
///
/// This is the payload the front-end sends when adding to the cart; the
/// cart service does not own the catalog and takes these fields at face
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product reference.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// One product entry in a cart with a quantity.
///
/// At most one line item exists per product per session; adding a product
/// that is already in the cart increments its quantity instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Row identity assigned by the store on insert.
    pub id: CartItemId,
    /// Catalog product reference.
    pub product_id: ProductId,
    /// Product display name, denormalized at add time.
    pub product_name: String,
    /// Unit price, denormalized at add time.
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: Decimal,
    /// Always positive; a quantity of zero deletes the row instead.
    pub quantity: u32,
}

impl CartItem {
    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product_price * Decimal::from(self.quantity)
    }
}
