//! Order notification formatting.
//!
//! Turns a checkout payload into the fixed-format text summary the shop
//! owner receives. Formatting is pure; delivery is a stubbed extension
//! point (see [`deliver`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aurora_goods_core::{CustomerInfo, ProductId};

/// One line of an order as sent by the front-end at checkout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Catalog reference; older clients omit it.
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    fn line_total(&self) -> Decimal {
        self.product_price * Decimal::from(self.quantity)
    }
}

/// Checkout payload: cart snapshot plus customer identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNotification {
    pub customer_info: CustomerInfo,
    pub cart_items: Vec<OrderLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// Acknowledgement returned to the caller.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotifyResponse {
    /// Happy-path acknowledgement.
    #[must_use]
    pub fn sent() -> Self {
        Self {
            success: true,
            message: Some("Notification sent successfully".to_owned()),
            error: None,
        }
    }

    /// Failure acknowledgement carrying the error description.
    #[must_use]
    pub const fn failed(error: String) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error),
        }
    }
}

/// Render the order summary the shop owner receives.
///
/// One line per item (`name xN - $subtotal`), then the customer block and
/// the grand total. The format is fixed; the front-end never parses it.
#[must_use]
pub fn format_order_message(order: &OrderNotification) -> String {
    let items_text = order
        .cart_items
        .iter()
        .map(|item| {
            format!(
                "\u{2022} {} x{} - ${:.2}",
                item.product_name,
                item.quantity,
                item.line_total()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\u{1f6d2} NEW ORDER ALERT!\n\n\
         Customer: {}\n\
         Phone: {}\n\n\
         Items:\n{}\n\n\
         \u{1f4b0} Total: ${:.2}\n\n\
         Please contact the customer to confirm the order.",
        order.customer_info.name, order.customer_info.phone, items_text, order.total_price
    )
}

/// Hand the rendered message to the delivery channel.
///
/// Currently logs the message. A real integration (WhatsApp Business API,
/// SMS gateway) plugs in here; there is deliberately no retry, idempotency
/// key, or delivery confirmation.
pub fn deliver(order: &OrderNotification, message: &str) {
    tracing::info!(
        customer = %order.customer_info.name,
        phone = %order.customer_info.phone,
        items = order.cart_items.len(),
        total = %order.total_price,
        "new order notification:\n{message}"
    );
}
