//! Order notification route handler.
//!
//! Stateless: each request carries the full cart snapshot and customer
//! identity, so nothing is shared between invocations. The body is parsed
//! by hand so that a malformed payload still gets the
//! `{success: false, error}` acknowledgement instead of a bare rejection.

use axum::{
    Json,
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::notify::{NotifyResponse, OrderNotification, deliver, format_order_message};

/// Accept an order notification, format it, and hand it to delivery.
///
/// POST /api/notify-order
#[instrument(skip_all)]
pub async fn notify_order(body: Bytes) -> Response {
    match serde_json::from_slice::<OrderNotification>(&body) {
        Ok(order) => {
            let message = format_order_message(&order);
            deliver(&order, &message);
            (StatusCode::OK, Json(NotifyResponse::sent())).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to parse order notification payload");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(NotifyResponse::failed(e.to_string())),
            )
                .into_response()
        }
    }
}
