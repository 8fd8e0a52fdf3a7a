//! Customer identity supplied at checkout.

use serde::{Deserialize, Serialize};

/// Customer contact details for an order.
///
/// Absent until the customer supplies it at checkout. Once set, it is
/// denormalized onto every cart row for the session rather than stored as
/// a separate entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Customer's name as entered at checkout.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
}
