//! Wire records.
//!
//! Request and response shapes exchanged with the backing HTTP service.
//! Catalog items and customizations deserialize directly into their
//! [`crate::catalog`] models; everything else lives here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Size;

/// Request body for `POST promos/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoValidateRequest {
    /// The raw promo code as entered, upper-normalized by the resolver.
    pub code: String,
}

/// Response body of `POST promos/validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoValidation {
    /// Whether the code is valid and currently redeemable.
    pub valid: bool,

    /// Percentage off the cart subtotal, present when `valid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,

    /// Human-readable rejection reason, present when not `valid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request body for `POST customers` (guest creation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    /// Guest first name; the only identity a guest carries.
    pub first_name: String,

    /// Empty for guests.
    pub last_name: String,

    /// ISO date; the capture date is used as a default for guests.
    pub date_of_birth: String,
}

/// A persisted customer as returned by the customer service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    /// Persistent customer id.
    pub id: i64,

    /// First name.
    pub first_name: String,

    /// Last name, empty for guests.
    #[serde(default)]
    pub last_name: String,

    /// Membership id, present for members only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<String>,

    /// Contact email, if on record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone, if on record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request body for `POST transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// The customer the transaction belongs to.
    pub customer_id: i64,

    /// One entry per order line, in display order.
    pub items: Vec<TransactionItemRequest>,
}

/// One order line in a transaction submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItemRequest {
    /// Catalog item code.
    pub item_id: String,

    /// Units sold.
    pub quantity: u32,

    /// Size for drinks; omitted for other items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    /// Selected customizations, omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customizations: Vec<TransactionCustomizationRequest>,
}

/// One customization selection in a transaction submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCustomizationRequest {
    /// Customization id.
    pub customization_id: i64,

    /// Chosen option id.
    pub option_id: i64,
}

/// The persisted transaction returned by `POST transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTransaction {
    /// Persistent transaction id.
    pub id: i64,

    /// Total as recorded by the service, when echoed back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}
