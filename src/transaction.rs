//! Transaction finalization.
//!
//! Combines the cart, its discount, and the customer identity into a
//! submittable [`TransactionRecord`]: one row per order line with the
//! structural fields the persistence and receipt collaborators depend on.
//! Finalization is read-only on the aggregate; clearing the cart is a
//! separate, explicit step.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::Size;
use crate::customer::CustomerRef;
use crate::order::{OrderAggregate, OrderLine};
use crate::remote::records::{
    TransactionCustomizationRequest, TransactionItemRequest, TransactionRequest,
};

/// Label reported for lines without a size.
pub const NO_SIZE_LABEL: &str = "no size";

/// Errors refusing finalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinalizeError {
    /// The cart holds no lines.
    #[error("cannot finalize an empty order")]
    EmptyOrder,

    /// `subtotal − discount` is negative; the external collaborator must
    /// never see a negative total.
    #[error("final total would be negative")]
    NegativeTotal,
}

/// One customization on a finalized row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationRow {
    /// Customization id, carried for submission.
    pub customization_id: i64,

    /// Chosen option id, carried for submission.
    pub option_id: i64,

    /// Customization display name.
    pub name: String,

    /// Chosen option display name.
    pub option_name: String,

    /// Option surcharge at selection time.
    pub price: Decimal,
}

/// One finalized order line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    /// Catalog item code.
    pub item_code: String,

    /// Item display name.
    pub item_name: String,

    /// Units sold.
    pub quantity: u32,

    /// Size for drinks; `None` for everything else.
    pub size: Option<Size>,

    /// Customization name/option/price triples, in selection order.
    pub customizations: Vec<CustomizationRow>,

    /// Per-unit price including customization surcharge.
    pub unit_price: Decimal,

    /// `unit_price × quantity`.
    pub line_total: Decimal,
}

impl TransactionRow {
    /// The size label for display: the size name, or [`NO_SIZE_LABEL`].
    #[must_use]
    pub fn size_label(&self) -> String {
        self.size
            .map_or_else(|| NO_SIZE_LABEL.to_string(), |size| size.to_string())
    }
}

/// A finalized transaction, ready for submission and receipt rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Persistent id of the attached customer.
    pub customer_id: i64,

    /// Display name of the attached customer.
    pub customer_name: String,

    /// One row per order line, in display order.
    pub rows: Vec<TransactionRow>,

    /// Cart subtotal before discount.
    pub subtotal: Decimal,

    /// Absolute discount at finalization time.
    pub discount_amount: Decimal,

    /// Applied promo code, if any.
    pub promo_code: Option<String>,

    /// `subtotal − discount_amount`, guaranteed non-negative.
    pub final_total: Decimal,
}

impl TransactionRecord {
    /// The wire request submitting this transaction for persistence.
    #[must_use]
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest {
            customer_id: self.customer_id,
            items: self
                .rows
                .iter()
                .map(|row| TransactionItemRequest {
                    item_id: row.item_code.clone(),
                    quantity: row.quantity,
                    size: row.size,
                    customizations: row
                        .customizations
                        .iter()
                        .map(|customization| TransactionCustomizationRequest {
                            customization_id: customization.customization_id,
                            option_id: customization.option_id,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Finalize the cart against a customer identity.
///
/// Does not mutate the aggregate.
///
/// # Errors
///
/// - [`FinalizeError::EmptyOrder`] if the cart holds no lines.
/// - [`FinalizeError::NegativeTotal`] if the discount exceeds the subtotal.
pub fn finalize(
    order: &OrderAggregate,
    customer: &CustomerRef,
) -> Result<TransactionRecord, FinalizeError> {
    if order.is_empty() {
        return Err(FinalizeError::EmptyOrder);
    }

    let subtotal = order.subtotal();
    let discount_amount = order.discount_amount();
    let final_total = subtotal - discount_amount;

    if final_total < Decimal::ZERO {
        return Err(FinalizeError::NegativeTotal);
    }

    Ok(TransactionRecord {
        customer_id: customer.customer_id(),
        customer_name: customer.display_name().to_string(),
        rows: order.lines().map(row_from_line).collect(),
        subtotal,
        discount_amount,
        promo_code: order.promo().map(|promo| promo.code().to_string()),
        final_total,
    })
}

fn row_from_line(line: &OrderLine) -> TransactionRow {
    TransactionRow {
        item_code: line.item().code.clone(),
        item_name: line.item().name.clone(),
        quantity: line.quantity(),
        size: line.size(),
        customizations: line
            .customizations()
            .iter()
            .map(|customization| CustomizationRow {
                customization_id: customization.customization_id,
                option_id: customization.option_id,
                name: customization.name.clone(),
                option_name: customization.option_name.clone(),
                price: customization.price,
            })
            .collect(),
        unit_price: line.unit_price(),
        line_total: line.line_total(),
    }
}
