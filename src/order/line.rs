//! Order lines.
//!
//! An [`OrderLine`] is one priced entry in the cart: one item configuration
//! (size plus customizations) at a given quantity. Lines are built from the
//! in-progress selections of the customization dialog and are immutable
//! except for requantification by the owning aggregate.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::catalog::{CatalogItem, CustomizationDefinition, ItemType, Size};
use crate::pricing;

/// Validation failures when constructing an order line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    /// Quantity below one. Callers clamp before constructing; the builder
    /// rejects rather than clamping.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// A drink line was requested without a size.
    #[error("a size is required for drink items")]
    MissingSize,
}

/// A line-level customization choice, denormalized at selection time.
///
/// `price` is copied from the catalog option when the line is built and is
/// never re-derived, so later catalog edits cannot reprice an open order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCustomization {
    /// Id of the customization this selection answers.
    pub customization_id: i64,

    /// Id of the chosen option, carried for transaction submission.
    pub option_id: i64,

    /// Customization display name.
    pub name: String,

    /// Chosen option display name.
    pub option_name: String,

    /// Option surcharge at selection time.
    pub price: Decimal,
}

/// The choice recorded against one customization in the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionChoice {
    /// Explicitly no option ("None" in the dialog). Dropped at build time,
    /// never stored as a priced customization.
    None,

    /// A named option.
    Named(String),
}

/// In-progress customization choices, keyed by customization id.
///
/// The keyed map guarantees at most one choice per customization; choosing
/// again replaces the earlier choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    choices: BTreeMap<i64, OptionChoice>,
}

impl SelectionSet {
    /// Create an empty selection set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a named option for a customization, replacing any earlier
    /// choice.
    pub fn choose(&mut self, customization_id: i64, option_name: impl Into<String>) {
        self.choices
            .insert(customization_id, OptionChoice::Named(option_name.into()));
    }

    /// Record an explicit "no option" for a customization.
    pub fn choose_none(&mut self, customization_id: i64) {
        self.choices.insert(customization_id, OptionChoice::None);
    }

    /// Iterate over the recorded choices in customization-id order.
    pub fn choices(&self) -> impl Iterator<Item = (i64, &OptionChoice)> {
        self.choices.iter().map(|(&id, choice)| (id, choice))
    }

    /// Whether no choices have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// One priced entry in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    item: CatalogItem,
    quantity: u32,
    size: Option<Size>,
    customizations: SmallVec<[OrderCustomization; 4]>,
    line_total: Decimal,
}

impl OrderLine {
    /// Build a validated line from the dialog's in-progress selections.
    ///
    /// Selections with an explicit "no option" choice are dropped. A
    /// selection whose customization or option cannot be resolved against
    /// `available` is silently discarded rather than failing the line; see
    /// [`resolve_selection`].
    ///
    /// Pure construction: the caller appends the line to the aggregate.
    ///
    /// # Errors
    ///
    /// - [`LineError::ZeroQuantity`] if `quantity` is zero.
    /// - [`LineError::MissingSize`] if `item` is a drink and no size was
    ///   given.
    pub fn build(
        item: &CatalogItem,
        quantity: u32,
        size: Option<Size>,
        selections: &SelectionSet,
        available: &[&CustomizationDefinition],
    ) -> Result<Self, LineError> {
        if quantity < 1 {
            return Err(LineError::ZeroQuantity);
        }

        if item.item_type == ItemType::Drinks && size.is_none() {
            return Err(LineError::MissingSize);
        }

        let size = if item.item_type == ItemType::Drinks {
            size
        } else {
            None
        };

        let customizations: SmallVec<[OrderCustomization; 4]> = selections
            .choices()
            .filter_map(|(id, choice)| match choice {
                OptionChoice::None => None,
                OptionChoice::Named(option_name) => resolve_selection(available, id, option_name),
            })
            .collect();

        let line_total = pricing::unit_price(item, size, &customizations) * Decimal::from(quantity);

        Ok(Self {
            item: item.clone(),
            quantity,
            size,
            customizations,
            line_total,
        })
    }

    /// The catalog item this line sells.
    #[must_use]
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// Units on this line, always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Chosen size; `None` for non-drink items.
    #[must_use]
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// The denormalized customizations on this line, in selection order.
    #[must_use]
    pub fn customizations(&self) -> &[OrderCustomization] {
        &self.customizations
    }

    /// Per-unit price including the customization surcharge.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        pricing::unit_price(&self.item, self.size, &self.customizations)
    }

    /// Line total, always `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.line_total
    }

    /// Requantify the line and recompute its total from the stored size and
    /// customizations. Only the owning aggregate calls this.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
        self.line_total = self.unit_price() * Decimal::from(self.quantity);
    }
}

/// Resolve one dialog selection against the available customizations.
///
/// Returns `None` when the customization id or option name is unknown; the
/// caller drops the selection instead of failing the line. A documented
/// leniency, preserved so that a stale dialog cannot abort a sale.
#[must_use]
pub fn resolve_selection(
    available: &[&CustomizationDefinition],
    customization_id: i64,
    option_name: &str,
) -> Option<OrderCustomization> {
    let customization = available
        .iter()
        .find(|candidate| candidate.id == customization_id)?;

    let option = customization.option(option_name)?;

    Some(OrderCustomization {
        customization_id: customization.id,
        option_id: option.id,
        name: customization.name.clone(),
        option_name: option.name.clone(),
        price: option.price,
    })
}
