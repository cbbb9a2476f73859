//! Order
//!
//! The mutable cart for one transaction: an ordered collection of
//! [`OrderLine`]s with derived subtotal, discount and final total. Derived
//! amounts are recomputed from the lines on every read, so no cached figure
//! can drift from the lines that produced it.

use rust_decimal::Decimal;
use thiserror::Error;

pub mod line;

pub use line::{LineError, OptionChoice, OrderCustomization, OrderLine, SelectionSet};

use crate::promo::PromoApplication;

/// Errors raised by aggregate mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// No line at the given position.
    #[error("order line {0} not found")]
    LineNotFound(usize),
}

/// Direction of a quantity update on an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// Add one unit.
    Increment,
    /// Remove one unit, stopping at one. Dropping a line is a distinct,
    /// explicit removal, never a side effect of decrementing.
    Decrement,
}

/// The full in-progress cart for one transaction.
///
/// Insertion order is display order. Created when a transaction starts and
/// cleared on completion or cancellation; the aggregate itself does not
/// distinguish the two.
#[derive(Debug, Default)]
pub struct OrderAggregate {
    lines: Vec<OrderLine>,
    promo: Option<PromoApplication>,
}

impl OrderAggregate {
    /// Create an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the end of the cart.
    pub fn add_line(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    /// Remove the line at `index`, returning it.
    ///
    /// Any applied promo keeps its percentage; the absolute discount floats
    /// with the new subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::LineNotFound`] if `index` is out of range.
    pub fn remove_line(&mut self, index: usize) -> Result<OrderLine, OrderError> {
        if index >= self.lines.len() {
            return Err(OrderError::LineNotFound(index));
        }

        Ok(self.lines.remove(index))
    }

    /// Increment or decrement the quantity of the line at `index`.
    ///
    /// Increments are unconditional; decrements stop at a quantity of one.
    /// The line's total is recomputed from its stored size and
    /// customizations.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::LineNotFound`] if `index` is out of range.
    pub fn update_quantity(
        &mut self,
        index: usize,
        update: QuantityUpdate,
    ) -> Result<(), OrderError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(OrderError::LineNotFound(index))?;

        let quantity = match update {
            QuantityUpdate::Increment => line.quantity() + 1,
            QuantityUpdate::Decrement if line.quantity() > 1 => line.quantity() - 1,
            QuantityUpdate::Decrement => line.quantity(),
        };

        line.set_quantity(quantity);

        Ok(())
    }

    /// The line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::LineNotFound`] if `index` is out of range.
    pub fn line(&self, index: usize) -> Result<&OrderLine, OrderError> {
        self.lines.get(index).ok_or(OrderError::LineNotFound(index))
    }

    /// Iterate over the lines in display order.
    pub fn lines(&self) -> impl Iterator<Item = &OrderLine> {
        self.lines.iter()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line totals, independent of insertion order.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Attach a validated promo to the cart, replacing any earlier one.
    pub fn apply_promo(&mut self, promo: PromoApplication) {
        self.promo = Some(promo);
    }

    /// Drop any applied promo, resetting the discount to zero.
    pub fn clear_promo(&mut self) {
        self.promo = None;
    }

    /// The applied promo, if any.
    #[must_use]
    pub fn promo(&self) -> Option<&PromoApplication> {
        self.promo.as_ref()
    }

    /// Absolute discount derived from the applied promo and the current
    /// subtotal; zero when no promo is applied.
    #[must_use]
    pub fn discount_amount(&self) -> Decimal {
        self.promo
            .as_ref()
            .map_or(Decimal::ZERO, |promo| {
                promo.discount_against(self.subtotal())
            })
    }

    /// `subtotal − discount`. Not clamped here: a discount percentage above
    /// 100 is the promo service's responsibility, and the finalizer refuses
    /// to emit a negative total.
    #[must_use]
    pub fn final_total(&self) -> Decimal {
        self.subtotal() - self.discount_amount()
    }

    /// Empty the cart and reset the discount. Used on both completion and
    /// cancellation.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.promo = None;
    }
}
