//! Pricing
//!
//! Pure price derivation: the per-size price policy applied when a drink is
//! created or edited, and the unit-price calculation used every time a line
//! is built or requantified.

use rust_decimal::{Decimal, RoundingStrategy};
use rustc_hash::FxHashMap;

use crate::catalog::{CatalogItem, ItemType, Size};
use crate::order::line::OrderCustomization;

/// Size multiplier for a small drink (0.8).
const SMALL_FACTOR: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Size multiplier for a large drink (1.2).
const LARGE_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Flat surcharge added to a large drink on top of its multiplier.
const LARGE_SURCHARGE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Per-size prices derived from a base price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePrices {
    /// Price of a small serving.
    pub small: Decimal,

    /// Price of a medium serving.
    pub medium: Decimal,

    /// Price of a large serving.
    pub large: Decimal,
}

impl SizePrices {
    /// The price for one size.
    #[must_use]
    pub fn get(&self, size: Size) -> Decimal {
        match size {
            Size::Small => self.small,
            Size::Medium => self.medium,
            Size::Large => self.large,
        }
    }

    /// Convert to the map form carried on [`CatalogItem`].
    #[must_use]
    pub fn into_map(self) -> FxHashMap<Size, Decimal> {
        let mut map = FxHashMap::default();
        map.insert(Size::Small, self.small);
        map.insert(Size::Medium, self.medium);
        map.insert(Size::Large, self.large);
        map
    }
}

/// Derive the per-size prices for a drink from its base price.
///
/// Policy: `SMALL = round(base × 0.8)`, `MEDIUM = round(base)`,
/// `LARGE = round(base × 1.2 + 20)`, rounded to the nearest whole currency
/// unit with midpoints away from zero. Applied when an item is created or
/// edited, never at sale time.
#[must_use]
pub fn derive_size_prices(base: Decimal) -> SizePrices {
    SizePrices {
        small: round_to_unit(base * SMALL_FACTOR),
        medium: round_to_unit(base),
        large: round_to_unit(base * LARGE_FACTOR + LARGE_SURCHARGE),
    }
}

/// Per-unit price of an item with the given size and customizations.
///
/// Drinks price from their size map; any other taxonomy ignores the size
/// argument and prices from `base_price`. The customization surcharge is the
/// sum of the denormalized option prices captured at selection time.
#[must_use]
pub fn unit_price(
    item: &CatalogItem,
    size: Option<Size>,
    customizations: &[OrderCustomization],
) -> Decimal {
    let base = if item.item_type == ItemType::Drinks {
        size_price_or_base(item, size)
    } else {
        item.base_price
    };

    let surcharge: Decimal = customizations
        .iter()
        .map(|customization| customization.price)
        .sum();

    base + surcharge
}

/// The size price for a drink, falling back to its base price when the size
/// is missing or the catalog carries no entry for it.
///
/// The fallback is a deliberate safety net against malformed input; callers
/// that require a size must validate before pricing.
#[must_use]
pub fn size_price_or_base(item: &CatalogItem, size: Option<Size>) -> Decimal {
    size.and_then(|size| item.size_prices.get(&size))
        .copied()
        .unwrap_or(item.base_price)
}

fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
