//! Catalog
//!
//! Item and customization models as served by the backing catalog service,
//! plus the per-session [`CatalogSnapshot`] the POS screen reads from.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod snapshot;

pub use snapshot::{CatalogError, CatalogSnapshot};

/// Maximum number of options a single customization may carry.
pub const MAX_CUSTOMIZATION_OPTIONS: usize = 5;

/// Broad item taxonomy used for pricing rules and customization filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    /// Drinks carry per-size prices; everything else sells at base price.
    Drinks,
    /// Food items.
    Food,
    /// Merchandise (shirts, mugs, bags).
    Merchandise,
}

/// Drink size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Size {
    /// Small serving.
    Small,
    /// Medium serving (the base price).
    Medium,
    /// Large serving.
    Large,
}

impl Size {
    /// All sizes, smallest first.
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Size::Small => "SMALL",
            Size::Medium => "MEDIUM",
            Size::Large => "LARGE",
        };

        write!(f, "{label}")
    }
}

/// A sellable catalog item.
///
/// `size_prices` is populated only for [`ItemType::Drinks`]; other item types
/// sell at `base_price` regardless of any size argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Unique, immutable item code.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Item taxonomy.
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Price per unit before sizing and customizations.
    pub base_price: Decimal,

    /// Per-size prices, present only for drinks.
    #[serde(default)]
    pub size_prices: FxHashMap<Size, Decimal>,

    /// Whether the item is currently sellable.
    pub active: bool,

    /// Backing category name, if the service reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One priced option within a customization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationOption {
    /// Option identity within the customization.
    pub id: i64,

    /// Option display name, unique within the customization.
    pub name: String,

    /// Surcharge added to the unit price when selected.
    pub price: Decimal,
}

/// A named axis of optional modification to an item (e.g. "Milk type").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationDefinition {
    /// Customization identity.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Item taxonomy this customization applies to.
    pub category_type: ItemType,

    /// Ordered list of selectable options, at most
    /// [`MAX_CUSTOMIZATION_OPTIONS`].
    pub options: Vec<CustomizationOption>,

    /// Whether the customization is currently offered.
    pub active: bool,
}

impl CustomizationDefinition {
    /// Look up an option by display name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&CustomizationOption> {
        self.options.iter().find(|option| option.name == name)
    }
}
