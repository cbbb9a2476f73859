//! Catalog snapshot.
//!
//! An immutable-per-session view of items and customizations. The POS screen
//! loads one at start-up and replaces it wholesale on a successful refetch; a
//! failed refetch leaves the previous snapshot in place.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::catalog::{CatalogItem, CustomizationDefinition, ItemType, MAX_CUSTOMIZATION_OPTIONS};

/// Errors raised while assembling a catalog snapshot.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two items share the same code.
    #[error("duplicate item code {0}")]
    DuplicateCode(String),

    /// Two customizations share the same id.
    #[error("duplicate customization id {0}")]
    DuplicateCustomization(i64),

    /// A customization carries more options than the catalog allows.
    #[error("customization {0} has more than {MAX_CUSTOMIZATION_OPTIONS} options")]
    TooManyOptions(i64),
}

/// Immutable view of the item and customization catalog.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    items: Vec<CatalogItem>,
    customizations: Vec<CustomizationDefinition>,
    by_code: FxHashMap<String, usize>,
    by_customization_id: FxHashMap<i64, usize>,
}

impl CatalogSnapshot {
    /// Create an empty snapshot, the degraded state before any successful
    /// catalog fetch.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from fetched items and customizations.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateCode`] if two items share a code.
    /// - [`CatalogError::DuplicateCustomization`] if two customizations share
    ///   an id.
    /// - [`CatalogError::TooManyOptions`] if a customization exceeds
    ///   [`MAX_CUSTOMIZATION_OPTIONS`].
    pub fn new(
        items: Vec<CatalogItem>,
        customizations: Vec<CustomizationDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut by_code = FxHashMap::default();

        for (index, item) in items.iter().enumerate() {
            if by_code.insert(item.code.clone(), index).is_some() {
                return Err(CatalogError::DuplicateCode(item.code.clone()));
            }
        }

        let mut by_customization_id = FxHashMap::default();

        for (index, customization) in customizations.iter().enumerate() {
            if customization.options.len() > MAX_CUSTOMIZATION_OPTIONS {
                return Err(CatalogError::TooManyOptions(customization.id));
            }

            if by_customization_id
                .insert(customization.id, index)
                .is_some()
            {
                return Err(CatalogError::DuplicateCustomization(customization.id));
            }
        }

        Ok(Self {
            items,
            customizations,
            by_code,
            by_customization_id,
        })
    }

    /// Look up an item by code.
    #[must_use]
    pub fn item(&self, code: &str) -> Option<&CatalogItem> {
        self.by_code
            .get(code)
            .and_then(|&index| self.items.get(index))
    }

    /// Look up a customization by id.
    #[must_use]
    pub fn customization(&self, id: i64) -> Option<&CustomizationDefinition> {
        self.by_customization_id
            .get(&id)
            .and_then(|&index| self.customizations.get(index))
    }

    /// Iterate over the sellable items, in catalog order.
    pub fn active_items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(|item| item.active)
    }

    /// Iterate over the sellable items of one taxonomy, in catalog order.
    pub fn items_of_type(&self, item_type: ItemType) -> impl Iterator<Item = &CatalogItem> {
        self.active_items()
            .filter(move |item| item.item_type == item_type)
    }

    /// The active customizations applicable to `item`, in catalog order.
    ///
    /// Applicability is by item taxonomy, matching how the backing service
    /// associates customizations to categories.
    #[must_use]
    pub fn customizations_for(&self, item: &CatalogItem) -> Vec<&CustomizationDefinition> {
        self.customizations
            .iter()
            .filter(|customization| {
                customization.active && customization.category_type == item.item_type
            })
            .collect()
    }

    /// Number of items in the snapshot, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
