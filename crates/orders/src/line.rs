//! Draft order lines and their three content modes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bursar_core::{CatalogItemId, CategoryId, LineId};

/// Content mode of a draft line.
///
/// Modeled as a sum type with exhaustive handling at every consumer: an
/// `Inventory` line can never carry stray new-item fields and a `Custom`
/// line can never carry an item reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineVariant {
    /// References an existing catalog item. `item_id` is `None` only for the
    /// blank row the operator has not picked an item for yet.
    Inventory { item_id: Option<CatalogItemId> },

    /// A catalog item to be created inline. `resolved_item_id` is set once
    /// the backend creation call succeeds; until then the line carries only
    /// the pending name/category the operator has entered so far.
    NewItem {
        pending_name: String,
        pending_category_id: Option<CategoryId>,
        resolved_item_id: Option<CatalogItemId>,
    },

    /// Free-text line with no catalog reference at all.
    Custom,
}

impl LineVariant {
    /// Blank catalog-reference row (nothing picked yet).
    pub fn inventory() -> Self {
        Self::Inventory { item_id: None }
    }

    /// Blank inline-creation row.
    pub fn new_item() -> Self {
        Self::NewItem {
            pending_name: String::new(),
            pending_category_id: None,
            resolved_item_id: None,
        }
    }

    pub fn custom() -> Self {
        Self::Custom
    }

    /// The resolved catalog reference this line carries, if any.
    ///
    /// `Some` for an `Inventory` line with an item picked and for a `NewItem`
    /// line whose creation call has completed; `None` otherwise (`Custom`
    /// lines by construction never carry one).
    pub fn item_reference(&self) -> Option<CatalogItemId> {
        match self {
            Self::Inventory { item_id } => *item_id,
            Self::NewItem {
                resolved_item_id, ..
            } => *resolved_item_id,
            Self::Custom => None,
        }
    }
}

/// One not-yet-persisted purchase-order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineDraft {
    pub id: LineId,
    pub variant: LineVariant,
    pub description: String,
    pub quantity_expected: i64,
    pub unit_price: Decimal,
}

impl OrderLineDraft {
    /// New draft with variant-appropriate defaults: quantity 1, price 0.
    pub fn new(variant: LineVariant) -> Self {
        Self {
            id: LineId::new(),
            variant,
            description: String::new(),
            quantity_expected: 1,
            unit_price: Decimal::ZERO,
        }
    }

    /// See [`LineVariant::item_reference`].
    pub fn item_reference(&self) -> Option<CatalogItemId> {
        self.variant.item_reference()
    }
}

/// Partial update merged into a draft by [`store::LineDraftStore::update_line`].
///
/// [`store::LineDraftStore::update_line`]: crate::store::LineDraftStore::update_line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinePatch {
    pub variant: Option<LineVariant>,
    pub description: Option<String>,
    pub quantity_expected: Option<i64>,
    pub unit_price: Option<Decimal>,
}

impl LinePatch {
    pub fn apply_to(self, line: &mut OrderLineDraft) {
        if let Some(variant) = self.variant {
            line.variant = variant;
        }
        if let Some(description) = self.description {
            line.description = description;
        }
        if let Some(quantity) = self.quantity_expected {
            line.quantity_expected = quantity;
        }
        if let Some(price) = self.unit_price {
            line.unit_price = price;
        }
    }
}
