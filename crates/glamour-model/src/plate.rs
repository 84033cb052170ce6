//! Target configurations: the desired item/dye assignment per slot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::item::GlamourItem;
use crate::slot::PlateSlot;

/// A user's desired loadout.
///
/// Slots absent from `items` are left as-is, unless `fill_with_fallback` is
/// set, in which case they resolve to the slot's fallback item with no dyes.
/// An entry whose item id is `0` asks for the slot to be cleared.
///
/// # Example
///
/// ```
/// use glamour_model::{DyeId, GlamourItem, ItemId, PlateSlot, TargetConfiguration};
///
/// let plate = TargetConfiguration::new("Casual")
///     .with_item(PlateSlot::Head, GlamourItem::new(ItemId::new(100), DyeId::new(5), DyeId::NONE))
///     .with_fallback(true);
///
/// assert_eq!(plate.desired_for(PlateSlot::Head).unwrap().item_id, ItemId::new(100));
/// // Body is absent, so the fallback item is used
/// assert_eq!(plate.desired_for(PlateSlot::Body).unwrap().item_id, ItemId::new(10_033));
/// // Weapons have no fallback
/// assert!(plate.desired_for(PlateSlot::MainHand).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfiguration {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Desired item per slot.
    #[serde(default)]
    pub items: BTreeMap<PlateSlot, GlamourItem>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Fill absent slots with the fallback item.
    #[serde(default)]
    pub fill_with_fallback: bool,
}

impl TargetConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds a configuration from slot positions as stored externally.
    ///
    /// Positions that do not name a [`PlateSlot`] are dropped.
    #[must_use]
    pub fn from_raw_slots(
        name: impl Into<String>,
        raw: impl IntoIterator<Item = (u32, GlamourItem)>,
    ) -> Self {
        let items = raw
            .into_iter()
            .filter_map(|(index, item)| PlateSlot::from_index(index).map(|slot| (slot, item)))
            .collect();
        Self {
            name: name.into(),
            items,
            ..Self::default()
        }
    }

    /// Sets the desired item for `slot`, builder style.
    #[must_use]
    pub fn with_item(mut self, slot: PlateSlot, item: GlamourItem) -> Self {
        self.items.insert(slot, item);
        self
    }

    /// Sets the fallback policy, builder style.
    #[must_use]
    pub fn with_fallback(mut self, fill_with_fallback: bool) -> Self {
        self.fill_with_fallback = fill_with_fallback;
        self
    }

    /// Returns the explicitly stored entry for `slot`.
    #[must_use]
    pub fn get(&self, slot: PlateSlot) -> Option<&GlamourItem> {
        self.items.get(&slot)
    }

    /// Returns what `slot` should resolve to, applying the fallback policy.
    ///
    /// `None` means "leave this slot as-is".
    #[must_use]
    pub fn desired_for(&self, slot: PlateSlot) -> Option<GlamourItem> {
        if let Some(item) = self.items.get(&slot) {
            return Some(*item);
        }
        if !self.fill_with_fallback {
            return None;
        }
        slot.fallback_item().map(GlamourItem::undyed)
    }

    /// Number of explicitly stored slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no slot is explicitly stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
