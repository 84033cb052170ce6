//! Item and dye identifiers, and the item/dye pair stored per slot.
//!
//! - [`ItemId`]: Game item identifier, possibly carrying a variant offset
//! - [`DyeId`]: Dye (stain) identifier, `0` meaning "no dye"
//! - [`GlamourItem`]: An item with its two dye channels
//!
//! # Item Variants
//!
//! The external system encodes high-quality and collectable variants of an
//! item by adding a fixed offset to the base id. Storage entries may carry
//! such variant ids, so matching against a desired item always compares the
//! [`ItemId::base`] of the stored entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Modulus that strips every variant offset from an item id.
pub const ITEM_MODIFIER_MOD: u32 = 500_000;

/// Offset added to an item id for its high-quality variant.
pub const HQ_ITEM_OFFSET: u32 = 1_000_000;

/// Game item identifier.
///
/// `ItemId::NONE` (`0`) is a sentinel: in a target configuration it means
/// "explicitly clear this slot", in an occupant read it means "empty".
///
/// # Example
///
/// ```
/// use glamour_model::ItemId;
///
/// let hq = ItemId::new(1_010_032);
/// assert_eq!(hq.base(), ItemId::new(10_032));
/// assert!(ItemId::NONE.is_none());
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// The empty/clear sentinel.
    pub const NONE: Self = Self(0);

    /// Creates a new item id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns true for the `0` sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns the base item id with any variant offset removed.
    #[must_use]
    pub const fn base(self) -> Self {
        Self(self.0 % ITEM_MODIFIER_MOD)
    }

    /// Returns the item id with the high-quality offset removed.
    #[must_use]
    pub const fn without_hq(self) -> Self {
        Self(self.0 % HQ_ITEM_OFFSET)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl From<ItemId> for u32 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Dye identifier. `DyeId::NONE` means the channel carries no dye.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DyeId(u8);

impl DyeId {
    /// No dye in this channel.
    pub const NONE: Self = Self(0);

    /// Creates a new dye id.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Returns true if the channel carries no dye.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `self` unless it is `NONE`, in which case `fallback` is used.
    ///
    /// Used to layer pending (uncommitted) dyes over committed ones.
    #[must_use]
    pub const fn or(self, fallback: Self) -> Self {
        if self.is_none() {
            fallback
        } else {
            self
        }
    }
}

impl fmt::Debug for DyeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DyeId({})", self.0)
    }
}

impl fmt::Display for DyeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for DyeId {
    fn from(id: u8) -> Self {
        Self::new(id)
    }
}

/// An item together with its two dye channels.
///
/// This is both what a target configuration asks for per slot and what a
/// candidate source would contribute.
///
/// # Example
///
/// ```
/// use glamour_model::{DyeId, GlamourItem, ItemId};
///
/// let wanted = GlamourItem::new(ItemId::new(100), DyeId::new(5), DyeId::NONE);
/// let stored = GlamourItem::new(ItemId::new(100), DyeId::new(5), DyeId::NONE);
/// assert!(wanted.matches_exactly(&stored));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlamourItem {
    /// Item id (`0` = clear the slot)
    pub item_id: ItemId,
    /// First dye channel
    #[serde(default)]
    pub dye1: DyeId,
    /// Second dye channel
    #[serde(default)]
    pub dye2: DyeId,
}

impl GlamourItem {
    /// Creates a new item/dye pair.
    #[must_use]
    pub const fn new(item_id: ItemId, dye1: DyeId, dye2: DyeId) -> Self {
        Self {
            item_id,
            dye1,
            dye2,
        }
    }

    /// Creates an item with both channels undyed.
    #[must_use]
    pub const fn undyed(item_id: ItemId) -> Self {
        Self::new(item_id, DyeId::NONE, DyeId::NONE)
    }

    /// The "explicitly clear this slot" request.
    #[must_use]
    pub const fn cleared() -> Self {
        Self::undyed(ItemId::NONE)
    }

    /// Returns true if this asks for the slot to be emptied.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        self.item_id.is_none()
    }

    /// Returns both dye channels in order.
    #[must_use]
    pub const fn dyes(&self) -> [DyeId; 2] {
        [self.dye1, self.dye2]
    }

    /// Returns true if both dye channels are equal.
    #[must_use]
    pub fn same_dyes(&self, other: &Self) -> bool {
        self.dye1 == other.dye1 && self.dye2 == other.dye2
    }

    /// Returns true if item id and both dye channels are equal.
    #[must_use]
    pub fn matches_exactly(&self, other: &Self) -> bool {
        self.item_id == other.item_id && self.same_dyes(other)
    }
}

impl fmt::Display for GlamourItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.item_id, self.dye1, self.dye2)
    }
}
