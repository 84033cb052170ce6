//! The fixed enumeration of equipment slots on a glamour plate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::item::ItemId;

/// One equipment position on a plate.
///
/// Declaration order is plate order; [`PlateSlot::ALL`] iterates it and the
/// resolution engine walks slots in exactly this order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlateSlot {
    /// Main-hand weapon or tool
    MainHand,
    /// Off-hand weapon or shield
    OffHand,
    /// Head
    Head,
    /// Body
    Body,
    /// Hands
    Hands,
    /// Legs
    Legs,
    /// Feet
    Feet,
    /// Earrings
    Ears,
    /// Necklace
    Neck,
    /// Bracelets
    Wrists,
    /// Right ring
    RightRing,
    /// Left ring
    LeftRing,
}

impl PlateSlot {
    /// Every slot in plate order.
    pub const ALL: [Self; 12] = [
        Self::MainHand,
        Self::OffHand,
        Self::Head,
        Self::Body,
        Self::Hands,
        Self::Legs,
        Self::Feet,
        Self::Ears,
        Self::Neck,
        Self::Wrists,
        Self::RightRing,
        Self::LeftRing,
    ];

    /// Returns the slot's position on the plate.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a slot by plate position. Unknown positions yield `None`.
    #[must_use]
    pub fn from_index(index: u32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Returns the well-known fallback item ("New Emperor" set) for this slot.
    ///
    /// Weapon slots have no fallback.
    #[must_use]
    pub const fn fallback_item(self) -> Option<ItemId> {
        let id = match self {
            Self::MainHand | Self::OffHand => return None,
            Self::Head => 10_032,
            Self::Body => 10_033,
            Self::Hands => 10_034,
            Self::Legs => 10_035,
            Self::Feet => 10_036,
            Self::Ears => 9_293,
            Self::Neck => 9_292,
            Self::Wrists => 9_294,
            Self::RightRing | Self::LeftRing => 9_295,
        };
        Some(ItemId::new(id))
    }
}

impl fmt::Display for PlateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MainHand => "MainHand",
            Self::OffHand => "OffHand",
            Self::Head => "Head",
            Self::Body => "Body",
            Self::Hands => "Hands",
            Self::Legs => "Legs",
            Self::Feet => "Feet",
            Self::Ears => "Ears",
            Self::Neck => "Neck",
            Self::Wrists => "Wrists",
            Self::RightRing => "RightRing",
            Self::LeftRing => "LeftRing",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (i, slot) in PlateSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn from_index_roundtrip() {
        for slot in PlateSlot::ALL {
            let index = u32::try_from(slot.index()).unwrap();
            assert_eq!(PlateSlot::from_index(index), Some(slot));
        }
        assert_eq!(PlateSlot::from_index(12), None);
        assert_eq!(PlateSlot::from_index(u32::MAX), None);
    }

    #[test]
    fn weapons_have_no_fallback() {
        assert_eq!(PlateSlot::MainHand.fallback_item(), None);
        assert_eq!(PlateSlot::OffHand.fallback_item(), None);
    }

    #[test]
    fn rings_share_fallback() {
        assert_eq!(
            PlateSlot::RightRing.fallback_item(),
            PlateSlot::LeftRing.fallback_item()
        );
        assert!(PlateSlot::Head.fallback_item().is_some());
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", PlateSlot::RightRing), "RightRing");
        assert_eq!(format!("{}", PlateSlot::Head), "Head");
    }
}
