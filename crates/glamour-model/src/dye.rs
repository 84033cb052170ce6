//! Dye-related sets: the valuable-dye priority set and per-item dye channel
//! capabilities.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::item::{DyeId, GlamourItem};

/// Externally supplied set of dyes treated as scarce when scoring candidates.
///
/// `DyeId::NONE` is never valuable, even if inserted.
///
/// # Example
///
/// ```
/// use glamour_model::{DyeId, ValuableDyes};
///
/// let valuable: ValuableDyes = [DyeId::new(7), DyeId::new(8)].into_iter().collect();
/// assert!(valuable.contains(DyeId::new(7)));
/// assert!(!valuable.contains(DyeId::new(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuableDyes(BTreeSet<DyeId>);

impl ValuableDyes {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a dye to the set.
    pub fn insert(&mut self, dye: DyeId) {
        if !dye.is_none() {
            self.0.insert(dye);
        }
    }

    /// Returns true if `dye` is valuable.
    #[must_use]
    pub fn contains(&self, dye: DyeId) -> bool {
        !dye.is_none() && self.0.contains(&dye)
    }

    /// Number of valuable dyes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no dye is valuable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<DyeId> for ValuableDyes {
    fn from_iter<T: IntoIterator<Item = DyeId>>(iter: T) -> Self {
        let mut set = Self::new();
        for dye in iter {
            set.insert(dye);
        }
        set
    }
}

bitflags! {
    /// Dye channels an item physically supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DyeChannels: u8 {
        /// First dye channel
        const FIRST = 0b01;
        /// Second dye channel
        const SECOND = 0b10;
    }
}

impl DyeChannels {
    /// Builds the capability set from the item's reported channel count.
    ///
    /// Only a count of exactly 2 exposes the second channel; any other
    /// non-zero count is treated as a single channel.
    #[must_use]
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Self::empty(),
            2 => Self::FIRST | Self::SECOND,
            _ => Self::FIRST,
        }
    }

    /// Resets every channel the item does not have to `DyeId::NONE`.
    #[must_use]
    pub fn clamp(self, item: GlamourItem) -> GlamourItem {
        GlamourItem {
            item_id: item.item_id,
            dye1: if self.contains(Self::FIRST) {
                item.dye1
            } else {
                DyeId::NONE
            },
            dye2: if self.contains(Self::SECOND) {
                item.dye2
            } else {
                DyeId::NONE
            },
        }
    }
}
