//! Commands the engine issues against the external plate.
//!
//! Commands are fire-and-forget: the external system gives no synchronous
//! success signal, so the engine re-reads the slot after each one and leaves
//! any mismatch to the retry loop.
//!
//! # Variants
//!
//! - [`Command::ClearSlot`]: Empty a slot
//! - [`Command::SetSlotItem`]: Place an item from a storage source
//! - [`Command::SetSlotDyes`]: Change one or both dye channels
//!
//! # Example
//!
//! ```
//! use glamour_core::command::{Command, ItemSource};
//! use glamour_model::{ItemId, PlateSlot};
//!
//! let command = Command::SetSlotItem {
//!     slot: PlateSlot::Head,
//!     source: ItemSource::RotatingStorage(3),
//!     item: ItemId::new(100),
//! };
//! assert_eq!(command.slot(), PlateSlot::Head);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use glamour_model::{DyeId, ItemId, PlateSlot};

use crate::port::{ContainerId, SourceKind};

// =============================================================================
// Item Sources
// =============================================================================

/// Where a `SetSlotItem` takes its item from.
///
/// The currently equipped item is not a source here: keeping it never needs
/// a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemSource {
    /// Rotating storage, by storage slot index.
    RotatingStorage(u32),
    /// Archival store, by archive index.
    ArchivalStore(u32),
}

impl ItemSource {
    /// The provenance the slot should report once the item is placed.
    #[must_use]
    pub const fn kind(self) -> SourceKind {
        match self {
            Self::RotatingStorage(_) => SourceKind::RotatingStorage,
            Self::ArchivalStore(_) => SourceKind::ArchivalStore,
        }
    }
}

impl fmt::Display for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RotatingStorage(index) => write!(f, "storage[{index}]"),
            Self::ArchivalStore(index) => write!(f, "archive[{index}]"),
        }
    }
}

// =============================================================================
// Dye Writes
// =============================================================================

/// An inventory stack whose material backs a dye write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DonorStack {
    /// Inventory container holding the stack.
    pub container: ContainerId,
    /// Slot within the container.
    pub slot: u32,
    /// Concrete dye-material item id of the stack.
    pub item_id: ItemId,
}

/// What to do with one dye channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelWrite {
    /// The channel already carries the wanted dye; leave it.
    #[default]
    Unchanged,
    /// Set the channel, with the material stack it consumes if one was found.
    Set {
        /// Dye to apply (`NONE` clears the channel).
        dye: DyeId,
        /// Material provenance; `None` for a preview-only write.
        donor: Option<DonorStack>,
    },
}

impl ChannelWrite {
    /// Returns true if the channel is left alone.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// The dye being written, if any.
    #[must_use]
    pub const fn dye(&self) -> Option<DyeId> {
        match self {
            Self::Unchanged => None,
            Self::Set { dye, .. } => Some(*dye),
        }
    }

    /// The donor stack backing this write, if any.
    #[must_use]
    pub const fn donor(&self) -> Option<DonorStack> {
        match self {
            Self::Unchanged => None,
            Self::Set { donor, .. } => *donor,
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// A write against the external plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Remove whatever occupies `slot`.
    ClearSlot {
        /// Slot to clear
        slot: PlateSlot,
    },
    /// Place `item` from `source` into `slot`.
    SetSlotItem {
        /// Slot to fill
        slot: PlateSlot,
        /// Where the item comes from
        source: ItemSource,
        /// Concrete item id as held by the source
        item: ItemId,
    },
    /// Change the dye channels of `slot`.
    SetSlotDyes {
        /// Slot to dye
        slot: PlateSlot,
        /// First channel
        first: ChannelWrite,
        /// Second channel
        second: ChannelWrite,
    },
}

impl Command {
    /// Returns the slot this command targets.
    #[must_use]
    pub const fn slot(&self) -> PlateSlot {
        match self {
            Self::ClearSlot { slot }
            | Self::SetSlotItem { slot, .. }
            | Self::SetSlotDyes { slot, .. } => *slot,
        }
    }

    /// Returns true for `SetSlotDyes`.
    #[must_use]
    pub const fn is_dye_write(&self) -> bool {
        matches!(self, Self::SetSlotDyes { .. })
    }
}
