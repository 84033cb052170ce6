//! The narrow interface between the engine and the external system.
//!
//! The engine never touches external state except through [`PlatePort`].
//! An adapter outside this crate implements it against the live game client;
//! tests implement it with an in-memory fake.
//!
//! # Reads
//!
//! Reads that depend on external structures which may not be initialised
//! return `Result<_, PortError>`. The engine treats any error as "no data"
//! and degrades to skipping. Membership tests and item metadata lookups are
//! infallible and answer conservatively (`false`, `None`, `0`) instead.
//!
//! # Writes
//!
//! All writes go through [`PlatePort::execute`] and are fire-and-forget.

use serde::{Deserialize, Serialize};
use std::fmt;

use glamour_model::{DyeId, GlamourItem, ItemId, PlateSlot};

use crate::command::Command;
use crate::error::PortError;

/// Identifier of an inventory container searched for dye materials.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(u32);

impl ContainerId {
    /// Creates a new container id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerId({})", self.0)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container:{}", self.0)
    }
}

/// Where the item currently on a slot was taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Already saved on the plate; no pending source.
    #[default]
    Plate,
    /// Placed from rotating storage.
    RotatingStorage,
    /// Placed from the archival store.
    ArchivalStore,
}

/// A slot occupant exactly as the external system reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawOccupant {
    /// Item on the slot.
    pub item_id: ItemId,
    /// Committed dyes.
    pub dyes: [DyeId; 2],
    /// Pending (not yet committed) dyes; non-zero entries take precedence.
    pub pending_dyes: [DyeId; 2],
    /// Provenance of the item.
    pub source: SourceKind,
}

impl RawOccupant {
    /// Returns the item and the dyes the slot will show, pending dyes first.
    #[must_use]
    pub fn effective(&self) -> GlamourItem {
        GlamourItem::new(
            self.item_id,
            self.pending_dyes[0].or(self.dyes[0]),
            self.pending_dyes[1].or(self.dyes[1]),
        )
    }

    /// Returns true if the occupant holds no item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_id.is_none()
    }
}

/// What a slot shows, given the result of [`PlatePort::slot_occupant`].
///
/// Adapters may report an empty slot either as `None` or as an occupant with
/// item id 0; both read as `None` here.
#[must_use]
pub fn shown_item(occupant: Option<RawOccupant>) -> Option<GlamourItem> {
    occupant.filter(|raw| !raw.is_empty()).map(|raw| raw.effective())
}

/// One raw entry of the rotating storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawStorageEntry {
    /// Item id, possibly a variant.
    pub item_id: ItemId,
    /// Storage slot index.
    pub slot: u32,
    /// Dyes carried by the stored item.
    pub dyes: [DyeId; 2],
}

/// One stack in an inventory container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryStack {
    /// Slot within the container.
    pub slot: u32,
    /// Item held.
    pub item_id: ItemId,
    /// Units in the stack.
    pub quantity: u32,
}

/// Read/write surface of the external plate editor.
pub trait PlatePort {
    /// Reads the current occupant of `slot`; `Ok(None)` for an empty slot.
    ///
    /// # Errors
    ///
    /// Fails when the plate editor is not available.
    fn slot_occupant(&self, slot: PlateSlot) -> Result<Option<RawOccupant>, PortError>;

    /// Reads the rotating storage's used-capacity counter.
    ///
    /// # Errors
    ///
    /// Fails when the rotating storage is not available.
    fn used_capacity(&self) -> Result<u32, PortError>;

    /// Reads every raw rotating-storage entry, unfiltered.
    ///
    /// # Errors
    ///
    /// Fails when the rotating storage is not available.
    fn rotating_storage_entries(&self) -> Result<Vec<RawStorageEntry>, PortError>;

    /// Looks up the archive index for `item`, if the item can be archived at all.
    fn archive_index(&self, item: ItemId) -> Option<u32>;

    /// Returns true if the archive holds the item at `index`.
    fn is_in_archive(&self, index: u32) -> bool;

    /// Returns true once the archive contents have been loaded.
    fn archive_loaded(&self) -> bool;

    /// Reads the stacks of an inventory container.
    ///
    /// # Errors
    ///
    /// Fails when the container is not available.
    fn inventory(&self, container: ContainerId) -> Result<Vec<InventoryStack>, PortError>;

    /// Returns the (up to two) material items that can produce `dye`.
    fn dye_materials(&self, dye: DyeId) -> [Option<ItemId>; 2];

    /// Returns how many dye channels `item` has (0, 1 or 2).
    fn dye_channel_count(&self, item: ItemId) -> u8;

    /// Issues a write. There is no synchronous success signal.
    fn execute(&mut self, command: &Command);
}

/// Preview surface used by the try-on helper.
pub trait TryOnPort {
    /// Shows `item` with the given dyes on the preview.
    fn try_on(&mut self, item: ItemId, dye1: DyeId, dye2: DyeId);

    /// Enables or disables the preview's "save outfit" prompt.
    fn set_save_prompt(&mut self, enabled: bool);
}
