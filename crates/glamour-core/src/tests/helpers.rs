//! Test helpers: an in-memory external system and setup utilities.

use std::collections::{BTreeMap, HashMap, HashSet};

use glamour_model::{DyeId, GlamourItem, ItemId, PlateSlot};

use crate::command::{Command, ItemSource};
use crate::error::PortError;
use crate::port::{ContainerId, InventoryStack, PlatePort, RawOccupant, RawStorageEntry, SourceKind, TryOnPort};

// =============================================================================
// Fake Port
// =============================================================================

/// In-memory stand-in for the external plate editor.
///
/// Writes are applied immediately unless `drop_writes` is set, in which case
/// they are recorded and then ignored, the way a write issued while the
/// external system is busy would be.
#[derive(Debug, Clone)]
pub struct FakePort {
    occupants: BTreeMap<PlateSlot, RawOccupant>,
    storage: Vec<RawStorageEntry>,
    used_capacity: u32,
    archivable: HashMap<ItemId, u32>,
    archive: HashSet<u32>,
    inventories: BTreeMap<ContainerId, Vec<InventoryStack>>,
    materials: HashMap<DyeId, [Option<ItemId>; 2]>,
    channel_counts: HashMap<ItemId, u8>,

    /// Plate reads fail when false.
    pub plate_available: bool,
    /// Report empty slots as a zero-id occupant instead of `None`.
    pub empty_as_zero_id: bool,
    /// Rotating storage reads (entries and counter) fail when false.
    pub storage_available: bool,
    /// Whether the archive reports itself loaded.
    pub archive_loaded: bool,
    /// Containers whose reads fail.
    pub unavailable_containers: HashSet<ContainerId>,
    /// Record commands but do not apply them.
    pub drop_writes: bool,
    /// Every command received, in order.
    pub commands: Vec<Command>,
    /// Every try-on received, in order.
    pub tried_on: Vec<(ItemId, DyeId, DyeId)>,
    /// Current state of the save prompt.
    pub save_prompt: bool,
}

impl Default for FakePort {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePort {
    /// Creates an empty, fully available port.
    pub fn new() -> Self {
        Self {
            occupants: BTreeMap::new(),
            storage: Vec::new(),
            used_capacity: 0,
            archivable: HashMap::new(),
            archive: HashSet::new(),
            inventories: BTreeMap::new(),
            materials: HashMap::new(),
            channel_counts: HashMap::new(),
            plate_available: true,
            empty_as_zero_id: false,
            storage_available: true,
            archive_loaded: true,
            unavailable_containers: HashSet::new(),
            drop_writes: false,
            commands: Vec::new(),
            tried_on: Vec::new(),
            save_prompt: true,
        }
    }

    /// Puts `item` on `slot` as a saved plate item.
    pub fn set_occupant(&mut self, slot: PlateSlot, item: GlamourItem) {
        self.occupants.insert(
            slot,
            RawOccupant {
                item_id: item.item_id,
                dyes: item.dyes(),
                pending_dyes: [DyeId::NONE; 2],
                source: SourceKind::Plate,
            },
        );
    }

    /// Sets the pending dyes of an occupied slot.
    pub fn set_pending_dyes(&mut self, slot: PlateSlot, dyes: [DyeId; 2]) {
        if let Some(occupant) = self.occupants.get_mut(&slot) {
            occupant.pending_dyes = dyes;
        }
    }

    /// What `slot` currently shows.
    pub fn occupant(&self, slot: PlateSlot) -> Option<GlamourItem> {
        self.occupants.get(&slot).map(RawOccupant::effective)
    }

    /// Raw occupant of `slot`.
    pub fn raw_occupant(&self, slot: PlateSlot) -> Option<RawOccupant> {
        self.occupants.get(&slot).copied()
    }

    /// Adds a rotating-storage entry and moves the used-capacity counter.
    pub fn add_storage(&mut self, item: ItemId, slot: u32, dyes: [DyeId; 2]) {
        self.storage.push(RawStorageEntry {
            item_id: item,
            slot,
            dyes,
        });
        self.used_capacity += 1;
    }

    /// Removes the rotating-storage entry at `slot` and moves the counter.
    pub fn remove_storage(&mut self, slot: u32) {
        self.storage.retain(|entry| entry.slot != slot);
        self.used_capacity += 1;
    }

    /// Adds a rotating-storage entry without moving the counter.
    pub fn add_storage_silently(&mut self, item: ItemId, slot: u32, dyes: [DyeId; 2]) {
        self.storage.push(RawStorageEntry {
            item_id: item,
            slot,
            dyes,
        });
    }

    /// Makes `item` archivable at `index` without putting it in the archive.
    pub fn register_archivable(&mut self, item: ItemId, index: u32) {
        self.archivable.insert(item, index);
    }

    /// Makes `item` archivable at `index` and puts it in the archive.
    pub fn add_archive(&mut self, item: ItemId, index: u32) {
        self.register_archivable(item, index);
        self.archive.insert(index);
    }

    /// Sets the material items that produce `dye`.
    pub fn set_dye_materials(&mut self, dye: DyeId, materials: [Option<ItemId>; 2]) {
        self.materials.insert(dye, materials);
    }

    /// Adds an inventory stack.
    pub fn add_stack(&mut self, container: ContainerId, slot: u32, item: ItemId, quantity: u32) {
        self.inventories.entry(container).or_default().push(InventoryStack {
            slot,
            item_id: item,
            quantity,
        });
    }

    /// Sets the dye channel count of `item`. Unlisted items have two.
    pub fn set_channel_count(&mut self, item: ItemId, count: u8) {
        self.channel_counts.insert(item, count);
    }

    fn storage_dyes(&self, index: u32, item: ItemId) -> [DyeId; 2] {
        self.storage
            .iter()
            .find(|entry| entry.slot == index && entry.item_id == item)
            .map_or([DyeId::NONE; 2], |entry| entry.dyes)
    }

    fn apply(&mut self, command: &Command) {
        match command {
            Command::ClearSlot { slot } => {
                self.occupants.remove(slot);
            }
            Command::SetSlotItem { slot, source, item } => {
                let dyes = match source {
                    ItemSource::RotatingStorage(index) => self.storage_dyes(*index, *item),
                    ItemSource::ArchivalStore(_) => [DyeId::NONE; 2],
                };
                self.occupants.insert(
                    *slot,
                    RawOccupant {
                        item_id: *item,
                        dyes,
                        pending_dyes: [DyeId::NONE; 2],
                        source: source.kind(),
                    },
                );
            }
            Command::SetSlotDyes { slot, first, second } => {
                if let Some(occupant) = self.occupants.get_mut(slot) {
                    for (channel, write) in [first, second].into_iter().enumerate() {
                        if let Some(dye) = write.dye() {
                            occupant.dyes[channel] = dye;
                            occupant.pending_dyes[channel] = DyeId::NONE;
                        }
                    }
                }
            }
        }
    }
}

impl PlatePort for FakePort {
    fn slot_occupant(&self, slot: PlateSlot) -> Result<Option<RawOccupant>, PortError> {
        if !self.plate_available {
            return Err(PortError::unavailable("plate"));
        }
        match self.occupants.get(&slot) {
            Some(occupant) => Ok(Some(*occupant)),
            None if self.empty_as_zero_id => Ok(Some(RawOccupant::default())),
            None => Ok(None),
        }
    }

    fn used_capacity(&self) -> Result<u32, PortError> {
        if !self.storage_available {
            return Err(PortError::unavailable("rotating storage"));
        }
        Ok(self.used_capacity)
    }

    fn rotating_storage_entries(&self) -> Result<Vec<RawStorageEntry>, PortError> {
        if !self.storage_available {
            return Err(PortError::unavailable("rotating storage"));
        }
        Ok(self.storage.clone())
    }

    fn archive_index(&self, item: ItemId) -> Option<u32> {
        self.archivable.get(&item).copied()
    }

    fn is_in_archive(&self, index: u32) -> bool {
        self.archive_loaded && self.archive.contains(&index)
    }

    fn archive_loaded(&self) -> bool {
        self.archive_loaded
    }

    fn inventory(&self, container: ContainerId) -> Result<Vec<InventoryStack>, PortError> {
        if self.unavailable_containers.contains(&container) {
            return Err(PortError::unavailable("inventory"));
        }
        Ok(self.inventories.get(&container).cloned().unwrap_or_default())
    }

    fn dye_materials(&self, dye: DyeId) -> [Option<ItemId>; 2] {
        self.materials.get(&dye).copied().unwrap_or([None, None])
    }

    fn dye_channel_count(&self, item: ItemId) -> u8 {
        self.channel_counts.get(&item).copied().unwrap_or(2)
    }

    fn execute(&mut self, command: &Command) {
        self.commands.push(command.clone());
        if !self.drop_writes {
            self.apply(command);
        }
    }
}

impl TryOnPort for FakePort {
    fn try_on(&mut self, item: ItemId, dye1: DyeId, dye2: DyeId) {
        self.tried_on.push((item, dye1, dye2));
    }

    fn set_save_prompt(&mut self, enabled: bool) {
        self.save_prompt = enabled;
    }
}

// =============================================================================
// Setup Utilities
// =============================================================================

/// Installs a test-writer subscriber so traces show up in failing tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Shorthand for an item with raw dye values.
pub fn dyed(item: u32, dye1: u8, dye2: u8) -> GlamourItem {
    GlamourItem::new(ItemId::new(item), DyeId::new(dye1), DyeId::new(dye2))
}

/// Shorthand for a pair of raw dye values.
pub fn dyes(dye1: u8, dye2: u8) -> [DyeId; 2] {
    [DyeId::new(dye1), DyeId::new(dye2)]
}

/// The default donor containers, in search order.
pub fn main_inventory() -> Vec<ContainerId> {
    (0..4).map(ContainerId::new).collect()
}
