//! Snapshot of the rotating storage, plus archive membership lookups.
//!
//! The rotating storage is expensive to read in full but exposes a cheap
//! used-capacity counter. The cache keeps the last counter value it saw and
//! rebuilds the whole snapshot only when the counter moves. Between rebuilds
//! the snapshot may be stale.
//!
//! The archive is never cached: membership is asked of the port each time.
//!
//! # Cold Start
//!
//! A fresh cache is empty and has seen no counter value, so the first
//! [`SourceCache::refresh_if_changed`] always rebuilds. Until then no
//! rotating-storage candidate can be found.

use std::collections::HashSet;

use glamour_model::{GlamourItem, ItemId};

use crate::port::{PlatePort, RawStorageEntry};

/// A validated rotating-storage entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageEntry {
    /// Storage slot index.
    pub slot: u32,
    /// The stored item with its dyes. The id may be a variant.
    pub item: GlamourItem,
}

impl From<RawStorageEntry> for StorageEntry {
    fn from(raw: RawStorageEntry) -> Self {
        Self {
            slot: raw.slot,
            item: GlamourItem::new(raw.item_id, raw.dyes[0], raw.dyes[1]),
        }
    }
}

/// Result of an archive membership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveLookup {
    /// The archive holds the item at this index.
    Held(u32),
    /// The archive does not hold the item.
    Absent,
    /// The item is archivable but the archive has not loaded yet.
    NotLoaded,
}

impl ArchiveLookup {
    /// The archive index when held.
    #[must_use]
    pub const fn index(self) -> Option<u32> {
        match self {
            Self::Held(index) => Some(index),
            Self::Absent | Self::NotLoaded => None,
        }
    }
}

/// Rotating-storage snapshot keyed on the used-capacity counter.
#[derive(Debug, Clone)]
pub struct SourceCache {
    entries: Vec<StorageEntry>,
    last_used_capacity: Option<u32>,
    slot_limit: u32,
}

impl SourceCache {
    /// Creates an empty cache. Entries with a slot index at or above
    /// `slot_limit` are treated as malformed.
    #[must_use]
    pub fn new(slot_limit: u32) -> Self {
        Self {
            entries: Vec::new(),
            last_used_capacity: None,
            slot_limit,
        }
    }

    /// Rebuilds the snapshot if `used_capacity` differs from the last value seen.
    ///
    /// Returns whether a rebuild happened. If the storage cannot be read the
    /// counter is not recorded, so the next call tries again.
    pub fn refresh_if_changed<P: PlatePort + ?Sized>(&mut self, port: &P, used_capacity: u32) -> bool {
        if self.last_used_capacity == Some(used_capacity) {
            return false;
        }

        match port.rotating_storage_entries() {
            Ok(raw) => {
                self.rebuild(raw);
                self.last_used_capacity = Some(used_capacity);
                tracing::debug!(
                    used_capacity,
                    entries = self.entries.len(),
                    "rebuilt rotating storage snapshot"
                );
                true
            }
            Err(err) => {
                tracing::debug!(%err, "rotating storage unreadable, keeping stale snapshot");
                false
            }
        }
    }

    /// Replaces the snapshot with `raw`, dropping empty, out-of-range and
    /// duplicate-slot entries. Source order is kept.
    pub fn rebuild(&mut self, raw: impl IntoIterator<Item = RawStorageEntry>) {
        let mut seen = HashSet::new();
        self.entries = raw
            .into_iter()
            .filter(|entry| !entry.item_id.is_none() && entry.slot < self.slot_limit)
            .filter(|entry| seen.insert(entry.slot))
            .map(StorageEntry::from)
            .collect();
    }

    /// Forgets the last counter value so the next refresh rebuilds.
    pub fn invalidate(&mut self) {
        self.last_used_capacity = None;
    }

    /// Returns every entry whose base item id equals `item`, in snapshot order.
    #[must_use]
    pub fn find_matches(&self, item: ItemId) -> Vec<StorageEntry> {
        let wanted = item.base();
        self.entries
            .iter()
            .filter(|entry| entry.item.item_id.base() == wanted)
            .copied()
            .collect()
    }

    /// Looks `item` up in the archive.
    ///
    /// A negative answer is only trusted once the archive reports itself
    /// loaded; before that it comes back as [`ArchiveLookup::NotLoaded`].
    pub fn archive_lookup<P: PlatePort + ?Sized>(&self, port: &P, item: ItemId) -> ArchiveLookup {
        let Some(index) = port.archive_index(item) else {
            return ArchiveLookup::Absent;
        };
        if port.is_in_archive(index) {
            ArchiveLookup::Held(index)
        } else if port.archive_loaded() {
            ArchiveLookup::Absent
        } else {
            tracing::debug!(%item, "archive not loaded, membership unknown");
            ArchiveLookup::NotLoaded
        }
    }

    /// The archive index of `item` if the archive is known to hold it.
    pub fn archive_source<P: PlatePort + ?Sized>(&self, port: &P, item: ItemId) -> Option<u32> {
        self.archive_lookup(port, item).index()
    }

    /// Returns true if the archive is known to hold `item`.
    pub fn is_in_archive<P: PlatePort + ?Sized>(&self, port: &P, item: ItemId) -> bool {
        self.archive_source(port, item).is_some()
    }

    /// The current snapshot.
    #[must_use]
    pub fn entries(&self) -> &[StorageEntry] {
        &self.entries
    }

    /// Counter value the snapshot was built for.
    #[must_use]
    pub fn last_used_capacity(&self) -> Option<u32> {
        self.last_used_capacity
    }

    /// Number of entries in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::FakePort;
    use glamour_model::DyeId;

    fn raw(item: u32, slot: u32, dye1: u8) -> RawStorageEntry {
        RawStorageEntry {
            item_id: ItemId::new(item),
            slot,
            dyes: [DyeId::new(dye1), DyeId::NONE],
        }
    }

    mod rebuild_tests {
        use super::*;

        #[test]
        fn drops_empty_and_out_of_range_entries() {
            let mut cache = SourceCache::new(800);
            cache.rebuild([raw(0, 1, 0), raw(100, 800, 0), raw(100, 2, 0), raw(101, 799, 0)]);

            let slots: Vec<_> = cache.entries().iter().map(|e| e.slot).collect();
            assert_eq!(slots, vec![2, 799]);
        }

        #[test]
        fn drops_duplicate_slots_keeping_first() {
            let mut cache = SourceCache::new(800);
            cache.rebuild([raw(100, 5, 1), raw(200, 5, 2)]);

            assert_eq!(cache.len(), 1);
            assert_eq!(cache.entries()[0].item.item_id, ItemId::new(100));
        }

        #[test]
        fn rebuild_replaces_wholesale() {
            let mut cache = SourceCache::new(800);
            cache.rebuild([raw(100, 1, 0), raw(200, 2, 0)]);
            cache.rebuild([raw(300, 3, 0)]);

            assert_eq!(cache.len(), 1);
            assert!(cache.find_matches(ItemId::new(100)).is_empty());
        }
    }

    mod refresh_tests {
        use super::*;

        #[test]
        fn first_refresh_always_rebuilds() {
            let mut port = FakePort::new();
            port.add_storage(ItemId::new(100), 3, [DyeId::NONE; 2]);
            let mut cache = SourceCache::new(800);

            assert!(cache.is_empty());
            assert!(cache.refresh_if_changed(&port, 0));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.last_used_capacity(), Some(0));
        }

        #[test]
        fn unchanged_counter_skips_rebuild() {
            let mut port = FakePort::new();
            port.add_storage(ItemId::new(100), 3, [DyeId::NONE; 2]);
            let mut cache = SourceCache::new(800);
            assert!(cache.refresh_if_changed(&port, 1));

            // Contents change but the counter does not: snapshot stays stale
            port.add_storage(ItemId::new(200), 4, [DyeId::NONE; 2]);
            assert!(!cache.refresh_if_changed(&port, 1));
            assert_eq!(cache.len(), 1);

            assert!(cache.refresh_if_changed(&port, 2));
            assert_eq!(cache.len(), 2);
        }

        #[test]
        fn unreadable_storage_retries_next_time() {
            let mut port = FakePort::new();
            port.storage_available = false;
            let mut cache = SourceCache::new(800);

            assert!(!cache.refresh_if_changed(&port, 1));
            assert_eq!(cache.last_used_capacity(), None);

            port.storage_available = true;
            assert!(cache.refresh_if_changed(&port, 1));
        }

        #[test]
        fn invalidate_forces_rebuild() {
            let port = FakePort::new();
            let mut cache = SourceCache::new(800);
            assert!(cache.refresh_if_changed(&port, 1));
            cache.invalidate();
            assert!(cache.refresh_if_changed(&port, 1));
        }
    }

    mod lookup_tests {
        use super::*;

        #[test]
        fn find_matches_compares_base_ids() {
            let mut cache = SourceCache::new(800);
            cache.rebuild([raw(100, 1, 0), raw(1_000_100, 2, 0), raw(101, 3, 0)]);

            let slots: Vec<_> = cache
                .find_matches(ItemId::new(100))
                .iter()
                .map(|e| e.slot)
                .collect();
            assert_eq!(slots, vec![1, 2]);
        }

        #[test]
        fn archive_membership() {
            let mut port = FakePort::new();
            port.add_archive(ItemId::new(500), 42);
            let cache = SourceCache::new(800);

            assert_eq!(cache.archive_source(&port, ItemId::new(500)), Some(42));
            assert!(!cache.is_in_archive(&port, ItemId::new(501)));
        }

        #[test]
        fn unloaded_archive_answers_not_loaded() {
            let mut port = FakePort::new();
            port.register_archivable(ItemId::new(500), 42);
            port.archive_loaded = false;
            let cache = SourceCache::new(800);

            assert_eq!(cache.archive_lookup(&port, ItemId::new(500)), ArchiveLookup::NotLoaded);
            assert!(!cache.is_in_archive(&port, ItemId::new(500)));

            port.archive_loaded = true;
            assert_eq!(cache.archive_lookup(&port, ItemId::new(500)), ArchiveLookup::Absent);
        }

        #[test]
        fn non_archivable_item_is_absent_even_before_load() {
            let mut port = FakePort::new();
            port.archive_loaded = false;
            let cache = SourceCache::new(800);

            assert_eq!(cache.archive_lookup(&port, ItemId::new(501)), ArchiveLookup::Absent);
        }
    }
}
