//! Previewing a configuration without touching the plate.
//!
//! Each try-on makes the external system post a notice naming the item. The
//! session remembers what it tried on so the host can hide exactly those
//! notices and no others.

use glamour_model::{GlamourItem, ItemId, PlateSlot, TargetConfiguration};

use crate::port::TryOnPort;

/// Tracks items tried on whose notices have not been seen yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TryOnSession {
    unseen: Vec<ItemId>,
}

impl TryOnSession {
    /// Creates a session with nothing outstanding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries on every slot of `target` in plate order. Returns the number of
    /// items tried on.
    ///
    /// Absent or explicitly empty slots use the slot's fallback item when the
    /// target asks for it and are skipped otherwise. The save prompt is held
    /// off around each try-on.
    pub fn try_on_plate<P: TryOnPort + ?Sized>(&mut self, port: &mut P, target: &TargetConfiguration) -> usize {
        let mut count = 0;
        for slot in PlateSlot::ALL {
            let Some(item) = preview_item(target, slot) else {
                continue;
            };

            let item_id = item.item_id.without_hq();
            port.set_save_prompt(false);
            port.try_on(item_id, item.dye1, item.dye2);
            port.set_save_prompt(true);

            self.unseen.push(item_id);
            count += 1;
        }
        tracing::debug!(plate = %target.name, count, "tried on plate");
        count
    }

    /// Call with the item ids named by an incoming notice. Returns true if
    /// the notice was caused by this session and should be hidden.
    ///
    /// Each tried-on item hides at most one notice.
    pub fn suppress_notice(&mut self, item_ids: &[ItemId]) -> bool {
        let hit = self
            .unseen
            .iter()
            .position(|tried| item_ids.iter().any(|id| id.without_hq() == *tried));
        match hit {
            Some(index) => {
                self.unseen.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of notices still expected.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.unseen.len()
    }
}

fn preview_item(target: &TargetConfiguration, slot: PlateSlot) -> Option<GlamourItem> {
    match target.get(slot) {
        Some(item) if !item.item_id.is_none() => Some(*item),
        _ if target.fill_with_fallback => slot.fallback_item().map(GlamourItem::undyed),
        _ => None,
    }
}
