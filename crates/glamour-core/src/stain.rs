//! Dye material allocation.
//!
//! Applying a dye for real consumes one unit of a dye-material item from the
//! player's inventory. Within one resolution pass several slots may want the
//! same dye, so every unit handed out is recorded in a [`DyeLedger`] and a
//! stack is never offered more times than it has units.
//!
//! The ledger lives for exactly one pass. The next pass starts from a fresh
//! ledger and re-reads real quantities.

use std::collections::HashMap;

use glamour_model::DyeId;

use crate::command::{ChannelWrite, DonorStack};
use crate::port::{ContainerId, PlatePort};

/// Units already committed per inventory stack during one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DyeLedger {
    committed: HashMap<(ContainerId, u32), u32>,
}

impl DyeLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Units committed from the stack at (`container`, `slot`).
    #[must_use]
    pub fn committed(&self, container: ContainerId, slot: u32) -> u32 {
        self.committed.get(&(container, slot)).copied().unwrap_or(0)
    }

    /// Commits one more unit from the stack at (`container`, `slot`).
    pub fn reserve(&mut self, container: ContainerId, slot: u32) {
        *self.committed.entry((container, slot)).or_insert(0) += 1;
    }

    /// Total units committed across all stacks.
    #[must_use]
    pub fn total_committed(&self) -> u32 {
        self.committed.values().sum()
    }
}

/// Finds and reserves a material stack that can produce `dye`.
///
/// Material ids are tried in the order the port lists them; for each, the
/// containers are scanned in `containers` order and the first stack with an
/// uncommitted unit wins. Unreadable containers are skipped.
pub fn select_donor_stack<P: PlatePort + ?Sized>(
    port: &P,
    containers: &[ContainerId],
    dye: DyeId,
    ledger: &mut DyeLedger,
) -> Option<DonorStack> {
    if dye.is_none() {
        return None;
    }

    let materials = port.dye_materials(dye);
    for material in materials.into_iter().flatten().filter(|m| !m.is_none()) {
        for &container in containers {
            let Ok(stacks) = port.inventory(container) else {
                continue;
            };

            let found = stacks.iter().find(|stack| {
                stack.item_id == material && ledger.committed(container, stack.slot) < stack.quantity
            });

            if let Some(stack) = found {
                ledger.reserve(container, stack.slot);
                return Some(DonorStack {
                    container,
                    slot: stack.slot,
                    item_id: stack.item_id,
                });
            }
        }
    }

    None
}

/// Decides the write for one dye channel.
///
/// A channel that already carries `wanted` is left alone and consumes no
/// material. Otherwise the channel is set, backed by a donor stack when one
/// is still available.
pub fn channel_write<P: PlatePort + ?Sized>(
    port: &P,
    containers: &[ContainerId],
    wanted: DyeId,
    carried: DyeId,
    ledger: &mut DyeLedger,
) -> ChannelWrite {
    if wanted == carried {
        return ChannelWrite::Unchanged;
    }

    let donor = select_donor_stack(port, containers, wanted, ledger);
    if donor.is_none() && !wanted.is_none() {
        tracing::debug!(dye = %wanted, "no dye material left, writing dye without a donor");
    }
    ChannelWrite::Set { dye: wanted, donor }
}
