//! Snapshotting the plate currently shown into a new configuration.

use glamour_model::{PlateSlot, TargetConfiguration};

use crate::port::{shown_item, PlatePort};

/// Reads every slot into a configuration named `name`.
///
/// Each occupied slot records what it will show, with pending dyes applied.
/// Empty slots are left out, so loading the result leaves them alone (or
/// fills them with the fallback item). Returns `None` if any slot cannot be
/// read.
pub fn capture_current<P: PlatePort + ?Sized>(port: &P, name: impl Into<String>) -> Option<TargetConfiguration> {
    let mut config = TargetConfiguration::new(name);
    for slot in PlateSlot::ALL {
        match port.slot_occupant(slot) {
            Ok(occupant) => {
                if let Some(item) = shown_item(occupant) {
                    config.items.insert(slot, item);
                }
            }
            Err(err) => {
                tracing::debug!(%slot, %err, "plate unreadable, nothing captured");
                return None;
            }
        }
    }
    Some(config)
}
