//! One resolution pass over a target configuration.
//!
//! The engine walks the plate slots in their fixed order and, for each slot
//! the target cares about, picks the best source for the desired item and
//! issues the commands that bring the slot in line.
//!
//! # Per-Slot Decision
//!
//! 1. No desired item (and no fallback): leave the slot alone.
//! 2. Desired item is "empty": clear the slot if it holds anything.
//! 3. The occupant already matches exactly: nothing to do.
//! 4. Otherwise gather the occupant (only if it is the desired item), the
//!    best rotating-storage entry and the archive, and pick a winner.
//! 5. If the winner is not the occupant, place it.
//! 6. Clamp dyes to the winner's channels and write the ones that differ.
//!
//! Every command is followed by an immediate re-read of the slot. A mismatch
//! marks the pass as diverged; the pass itself carries on. A slot that only
//! the archive could supply, asked before the archive has loaded, is
//! deferred and marks the pass the same way.
//!
//! # Pass Scope
//!
//! Dye material reservations live in a [`DyeLedger`] created at the start of
//! [`ResolutionEngine::resolve`] and dropped at its end.

use std::collections::BTreeMap;

use glamour_model::{DyeChannels, DyeId, GlamourItem, PlateSlot, TargetConfiguration, ValuableDyes};

use crate::command::{ChannelWrite, Command, ItemSource};
use crate::config::EngineConfig;
use crate::port::{shown_item, PlatePort};
use crate::scorer::{is_exact, pick_best_match, pick_best_source, CandidateSource};
use crate::source_cache::{ArchiveLookup, SourceCache};
use crate::stain::{channel_write, DyeLedger};

// =============================================================================
// Pass Report
// =============================================================================

/// What happened to one slot during a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The target has nothing to say about this slot.
    #[default]
    Untouched,
    /// The slot already held what the target wants. No command issued.
    AlreadySatisfied,
    /// The slot was cleared.
    Cleared,
    /// No source can supply the desired item.
    Unfulfillable,
    /// Only the archive could answer and it has not loaded yet. The pass is
    /// marked for retry.
    Deferred,
    /// The slot could not be read.
    Unreadable,
    /// Commands were issued for this slot.
    Applied {
        /// Where the item came from.
        source: CandidateSource,
        /// Whether a dye write was issued.
        dyes_written: bool,
    },
}

/// Result of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Commands issued, in order.
    pub commands: Vec<Command>,
    /// Outcome per slot the pass visited.
    pub outcomes: BTreeMap<PlateSlot, SlotOutcome>,
    /// True if any write did not take effect on re-read, or a slot was
    /// deferred.
    pub diverged: bool,
}

impl PassReport {
    /// True if every write took effect.
    #[must_use]
    pub fn converged(&self) -> bool {
        !self.diverged
    }

    /// Outcome for `slot`; `Untouched` if the pass never recorded one.
    #[must_use]
    pub fn outcome(&self, slot: PlateSlot) -> SlotOutcome {
        self.outcomes.get(&slot).copied().unwrap_or_default()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Per-pass scratch state.
struct Pass {
    report: PassReport,
    ledger: DyeLedger,
}

/// Resolves target configurations against a [`PlatePort`].
#[derive(Debug, Clone, Copy)]
pub struct ResolutionEngine<'a> {
    config: &'a EngineConfig,
    valuable: &'a ValuableDyes,
}

impl<'a> ResolutionEngine<'a> {
    /// Creates an engine borrowing its configuration and valuable-dye set.
    #[must_use]
    pub fn new(config: &'a EngineConfig, valuable: &'a ValuableDyes) -> Self {
        Self { config, valuable }
    }

    /// Runs one full pass of `target` against `port`.
    ///
    /// Rotating-storage candidates come from `cache` as it stands; the pass
    /// never refreshes it.
    pub fn resolve<P: PlatePort + ?Sized>(
        &self,
        port: &mut P,
        cache: &SourceCache,
        target: &TargetConfiguration,
    ) -> PassReport {
        troubleshoot!(self.config.troubleshooting, plate = %target.name, "begin resolution pass");

        let mut pass = Pass {
            report: PassReport::default(),
            ledger: DyeLedger::new(),
        };

        for slot in PlateSlot::ALL {
            let outcome = self.resolve_slot(port, cache, target, slot, &mut pass);
            pass.report.outcomes.insert(slot, outcome);
        }

        troubleshoot!(
            self.config.troubleshooting,
            plate = %target.name,
            commands = pass.report.commands.len(),
            diverged = pass.report.diverged,
            "end resolution pass"
        );
        pass.report
    }

    fn resolve_slot<P: PlatePort + ?Sized>(
        &self,
        port: &mut P,
        cache: &SourceCache,
        target: &TargetConfiguration,
        slot: PlateSlot,
        pass: &mut Pass,
    ) -> SlotOutcome {
        let trace = self.config.troubleshooting;

        let Some(desired) = target.desired_for(slot) else {
            return SlotOutcome::Untouched;
        };

        let current = match port.slot_occupant(slot) {
            Ok(occupant) => shown_item(occupant),
            Err(err) => {
                troubleshoot!(trace, %slot, %err, "slot unreadable, skipping");
                return SlotOutcome::Unreadable;
            }
        };

        if desired.item_id.is_none() {
            if current.is_none() {
                return SlotOutcome::AlreadySatisfied;
            }
            troubleshoot!(trace, %slot, "clearing slot: target wants it empty");
            self.issue(port, pass, Command::ClearSlot { slot });
            if !matches!(port.slot_occupant(slot), Ok(occupant) if shown_item(occupant).is_none()) {
                self.diverge(pass, slot, "slot still occupied after clear");
            }
            return SlotOutcome::Cleared;
        }

        let occupant = current.filter(|item| item.item_id.base() == desired.item_id.base());
        if occupant.is_some_and(|item| is_exact(&item, &desired)) {
            troubleshoot!(trace, %slot, %desired, "slot already holds the desired item");
            return SlotOutcome::AlreadySatisfied;
        }

        let matches = cache.find_matches(desired.item_id);
        let storage = pick_best_match(&matches, &desired, self.valuable);

        // Storage is consulted before the archive; the archive only matters
        // when nothing else can supply the item.
        let archive = if occupant.is_none() && storage.is_none() {
            cache.archive_lookup(&*port, desired.item_id)
        } else {
            ArchiveLookup::Absent
        };
        if archive == ArchiveLookup::NotLoaded {
            troubleshoot!(trace, %slot, %desired, "archive not loaded yet, deferring slot");
            self.diverge(pass, slot, "archive not loaded");
            return SlotOutcome::Deferred;
        }

        let winner = pick_best_source(occupant, storage, archive.index(), &desired, self.valuable);
        if winner.source.is_none() {
            troubleshoot!(trace, %slot, %desired, "no source holds the desired item, skipping");
            return SlotOutcome::Unfulfillable;
        }
        troubleshoot!(trace, %slot, source = ?winner.source, item = %winner.item, "picked best source");

        let mut issued = false;
        if let Some(source) = winner.source.item_source() {
            self.place_item(port, pass, slot, source, winner.item);
            issued = true;
        }

        let dyes_written = self.apply_dyes(port, pass, slot, winner.item, desired);

        if issued || dyes_written {
            SlotOutcome::Applied {
                source: winner.source,
                dyes_written,
            }
        } else {
            SlotOutcome::AlreadySatisfied
        }
    }

    fn place_item<P: PlatePort + ?Sized>(
        &self,
        port: &mut P,
        pass: &mut Pass,
        slot: PlateSlot,
        source: ItemSource,
        item: GlamourItem,
    ) {
        self.issue(
            port,
            pass,
            Command::SetSlotItem {
                slot,
                source,
                item: item.item_id,
            },
        );

        let took = matches!(
            port.slot_occupant(slot),
            Ok(Some(raw)) if raw.item_id == item.item_id && raw.source == source.kind()
        );
        if !took {
            self.diverge(pass, slot, "item not placed");
        }
    }

    /// Writes the dye channels that differ from what the winner carries.
    /// Returns whether a dye command was issued.
    fn apply_dyes<P: PlatePort + ?Sized>(
        &self,
        port: &mut P,
        pass: &mut Pass,
        slot: PlateSlot,
        winner: GlamourItem,
        desired: GlamourItem,
    ) -> bool {
        let channels = DyeChannels::from_count(port.dye_channel_count(winner.item_id));
        let carried = channels.clamp(winner);
        let wanted = channels.clamp(desired);

        if carried.same_dyes(&wanted) {
            return false;
        }

        troubleshoot!(
            self.config.troubleshooting,
            %slot,
            dye1 = %wanted.dye1,
            dye2 = %wanted.dye2,
            "applying dyes"
        );

        let containers = &self.config.donor_containers;
        let first = channel_write(&*port, containers, wanted.dye1, carried.dye1, &mut pass.ledger);
        let second = channel_write(&*port, containers, wanted.dye2, carried.dye2, &mut pass.ledger);
        if first.is_unchanged() && second.is_unchanged() {
            return false;
        }

        self.issue(port, pass, Command::SetSlotDyes { slot, first, second });

        let took = match port.slot_occupant(slot) {
            Ok(Some(raw)) => {
                let shown = raw.effective();
                channel_took(first, shown.dye1) && channel_took(second, shown.dye2)
            }
            _ => false,
        };
        if !took {
            self.diverge(pass, slot, "dyes not applied");
        }
        true
    }

    fn issue<P: PlatePort + ?Sized>(&self, port: &mut P, pass: &mut Pass, command: Command) {
        troubleshoot!(self.config.troubleshooting, ?command, "issuing command");
        port.execute(&command);
        pass.report.commands.push(command);
    }

    fn diverge(&self, pass: &mut Pass, slot: PlateSlot, reason: &'static str) {
        tracing::debug!(%slot, reason, "pass needs retry");
        pass.report.diverged = true;
    }
}

fn channel_took(write: ChannelWrite, shown: DyeId) -> bool {
    write.dye().map_or(true, |dye| dye == shown)
}
