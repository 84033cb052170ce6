//! # Glamour Core
//!
//! Source resolution and convergence engine for glamour plates.
//!
//! Given a target configuration (the items and dyes the user wants on each
//! plate slot), the engine finds the best source for every item, issues the
//! commands that put it on the plate, spends dye materials without
//! over-committing any stack, and keeps retrying until the external system
//! reflects the request or a retry ceiling is hit.
//!
//! ## Architecture
//!
//! - **Port**: [`PlatePort`] is the only way the engine touches the outside
//! - **Source cache**: rotating-storage snapshot keyed on a capacity counter
//! - **Scorer**: exact match first, then valuable-dye and any-dye matches
//! - **Stain allocator**: per-pass ledger of dye material reservations
//! - **Resolution engine**: one pass over every slot, re-reading after writes
//! - **Convergence loop**: [`PlateLoader`], the tick-driven retry driver
//!
//! ## Usage
//!
//! ```rust,ignore
//! use glamour_core::{EngineConfig, PlateLoader};
//!
//! let mut loader = PlateLoader::new(EngineConfig::default(), valuable_dyes);
//!
//! // Once per host update
//! loader.tick(&mut port);
//!
//! // When the user loads a plate
//! let report = loader.request(&mut port, &plate);
//! ```
//!
//! ## Logging
//!
//! Decision traces are emitted through `tracing` under the
//! `glamour::troubleshooting` target, at `debug` by default and at `info`
//! when [`EngineConfig::troubleshooting`] is set. No subscriber is installed
//! by this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Emits a decision trace, at `info` in troubleshooting mode and `debug`
/// otherwise.
macro_rules! troubleshoot {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            tracing::info!(target: "glamour::troubleshooting", $($arg)+);
        } else {
            tracing::debug!(target: "glamour::troubleshooting", $($arg)+);
        }
    };
}

pub mod capture;
pub mod command;
pub mod config;
pub mod convergence;
pub mod engine;
pub mod error;
pub mod port;
pub mod retry;
pub mod scorer;
pub mod source_cache;
pub mod stain;
pub mod tryon;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use capture::capture_current;
pub use command::{ChannelWrite, Command, DonorStack, ItemSource};
pub use config::EngineConfig;
pub use convergence::{PlateLoader, TickReport};
pub use engine::{PassReport, ResolutionEngine, SlotOutcome};
pub use error::{ConfigError, PortError};
pub use port::{shown_item, ContainerId, InventoryStack, PlatePort, RawOccupant, RawStorageEntry, SourceKind, TryOnPort};
pub use retry::{RetryState, RetryTransition};
pub use scorer::{Candidate, CandidateSource, MatchScore};
pub use source_cache::{ArchiveLookup, SourceCache, StorageEntry};
pub use stain::DyeLedger;
pub use tryon::TryOnSession;
