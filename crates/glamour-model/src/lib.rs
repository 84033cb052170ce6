//! # Glamour Model
//!
//! Data substrate for glamour plate resolution.
//!
//! This crate holds the plain value types shared between the resolution
//! engine and whatever stores or edits target configurations:
//!
//! - **Items**: [`ItemId`], [`DyeId`] and the per-slot [`GlamourItem`]
//! - **Slots**: the fixed [`PlateSlot`] enumeration and its fallback items
//! - **Plates**: [`TargetConfiguration`], the desired loadout
//! - **Dyes**: the [`ValuableDyes`] priority set and [`DyeChannels`] capabilities
//!
//! ## Quick Start
//!
//! ```
//! use glamour_model::{DyeId, GlamourItem, ItemId, PlateSlot, TargetConfiguration};
//!
//! let plate = TargetConfiguration::new("Raid night")
//!     .with_item(PlateSlot::Body, GlamourItem::new(ItemId::new(24_510), DyeId::new(1), DyeId::new(2)))
//!     .with_item(PlateSlot::Head, GlamourItem::cleared());
//!
//! assert!(plate.desired_for(PlateSlot::Head).unwrap().is_clear());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dye;
pub mod item;
pub mod plate;
pub mod slot;

// Re-exports for convenience
pub use dye::{DyeChannels, ValuableDyes};
pub use item::{DyeId, GlamourItem, ItemId, HQ_ITEM_OFFSET, ITEM_MODIFIER_MOD};
pub use plate::TargetConfiguration;
pub use slot::PlateSlot;
