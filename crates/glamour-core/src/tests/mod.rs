//! Crate-level tests for the resolution engine and convergence loop.
//!
//! # Test Structure
//!
//! - `helpers.rs`: an in-memory [`PlatePort`](crate::port::PlatePort) and setup utilities
//! - `scenarios.rs`: end-to-end resolution passes over realistic plates
//! - `convergence.rs`: the tick-driven cache and retry triggers

pub mod helpers;
