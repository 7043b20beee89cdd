//! Persistence Test Suite
//!
//! Snapshot round-trips, restart behavior, and configuration handling.
//! Everything the engine answers after a reopen must match what it
//! answered before.

#[path = "../common/mod.rs"]
mod common;

mod snapshot;
