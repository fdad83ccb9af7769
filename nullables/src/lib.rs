//! Nullable infrastructure for deterministic testing.
//!
//! The engine's external dependencies (clock, storage) are abstracted
//! behind traits. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap the real clock and the LMDB store for nullables in tests.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullRaceStore;
