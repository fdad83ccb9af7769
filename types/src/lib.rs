//! Fundamental types for raceboard.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! timestamps and the clock seam, solution fingerprints, participant-name
//! sanitation, and the tunable race parameters.

pub mod fingerprint;
pub mod name;
pub mod params;
pub mod time;

pub use fingerprint::Fingerprint;
pub use name::sanitize_participant_name;
pub use params::RaceParams;
pub use time::{Clock, SystemClock, Timestamp};
