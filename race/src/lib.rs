//! The race engine — a bounded, time-windowed leaderboard session.
//!
//! One session at a time: an instructor opens a race (a problem, a duration,
//! optionally a hidden solution), students race for a fixed number of
//! leaderboard slots until the deadline, and everyone polls the status view.
//! All state lives in the store, so any number of front-end instances, and
//! any number of restarts, agree on what the race looks like.

pub mod config;
pub mod engine;
pub mod error;
pub mod validator;
pub mod view;

pub use config::RaceConfig;
pub use engine::{RaceEngine, RejectReason, SubmitOutcome};
pub use error::RaceError;
pub use view::{OpenRaceView, RaceStatus, SessionHandle};
