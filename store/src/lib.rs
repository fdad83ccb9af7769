//! Abstract storage traits for raceboard.
//!
//! Every storage backend (LMDB for durable classroom use, in-memory for
//! testing) implements these traits. The engine depends only on the traits,
//! so the same rules run identically over either backend, and over a store
//! shared by several front-end processes.

pub mod board;
pub mod error;
pub mod session;

pub use board::{AppendOutcome, LeaderboardStore, NewSubmission, SubmissionRecord};
pub use error::StoreError;
pub use session::{NewSession, SessionRecord, SessionStore};
