//! LMDB storage backend for raceboard.
//!
//! Implements the storage traits from `raceboard-store` using the `heed`
//! LMDB bindings. One environment holds three named databases: the current
//! session record, the leaderboard rows, and a small meta table (schema
//! version and the session generation counter). LMDB's single-writer model
//! makes every write transaction serializable, which is what the
//! check-then-insert paths lean on.

pub mod board;
pub mod environment;
pub mod error;
pub mod session;

pub use environment::{LmdbRaceStore, CURRENT_SCHEMA_VERSION};
pub use error::LmdbError;
