//! Shared utilities for raceboard.

pub mod logging;
pub mod time;

pub use logging::{init_tracing, init_tracing_json};
pub use time::format_hms;
