//! Race parameters — the classroom-tunable limits.

use serde::{Deserialize, Serialize};

/// Limits governing every race session.
///
/// Deployments pick these once; individual sessions only choose a duration
/// within the bound. Slots are deliberately scarce — the board is a podium,
/// not a roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceParams {
    /// Leaderboard slots available per session.
    pub max_slots: u32,

    /// Maximum stored length of a participant name, in characters.
    pub max_name_len: usize,

    /// Upper bound for a session duration in minutes (the lower bound is 1).
    pub max_duration_minutes: u32,
}

impl RaceParams {
    /// The classroom configuration: a three-slot podium, minute-scale races.
    pub fn classroom_defaults() -> Self {
        Self {
            max_slots: 3,
            max_name_len: 64,
            max_duration_minutes: 30,
        }
    }
}

/// Default is the classroom configuration.
impl Default for RaceParams {
    fn default() -> Self {
        Self::classroom_defaults()
    }
}
