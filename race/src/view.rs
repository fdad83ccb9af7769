//! Read-side views handed to the presentation layer.
//!
//! These are snapshots, not capabilities: the durable truth stays in the
//! store, and a handle or status that has gone stale simply disagrees with
//! the next poll.

use serde::Serialize;

use raceboard_store::board::SubmissionRecord;
use raceboard_types::Timestamp;

/// Transient description of a freshly opened race.
#[derive(Clone, Debug, Serialize)]
pub struct SessionHandle {
    pub started_at: Timestamp,
    pub deadline: Timestamp,
    /// Whether answers will be verified against a hidden fingerprint.
    pub verification: bool,
}

/// What the race looks like, as of one clock sample.
#[derive(Clone, Debug, Serialize)]
pub enum RaceStatus {
    /// No race is running: none was ever opened, or the last one was
    /// closed or reset.
    Idle,
    /// A race is open and accepting submissions.
    Open(OpenRaceView),
    /// The deadline has passed; the final board stays visible until the
    /// race is closed or replaced.
    Expired {
        problem_text: String,
        board: Vec<SubmissionRecord>,
    },
}

/// Status detail for a running race.
#[derive(Clone, Debug, Serialize)]
pub struct OpenRaceView {
    pub problem_text: String,
    /// Seconds until the deadline, clamped at zero.
    pub remaining_secs: u64,
    pub board: Vec<SubmissionRecord>,
    pub slots_remaining: u32,
    /// Whether submissions should carry an answer for verification.
    pub verification: bool,
}

impl OpenRaceView {
    /// The remaining time as the classroom countdown string (`H:MM:SS`).
    pub fn remaining_display(&self) -> String {
        raceboard_utils::format_hms(self.remaining_secs)
    }
}
