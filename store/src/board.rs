//! Leaderboard storage trait — the capped, ordered submission list.

use crate::StoreError;
use raceboard_types::Timestamp;
use serde::{Deserialize, Serialize};

/// One accepted submission, in the order it won its slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub participant_name: String,
    /// Retained only when the owning session verifies answers.
    pub answer: Option<String>,
    /// `Some` iff the owning session verifies answers. Judged once at
    /// insert time and never revised.
    pub is_correct: Option<bool>,
    /// Assigned by the store at insert time; non-decreasing per session.
    pub submitted_at: Timestamp,
}

/// A submission that passed the engine's checks and is racing for a slot.
#[derive(Clone, Debug)]
pub struct NewSubmission {
    pub participant_name: String,
    pub answer: Option<String>,
    pub is_correct: Option<bool>,
}

/// Result of an append attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The submission holds a slot. `position` is the 1-based insertion
    /// rank and never changes for the rest of the session.
    Appended { position: u32 },
    /// The participant already holds a slot; nothing was inserted. Carries
    /// the original entry's position and verdict.
    AlreadyListed {
        position: u32,
        is_correct: Option<bool>,
    },
    /// Every slot is taken.
    Full,
    /// The session was replaced, closed, or wiped between the caller's read
    /// and this append. The caller must re-evaluate against fresh state.
    SessionChanged,
}

/// Trait for the slot-capped leaderboard.
pub trait LeaderboardStore {
    /// Append `submission` iff the board still has a free slot, the name is
    /// not already listed, and the live session's generation equals
    /// `expected_generation`. The checks and the insert are one atomic,
    /// serializable unit; a capacity check in one step and an insert in
    /// another would let two racers share the last slot.
    ///
    /// `submitted_at` is assigned here: `now`, clamped so timestamps within
    /// a session never decrease even if the wall clock does.
    fn try_append(
        &self,
        submission: &NewSubmission,
        now: Timestamp,
        expected_generation: u64,
    ) -> Result<AppendOutcome, StoreError>;

    /// All submissions in insertion order, truncated to the slot cap even
    /// if excess rows somehow exist.
    fn board(&self) -> Result<Vec<SubmissionRecord>, StoreError>;

    /// Number of occupied slots.
    fn board_len(&self) -> Result<u32, StoreError>;

    /// Remove every submission. Installing a session clears inside its own
    /// transaction; this standalone form serves the full reset path.
    fn clear_board(&self) -> Result<(), StoreError>;
}
