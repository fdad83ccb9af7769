//! Session storage trait — the single current race record.

use crate::StoreError;
use raceboard_types::{Fingerprint, Timestamp};
use serde::{Deserialize, Serialize};

/// A session as the engine hands it to the store for installation.
///
/// `started_at` is sampled by the caller; the store adds the `active` flag
/// and its own generation counter.
#[derive(Clone, Debug)]
pub struct NewSession {
    pub problem_text: String,
    pub duration_minutes: u32,
    pub started_at: Timestamp,
    /// Present iff answer verification is enabled for this session.
    pub solution_fingerprint: Option<Fingerprint>,
}

/// The persisted state of one race session.
///
/// There is at most one record; installing a new session replaces it
/// wholesale. Closing a race flips `active` off without deleting the record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
    pub problem_text: String,
    pub duration_minutes: u32,
    /// Set exactly once, at install time. Never updated afterwards.
    pub started_at: Timestamp,
    /// Present iff answer verification is enabled for this session.
    pub solution_fingerprint: Option<Fingerprint>,
    pub active: bool,
    /// Store-assigned install counter, strictly increasing across installs
    /// for the lifetime of the database. Lets the append path detect that
    /// the session changed under a caller's feet.
    pub generation: u64,
}

impl SessionRecord {
    /// The instant submissions stop being accepted.
    pub fn deadline(&self) -> Timestamp {
        self.started_at.plus_secs(u64::from(self.duration_minutes) * 60)
    }

    /// Whether the deadline has passed (the boundary instant counts).
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.started_at
            .has_expired(u64::from(self.duration_minutes) * 60, now)
    }

    /// Seconds left before the deadline, clamped at zero.
    pub fn remaining_secs(&self, now: Timestamp) -> u64 {
        self.deadline().remaining_from(now)
    }
}

/// Trait for the single-record session store.
pub trait SessionStore {
    /// Atomically install a new active session and clear the leaderboard.
    ///
    /// Both effects commit together or not at all: a failure leaves the
    /// previous session and its board fully authoritative. Returns the
    /// installed record carrying the generation the store assigned.
    fn install_session(&self, session: &NewSession) -> Result<SessionRecord, StoreError>;

    /// The current record, active or not. `None` means no race was ever
    /// opened, or the store was reset.
    fn current_session(&self) -> Result<Option<SessionRecord>, StoreError>;

    /// Flip the current record inactive. A no-op without a record.
    fn deactivate_session(&self) -> Result<(), StoreError>;

    /// Remove the session record and every board row in one atomic step,
    /// the counterpart of `install_session`. The generation counter is not
    /// reset. A no-op on a pristine store.
    fn wipe_session(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(started: u64, minutes: u32) -> SessionRecord {
        SessionRecord {
            problem_text: "Reverse a string".to_owned(),
            duration_minutes: minutes,
            started_at: Timestamp::new(started),
            solution_fingerprint: None,
            active: true,
            generation: 1,
        }
    }

    #[test]
    fn deadline_is_start_plus_minutes() {
        let session = record(1_000, 5);
        assert_eq!(session.deadline(), Timestamp::new(1_300));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let session = record(1_000, 1);
        assert!(!session.is_expired(Timestamp::new(1_059)));
        assert!(session.is_expired(Timestamp::new(1_060)));
    }

    #[test]
    fn remaining_counts_down_then_clamps() {
        let session = record(1_000, 5);
        assert_eq!(session.remaining_secs(Timestamp::new(1_000)), 300);
        assert_eq!(session.remaining_secs(Timestamp::new(1_001)), 299);
        assert_eq!(session.remaining_secs(Timestamp::new(2_000)), 0);
    }
}
