//! Nullable store — thread-safe in-memory storage for testing.

use raceboard_store::board::{AppendOutcome, LeaderboardStore, NewSubmission, SubmissionRecord};
use raceboard_store::session::{NewSession, SessionRecord, SessionStore};
use raceboard_store::StoreError;
use raceboard_types::Timestamp;
use std::sync::{Arc, Mutex};

/// An in-memory session + leaderboard store for testing.
///
/// One mutex guards both tables, so the install-and-clear and
/// check-then-insert units are as atomic as the durable backend's write
/// transactions. Clones share state, mirroring multiple front-end
/// instances on one database.
#[derive(Clone)]
pub struct NullRaceStore {
    inner: Arc<Mutex<Inner>>,
    max_slots: u32,
}

struct Inner {
    session: Option<SessionRecord>,
    board: Vec<SubmissionRecord>,
    next_generation: u64,
    unavailable: bool,
}

impl NullRaceStore {
    pub fn new(max_slots: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: None,
                board: Vec::new(),
                next_generation: 1,
                unavailable: false,
            })),
            max_slots,
        }
    }

    /// Make every subsequent operation fail with a backend error, as if the
    /// database had gone away. For exercising failure paths.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unwrap().unavailable = unavailable;
    }
}

impl Default for NullRaceStore {
    fn default() -> Self {
        Self::new(3)
    }
}

fn check_available(inner: &Inner) -> Result<(), StoreError> {
    if inner.unavailable {
        Err(StoreError::Backend("store unavailable".to_string()))
    } else {
        Ok(())
    }
}

impl SessionStore for NullRaceStore {
    fn install_session(&self, session: &NewSession) -> Result<SessionRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        check_available(&inner)?;
        let record = SessionRecord {
            problem_text: session.problem_text.clone(),
            duration_minutes: session.duration_minutes,
            started_at: session.started_at,
            solution_fingerprint: session.solution_fingerprint,
            active: true,
            generation: inner.next_generation,
        };
        inner.next_generation += 1;
        inner.session = Some(record.clone());
        inner.board.clear();
        Ok(record)
    }

    fn current_session(&self) -> Result<Option<SessionRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        check_available(&inner)?;
        Ok(inner.session.clone())
    }

    fn deactivate_session(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        check_available(&inner)?;
        if let Some(session) = inner.session.as_mut() {
            session.active = false;
        }
        Ok(())
    }

    fn wipe_session(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        check_available(&inner)?;
        inner.session = None;
        inner.board.clear();
        Ok(())
    }
}

impl LeaderboardStore for NullRaceStore {
    fn try_append(
        &self,
        submission: &NewSubmission,
        now: Timestamp,
        expected_generation: u64,
    ) -> Result<AppendOutcome, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        check_available(&inner)?;

        let live = matches!(
            &inner.session,
            Some(s) if s.active && s.generation == expected_generation
        );
        if !live {
            return Ok(AppendOutcome::SessionChanged);
        }

        if let Some(idx) = inner
            .board
            .iter()
            .position(|r| r.participant_name == submission.participant_name)
        {
            return Ok(AppendOutcome::AlreadyListed {
                position: idx as u32 + 1,
                is_correct: inner.board[idx].is_correct,
            });
        }
        if inner.board.len() as u32 >= self.max_slots {
            return Ok(AppendOutcome::Full);
        }

        let last_submitted_at = inner
            .board
            .last()
            .map(|r| r.submitted_at)
            .unwrap_or(Timestamp::new(0));
        inner.board.push(SubmissionRecord {
            participant_name: submission.participant_name.clone(),
            answer: submission.answer.clone(),
            is_correct: submission.is_correct,
            submitted_at: now.max(last_submitted_at),
        });
        Ok(AppendOutcome::Appended {
            position: inner.board.len() as u32,
        })
    }

    fn board(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        check_available(&inner)?;
        Ok(inner
            .board
            .iter()
            .take(self.max_slots as usize)
            .cloned()
            .collect())
    }

    fn board_len(&self) -> Result<u32, StoreError> {
        let inner = self.inner.lock().unwrap();
        check_available(&inner)?;
        Ok(inner.board.len() as u32)
    }

    fn clear_board(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        check_available(&inner)?;
        inner.board.clear();
        Ok(())
    }
}
