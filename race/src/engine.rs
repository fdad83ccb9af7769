//! The race state machine: open, submit, status, close, reset.

use serde::Serialize;
use zeroize::Zeroizing;

use raceboard_store::board::{AppendOutcome, LeaderboardStore, NewSubmission};
use raceboard_store::session::{NewSession, SessionStore};
use raceboard_types::{sanitize_participant_name, Clock, RaceParams};

use crate::error::RaceError;
use crate::validator;
use crate::view::{OpenRaceView, RaceStatus, SessionHandle};

/// Why a submission was turned away.
///
/// These are routine outcomes, not faults; the presentation layer picks a
/// distinct message for each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    /// No race is running: never opened, closed, or reset.
    NoActiveSession,
    /// The deadline has passed.
    DeadlineExpired,
    /// The participant name was empty after cleaning.
    EmptyName,
    /// Every leaderboard slot is taken.
    Full,
}

/// Outcome of a submission attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SubmitOutcome {
    /// The submission holds a slot. `position` is the 1-based acceptance
    /// rank; re-submitting a listed name returns the original entry.
    Accepted {
        position: u32,
        /// `Some` iff the session verifies answers.
        is_correct: Option<bool>,
    },
    Rejected(RejectReason),
}

/// The bounded, time-windowed leaderboard session.
///
/// Stateless between calls: every operation re-reads the store, so engines
/// in different processes, or on either side of a restart, agree on the
/// race state. Deadlines are checked against a clock sample taken once per
/// call, never enforced by timers.
pub struct RaceEngine<S, C> {
    store: S,
    clock: C,
    params: RaceParams,
}

impl<S, C> RaceEngine<S, C>
where
    S: SessionStore + LeaderboardStore,
    C: Clock,
{
    pub fn new(store: S, clock: C, params: RaceParams) -> Self {
        Self {
            store,
            clock,
            params,
        }
    }

    /// The backing store, for inspection in tests and maintenance tooling.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn params(&self) -> &RaceParams {
        &self.params
    }

    /// Open a new race, superseding any prior session and clearing the
    /// leaderboard in the same store transaction.
    ///
    /// A `solution` that is empty after trimming disables verification; an
    /// empty hidden answer is always instructor error, never a solution.
    /// The solution copy is wiped once the fingerprint is taken.
    pub fn open(
        &self,
        problem_text: &str,
        duration_minutes: u32,
        solution: Option<&str>,
    ) -> Result<SessionHandle, RaceError> {
        let problem = problem_text.trim();
        if problem.is_empty() {
            return Err(RaceError::EmptyProblem);
        }
        if duration_minutes == 0 || duration_minutes > self.params.max_duration_minutes {
            return Err(RaceError::DurationOutOfRange {
                min: 1,
                max: self.params.max_duration_minutes,
                got: duration_minutes,
            });
        }

        let solution_fingerprint = match solution {
            Some(raw) => {
                let cleaned = Zeroizing::new(raw.trim().to_owned());
                if cleaned.is_empty() {
                    None
                } else {
                    Some(validator::fingerprint(&cleaned))
                }
            }
            None => None,
        };

        let record = self.store.install_session(&NewSession {
            problem_text: problem.to_owned(),
            duration_minutes,
            started_at: self.clock.now(),
            solution_fingerprint,
        })?;

        tracing::info!(
            duration_minutes,
            verification = record.solution_fingerprint.is_some(),
            "race opened"
        );
        Ok(SessionHandle {
            started_at: record.started_at,
            deadline: record.deadline(),
            verification: record.solution_fingerprint.is_some(),
        })
    }

    /// A snapshot of the race as of one clock sample.
    ///
    /// Pure read; always safe to call, with or without a race running.
    pub fn status(&self) -> Result<RaceStatus, RaceError> {
        let session = match self.store.current_session()? {
            Some(s) if s.active => s,
            _ => return Ok(RaceStatus::Idle),
        };
        let now = self.clock.now();
        let board = self.store.board()?;

        if session.is_expired(now) {
            return Ok(RaceStatus::Expired {
                problem_text: session.problem_text,
                board,
            });
        }
        let slots_remaining = self.params.max_slots.saturating_sub(board.len() as u32);
        let remaining_secs = session.remaining_secs(now);
        Ok(RaceStatus::Open(OpenRaceView {
            problem_text: session.problem_text,
            remaining_secs,
            board,
            slots_remaining,
            verification: session.solution_fingerprint.is_some(),
        }))
    }

    /// Try to claim a leaderboard slot.
    ///
    /// Checks run in a fixed order: live session, deadline, name, then the
    /// capacity-and-duplicate check, which is a single atomic store
    /// operation. That operation re-verifies the session generation; if an
    /// open, close, or reset raced in between, the whole decision is re-run
    /// against the fresh state instead of trusting the stale read.
    /// Generations only move forward, so the loop converges.
    pub fn submit(
        &self,
        participant_name: &str,
        answer: Option<&str>,
    ) -> Result<SubmitOutcome, RaceError> {
        loop {
            let session = match self.store.current_session()? {
                Some(s) if s.active => s,
                _ => return Ok(SubmitOutcome::Rejected(RejectReason::NoActiveSession)),
            };
            let now = self.clock.now();
            if session.is_expired(now) {
                return Ok(SubmitOutcome::Rejected(RejectReason::DeadlineExpired));
            }
            let name =
                match sanitize_participant_name(participant_name, self.params.max_name_len) {
                    Some(name) => name,
                    None => return Ok(SubmitOutcome::Rejected(RejectReason::EmptyName)),
                };

            let (answer_kept, is_correct) = match &session.solution_fingerprint {
                Some(expected) => match answer {
                    Some(text) => (Some(text.to_owned()), Some(validator::verify(text, expected))),
                    // No answer on a verifying session is simply wrong.
                    None => (None, Some(false)),
                },
                // Without verification there is nothing to judge, and the
                // answer text is not worth keeping.
                None => (None, None),
            };

            let submission = NewSubmission {
                participant_name: name,
                answer: answer_kept,
                is_correct,
            };
            match self.store.try_append(&submission, now, session.generation)? {
                AppendOutcome::Appended { position } => {
                    tracing::debug!(position, "submission accepted");
                    return Ok(SubmitOutcome::Accepted {
                        position,
                        is_correct,
                    });
                }
                AppendOutcome::AlreadyListed {
                    position,
                    is_correct,
                } => {
                    tracing::debug!(position, "repeat submission; the first entry stands");
                    return Ok(SubmitOutcome::Accepted {
                        position,
                        is_correct,
                    });
                }
                AppendOutcome::Full => {
                    tracing::debug!("submission rejected: leaderboard full");
                    return Ok(SubmitOutcome::Rejected(RejectReason::Full));
                }
                AppendOutcome::SessionChanged => {
                    tracing::debug!("session changed mid-submit, re-evaluating");
                    continue;
                }
            }
        }
    }

    /// Stop the race.
    ///
    /// The record is deactivated, never deleted: `status` reports idle and
    /// submissions are rejected as if no race existed, but the row stays in
    /// the store. A no-op when nothing is running.
    pub fn close(&self) -> Result<(), RaceError> {
        self.store.deactivate_session()?;
        tracing::info!("race closed");
        Ok(())
    }

    /// Wipe the race entirely: session record and every board row, in one
    /// atomic store step. A submission racing this wipe either lands before
    /// it or falls through to `NoActiveSession`.
    pub fn reset(&self) -> Result<(), RaceError> {
        self.store.wipe_session()?;
        tracing::info!("race reset");
        Ok(())
    }
}
