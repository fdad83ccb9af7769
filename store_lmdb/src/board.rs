//! LMDB implementation of LeaderboardStore.
//!
//! Board keys are big-endian `u32` sequence numbers, so LMDB's key order is
//! insertion order. The append path re-reads the session record inside its
//! own write transaction: the generation, duplicate, and capacity checks
//! commit atomically with the insert, which is what keeps the podium within
//! its slot cap under racing submitters.

use raceboard_store::board::{AppendOutcome, LeaderboardStore, NewSubmission, SubmissionRecord};
use raceboard_store::session::SessionRecord;
use raceboard_store::StoreError;
use raceboard_types::Timestamp;

use crate::environment::{LmdbRaceStore, SESSION_KEY};
use crate::LmdbError;

fn seq_key(seq: u32) -> [u8; 4] {
    seq.to_be_bytes()
}

fn decode_seq(key: &[u8]) -> Result<u32, LmdbError> {
    let arr: [u8; 4] = key
        .try_into()
        .map_err(|_| LmdbError::Corruption("board key is not a u32 sequence".to_string()))?;
    Ok(u32::from_be_bytes(arr))
}

impl LeaderboardStore for LmdbRaceStore {
    fn try_append(
        &self,
        submission: &NewSubmission,
        now: Timestamp,
        expected_generation: u64,
    ) -> Result<AppendOutcome, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        // The caller decided to submit against a session it read earlier;
        // the decision only counts if that session is still the live one.
        let session = match self
            .session_db
            .get(&wtxn, SESSION_KEY)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => bincode::deserialize::<SessionRecord>(bytes).map_err(LmdbError::from)?,
            None => return Ok(AppendOutcome::SessionChanged),
        };
        if !session.active || session.generation != expected_generation {
            return Ok(AppendOutcome::SessionChanged);
        }

        let mut count: u32 = 0;
        let mut last_seq: u32 = 0;
        let mut last_submitted_at = Timestamp::new(0);
        let mut existing: Option<(u32, Option<bool>)> = None;
        {
            let iter = self.board_db.iter(&wtxn).map_err(LmdbError::from)?;
            for entry in iter {
                let (key, value) = entry.map_err(LmdbError::from)?;
                let record: SubmissionRecord =
                    bincode::deserialize(value).map_err(LmdbError::from)?;
                count += 1;
                last_seq = decode_seq(key)?;
                last_submitted_at = record.submitted_at;
                if existing.is_none() && record.participant_name == submission.participant_name {
                    existing = Some((count, record.is_correct));
                }
            }
        }

        if let Some((position, is_correct)) = existing {
            return Ok(AppendOutcome::AlreadyListed {
                position,
                is_correct,
            });
        }
        if count >= self.max_slots {
            return Ok(AppendOutcome::Full);
        }

        let record = SubmissionRecord {
            participant_name: submission.participant_name.clone(),
            answer: submission.answer.clone(),
            is_correct: submission.is_correct,
            // Timestamps within a session never decrease, even if the wall
            // clock does.
            submitted_at: now.max(last_submitted_at),
        };
        let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
        self.board_db
            .put(&mut wtxn, &seq_key(last_seq + 1), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(AppendOutcome::Appended { position: count + 1 })
    }

    fn board(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut rows = Vec::new();
        let iter = self.board_db.iter(&rtxn).map_err(LmdbError::from)?;
        for entry in iter {
            if rows.len() as u32 >= self.max_slots {
                // Excess rows are invisible; the slot cap holds even if the
                // database was written by a buggier version.
                break;
            }
            let (_key, value) = entry.map_err(LmdbError::from)?;
            let record: SubmissionRecord = bincode::deserialize(value).map_err(LmdbError::from)?;
            rows.push(record);
        }
        Ok(rows)
    }

    fn board_len(&self) -> Result<u32, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.board_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count as u32)
    }

    fn clear_board(&self) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.board_db.clear(&mut wtxn).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
