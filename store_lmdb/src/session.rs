//! LMDB implementation of SessionStore.

use raceboard_store::session::{NewSession, SessionRecord, SessionStore};
use raceboard_store::StoreError;

use crate::environment::{next_generation, LmdbRaceStore, SESSION_KEY};
use crate::LmdbError;

impl SessionStore for LmdbRaceStore {
    fn install_session(&self, session: &NewSession) -> Result<SessionRecord, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        let generation = next_generation(&self.meta_db, &mut wtxn)?;
        let record = SessionRecord {
            problem_text: session.problem_text.clone(),
            duration_minutes: session.duration_minutes,
            started_at: session.started_at,
            solution_fingerprint: session.solution_fingerprint,
            active: true,
            generation,
        };
        let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
        self.session_db
            .put(&mut wtxn, SESSION_KEY, &bytes)
            .map_err(LmdbError::from)?;
        // The new session and the empty board land in one commit; a crash
        // in between cannot leave the old podium under a new problem.
        self.board_db.clear(&mut wtxn).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(record)
    }

    fn current_session(&self) -> Result<Option<SessionRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .session_db
            .get(&rtxn, SESSION_KEY)
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => {
                let record = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn deactivate_session(&self) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut record = match self
            .session_db
            .get(&wtxn, SESSION_KEY)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => bincode::deserialize::<SessionRecord>(bytes).map_err(LmdbError::from)?,
            None => return Ok(()),
        };
        record.active = false;
        let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
        self.session_db
            .put(&mut wtxn, SESSION_KEY, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn wipe_session(&self) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.session_db
            .delete(&mut wtxn, SESSION_KEY)
            .map_err(LmdbError::from)?;
        // Session and board vanish in one commit; a failure in between
        // cannot strand orphan rows behind an absent session.
        self.board_db.clear(&mut wtxn).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
