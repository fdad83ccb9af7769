//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions, RwTxn};

use raceboard_types::RaceParams;

use crate::LmdbError;

/// The schema version that the current code expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub(crate) const SESSION_KEY: &[u8] = b"current";
pub(crate) const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";
const NEXT_GENERATION_KEY: &[u8] = b"next_generation";

/// Default map size. A session record plus a handful of board rows is
/// kilobytes; 16 MiB covers years of classroom use.
const DEFAULT_MAP_SIZE: usize = 16 * 1024 * 1024;
const MAX_DBS: u32 = 3;

/// LMDB-backed store implementing both storage traits over one environment.
///
/// Clones share the environment, so several front-end instances in one
/// process can point at the same database.
#[derive(Clone)]
pub struct LmdbRaceStore {
    pub(crate) env: Arc<Env>,
    pub(crate) session_db: Database<Bytes, Bytes>,
    pub(crate) board_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
    pub(crate) max_slots: u32,
}

impl LmdbRaceStore {
    /// Open or create the store at `path` (a directory, created if absent).
    ///
    /// Refuses a database stamped with a newer schema version than this
    /// code understands; a fresh database is stamped with the current one.
    pub fn open(path: &Path, params: &RaceParams) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)
            .map_err(|e| LmdbError::Heed(format!("create {}: {}", path.display(), e)))?;

        // Safety: no other environment in this process maps the same
        // directory; `open` hands each path its own mmap.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(DEFAULT_MAP_SIZE)
                .max_dbs(MAX_DBS)
                .open(path)
        }?;

        let mut wtxn = env.write_txn()?;
        let session_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("session"))?;
        let board_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("board"))?;
        let meta_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("meta"))?;
        check_schema(&meta_db, &mut wtxn)?;
        wtxn.commit()?;

        Ok(Self {
            env: Arc::new(env),
            session_db,
            board_db,
            meta_db,
            max_slots: params.max_slots,
        })
    }
}

/// Stamp a fresh database with the current schema version, accept a matching
/// one, refuse a newer one.
fn check_schema(meta_db: &Database<Bytes, Bytes>, wtxn: &mut RwTxn) -> Result<(), LmdbError> {
    let stored = match meta_db.get(wtxn, SCHEMA_VERSION_KEY)? {
        Some(bytes) if bytes.len() == 4 => {
            let arr: [u8; 4] = bytes.try_into().expect("checked length");
            u32::from_le_bytes(arr)
        }
        Some(_) => {
            return Err(LmdbError::Corruption(
                "schema_version has unexpected byte length".to_string(),
            ))
        }
        None => 0,
    };

    if stored == 0 {
        meta_db.put(wtxn, SCHEMA_VERSION_KEY, &CURRENT_SCHEMA_VERSION.to_le_bytes())?;
        tracing::info!(version = CURRENT_SCHEMA_VERSION, "initialized fresh database schema");
        return Ok(());
    }
    if stored > CURRENT_SCHEMA_VERSION {
        return Err(LmdbError::SchemaVersion {
            stored,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    tracing::info!(version = stored, "database schema is up to date");
    Ok(())
}

/// Allocate the next session generation inside `wtxn`.
///
/// The counter lives in the meta table and never resets, so a generation
/// issued before a wipe can never collide with one issued after it.
pub(crate) fn next_generation(
    meta_db: &Database<Bytes, Bytes>,
    wtxn: &mut RwTxn,
) -> Result<u64, LmdbError> {
    let next = match meta_db.get(wtxn, NEXT_GENERATION_KEY)? {
        Some(bytes) if bytes.len() == 8 => {
            let arr: [u8; 8] = bytes.try_into().expect("checked length");
            u64::from_le_bytes(arr)
        }
        Some(_) => {
            return Err(LmdbError::Corruption(
                "next_generation has unexpected byte length".to_string(),
            ))
        }
        None => 1,
    };
    meta_db.put(wtxn, NEXT_GENERATION_KEY, &(next + 1).to_le_bytes())?;
    Ok(next)
}
