//! SQLite-backed record store for submissions.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension as _};

use crate::error::{Error, Result};
use crate::submission::{now_rfc3339_micros, Submission, SubmissionDraft};

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS submissions (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  lab_name TEXT NOT NULL,
  model_name TEXT NOT NULL,
  compute REAL NOT NULL,
  cbrn_safeguards INTEGER NOT NULL DEFAULT 0,
  signature TEXT NOT NULL,
  created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_submissions_created_at ON submissions(created_at);
"#;

/// Single-table persistence for submissions.
///
/// Ids are assigned by SQLite and strictly increase across inserts;
/// `created_at` is assigned here at insert time. Signatures are stored
/// verbatim, never recomputed.
pub struct SubmissionStore {
    conn: Mutex<Connection>,
}

impl SubmissionStore {
    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Open or create a store at the given path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        conn.execute_batch(CREATE_TABLES)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store for tests and ephemeral runs.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_TABLES)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Persist a validated draft with its fingerprint. The id and creation
    /// timestamp are assigned here; the full stored record is returned.
    pub fn insert(&self, draft: &SubmissionDraft, signature: &str) -> Result<Submission> {
        let created_at = now_rfc3339_micros();
        let conn = self.lock_conn();
        conn.execute(
            "INSERT INTO submissions (lab_name, model_name, compute, cbrn_safeguards, signature, created_at) VALUES (?,?,?,?,?,?)",
            params![
                draft.lab_name,
                draft.model_name,
                draft.compute,
                draft.cbrn_safeguards,
                signature,
                created_at,
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Submission {
            id,
            lab_name: draft.lab_name.clone(),
            model_name: draft.model_name.clone(),
            compute: draft.compute,
            cbrn_safeguards: draft.cbrn_safeguards,
            signature: signature.to_string(),
            created_at,
        })
    }

    /// Most recent submission, or `None` when the store is empty. Ties on
    /// `created_at` resolve to the highest id.
    pub fn latest(&self) -> Result<Option<Submission>> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare(
            "SELECT id, lab_name, model_name, compute, cbrn_safeguards, signature, created_at FROM submissions ORDER BY created_at DESC, id DESC LIMIT 1",
        )?;
        let record = stmt.query_row([], row_to_submission).optional()?;
        Ok(record)
    }

    /// Look up a submission by id; absent is not an error.
    pub fn get(&self, id: i64) -> Result<Option<Submission>> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare(
            "SELECT id, lab_name, model_name, compute, cbrn_safeguards, signature, created_at FROM submissions WHERE id = ?",
        )?;
        let record = stmt.query_row(params![id], row_to_submission).optional()?;
        Ok(record)
    }

    /// Look up a submission that must exist.
    pub fn require(&self, id: i64) -> Result<Submission> {
        self.get(id)?.ok_or(Error::NotFound { id })
    }

    /// Total number of stored submissions.
    pub fn count(&self) -> Result<u64> {
        let conn = self.lock_conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM submissions", [], |row| row.get(0))?;
        Ok(count.try_into().unwrap_or(0))
    }
}

fn row_to_submission(row: &rusqlite::Row<'_>) -> rusqlite::Result<Submission> {
    Ok(Submission {
        id: row.get(0)?,
        lab_name: row.get(1)?,
        model_name: row.get(2)?,
        compute: row.get(3)?,
        cbrn_safeguards: row.get(4)?,
        signature: row.get(5)?,
        created_at: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    fn draft(lab: &str) -> SubmissionDraft {
        SubmissionDraft {
            lab_name: lab.to_string(),
            model_name: "TITAN-V9".to_string(),
            compute: 5e24,
            cbrn_safeguards: true,
        }
    }

    #[test]
    fn insert_and_get_roundtrip() {
        let store = SubmissionStore::in_memory().unwrap();
        let stored = store.insert(&draft("OMEGA-LABS-SF"), "aa11").unwrap();
        let loaded = store.get(stored.id).unwrap().expect("missing record");
        assert_eq!(loaded, stored);
    }

    #[test]
    fn ids_increase_across_inserts() {
        let store = SubmissionStore::in_memory().unwrap();
        let first = store.insert(&draft("FIRST"), "s1").unwrap();
        let second = store.insert(&draft("SECOND"), "s2").unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = SubmissionStore::in_memory().unwrap();
        assert!(store.get(9999).unwrap().is_none());
    }

    #[test]
    fn require_unknown_id_fails() {
        let store = SubmissionStore::in_memory().unwrap();
        let err = store.require(9999).unwrap_err();
        assert!(matches!(err, Error::NotFound { id: 9999 }));
    }

    #[test]
    fn latest_on_empty_store_is_none() {
        let store = SubmissionStore::in_memory().unwrap();
        assert!(store.latest().unwrap().is_none());
    }

    #[test]
    fn latest_returns_most_recent_insert() {
        let store = SubmissionStore::in_memory().unwrap();
        let first = store.insert(&draft("FIRST"), "s1").unwrap();

        let latest = store.latest().unwrap().expect("missing record");
        assert_eq!(latest.id, first.id);
        assert_eq!(latest.lab_name, "FIRST");

        let second = store.insert(&draft("SECOND"), "s2").unwrap();

        let latest = store.latest().unwrap().expect("missing record");
        assert_eq!(latest.id, second.id);
        assert_eq!(latest.lab_name, "SECOND");
    }

    #[test]
    fn count_tracks_inserts() {
        let store = SubmissionStore::in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        store.insert(&draft("A"), "s1").unwrap();
        store.insert(&draft("B"), "s2").unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("submissions.db");

        let id = {
            let store = SubmissionStore::new(&path).unwrap();
            store.insert(&draft("OMEGA-LABS-SF"), "aa11").unwrap().id
        };

        let reopened = SubmissionStore::new(&path).unwrap();
        let loaded = reopened.get(id).unwrap().expect("missing record");
        assert_eq!(loaded.lab_name, "OMEGA-LABS-SF");
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deeper").join("store.db");
        let store = SubmissionStore::new(&path).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(path.exists());
    }
}
