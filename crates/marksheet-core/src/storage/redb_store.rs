//! # redb-backed Record Storage
//!
//! A disk-backed record store using the redb embedded database:
//! - ACID transactions (one write transaction per create/save)
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//!
//! Records are encoded with postcard. The id counter lives in the metadata
//! table so ids keep increasing across restarts.

use super::RecordStore;
use crate::{MarksheetError, StudentDraft, StudentId, StudentRecord};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

/// Table for records: StudentId(u64) -> serialized StudentRecord bytes
const STUDENTS: TableDefinition<u64, &[u8]> = TableDefinition::new("students");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

const NEXT_ID_KEY: &str = "next_student_id";

fn io_err(e: impl std::fmt::Display) -> MarksheetError {
    MarksheetError::IoError(e.to_string())
}

fn encode(record: &StudentRecord) -> Result<Vec<u8>, MarksheetError> {
    postcard::to_allocvec(record).map_err(|e| MarksheetError::SerializationError(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<StudentRecord, MarksheetError> {
    postcard::from_bytes(bytes).map_err(|e| MarksheetError::SerializationError(e.to_string()))
}

/// A disk-backed record store using redb.
pub struct RedbStore {
    db: Database,
    /// Next id to hand out. Mirrors the metadata table after each commit.
    next_id: u64,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a record database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MarksheetError> {
        let db = Database::create(path.as_ref()).map_err(io_err)?;

        // Initialize tables if they don't exist
        {
            let write_txn = db.begin_write().map_err(io_err)?;
            let _ = write_txn.open_table(STUDENTS).map_err(io_err)?;
            let _ = write_txn.open_table(METADATA).map_err(io_err)?;
            write_txn.commit().map_err(io_err)?;
        }

        let next_id = {
            let read_txn = db.begin_read().map_err(io_err)?;
            let table = read_txn.open_table(METADATA).map_err(io_err)?;
            table
                .get(NEXT_ID_KEY)
                .map_err(io_err)?
                .map(|v| v.value())
                .unwrap_or(1)
        };

        Ok(Self { db, next_id })
    }

}

impl RecordStore for RedbStore {
    fn create(&mut self, draft: StudentDraft) -> Result<StudentRecord, MarksheetError> {
        let id = StudentId(self.next_id);
        let next_id = self.next_id.saturating_add(1);
        let record = draft.into_record(id);
        let bytes = encode(&record)?;

        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut students = write_txn.open_table(STUDENTS).map_err(io_err)?;
            students.insert(id.0, bytes.as_slice()).map_err(io_err)?;

            let mut meta = write_txn.open_table(METADATA).map_err(io_err)?;
            meta.insert(NEXT_ID_KEY, next_id).map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)?;

        // Update in-memory state only after successful commit.
        self.next_id = next_id;
        Ok(record)
    }

    fn find_by_id(&self, id: StudentId) -> Result<StudentRecord, MarksheetError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let students = read_txn.open_table(STUDENTS).map_err(io_err)?;
        let guard = students
            .get(id.0)
            .map_err(io_err)?
            .ok_or(MarksheetError::NotFound(id))?;
        decode(guard.value())
    }

    fn save(&mut self, record: &StudentRecord) -> Result<StudentRecord, MarksheetError> {
        let id = record.id();
        let bytes = encode(record)?;

        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut students = write_txn.open_table(STUDENTS).map_err(io_err)?;
            let exists = students.get(id.0).map_err(io_err)?.is_some();
            if !exists {
                return Err(MarksheetError::NotFound(id));
            }
            students.insert(id.0, bytes.as_slice()).map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)?;

        Ok(record.clone())
    }

    fn count(&self) -> Result<usize, MarksheetError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let students = read_txn.open_table(STUDENTS).map_err(io_err)?;
        let len = students.len().map_err(io_err)?;
        Ok(len as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================
