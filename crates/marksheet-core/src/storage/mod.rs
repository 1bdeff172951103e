//! # Record Storage
//!
//! The [`RecordStore`] trait and its two backends:
//! - [`MemoryStore`]: `BTreeMap` keyed by id (volatile)
//! - [`RedbStore`]: redb embedded database (ACID, persistent)

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::{MarksheetError, StudentDraft, StudentId, StudentRecord};

/// Keyed storage for student records.
///
/// Implementations guarantee that each `create` and `save` is applied
/// atomically for its id.
pub trait RecordStore {
    /// Assign the next id to `draft`, persist it and return the stored record.
    fn create(&mut self, draft: StudentDraft) -> Result<StudentRecord, MarksheetError>;

    /// Fetch a record, failing with `NotFound` when the id is unknown.
    fn find_by_id(&self, id: StudentId) -> Result<StudentRecord, MarksheetError>;

    /// Persist an update to a record that was previously created.
    fn save(&mut self, record: &StudentRecord) -> Result<StudentRecord, MarksheetError>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, MarksheetError>;
}
