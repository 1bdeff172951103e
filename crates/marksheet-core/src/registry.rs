//! # Registry Module
//!
//! The request-handling core: runs the create and update-marks operations
//! against a storage backend.
//!
//! ## Storage Backends
//!
//! Registry supports two storage backends:
//! - `InMemory`: Uses `MemoryStore` (fast, volatile)
//! - `Persistent`: Uses `RedbStore` for disk-backed ACID storage
//!
//! Each operation performs at most one store read and one store write.
//! Validation always completes before the write, so a rejected request
//! leaves the store untouched.

use crate::storage::{MemoryStore, RecordStore, RedbStore};
use crate::validation::{validate_for_creation, validate_for_update};
use crate::{MarksheetError, NewStudent, StudentId, StudentRecord};
use chrono::{Local, NaiveDate};
use std::path::Path;

/// Storage backend for a Registry.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory map (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

/// Entry point for all record operations.
#[derive(Debug, Default)]
pub struct Registry {
    backend: StorageBackend,
}

impl Registry {
    /// Create a new empty registry with in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with persistent redb storage.
    ///
    /// Opens or creates a redb database at the given path.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, MarksheetError> {
        Ok(Self {
            backend: StorageBackend::Persistent(RedbStore::open(path)?),
        })
    }

    /// Short backend name for status output.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            StorageBackend::InMemory(_) => "memory",
            StorageBackend::Persistent(_) => "redb",
        }
    }

    fn store(&self) -> &dyn RecordStore {
        match &self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    fn store_mut(&mut self) -> &mut dyn RecordStore {
        match &mut self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Validate, derive and store a new record, judging age against the
    /// local current date.
    pub fn create_student(&mut self, input: &NewStudent) -> Result<StudentRecord, MarksheetError> {
        self.create_student_on(input, Local::now().date_naive())
    }

    /// Same as [`Self::create_student`], with an explicit reference date.
    pub fn create_student_on(
        &mut self,
        input: &NewStudent,
        today: NaiveDate,
    ) -> Result<StudentRecord, MarksheetError> {
        let draft = validate_for_creation(input, today)?;
        self.store_mut().create(draft)
    }

    /// Replace the marks of an existing record and recompute its results.
    ///
    /// An unknown id is reported before the marks are looked at.
    pub fn update_student_marks(
        &mut self,
        id: StudentId,
        marks1: Option<i64>,
        marks2: Option<i64>,
        marks3: Option<i64>,
    ) -> Result<StudentRecord, MarksheetError> {
        let mut record = self.store().find_by_id(id)?;
        let marks = validate_for_update(marks1, marks2, marks3)?;
        record.replace_marks(marks);
        self.store_mut().save(&record)
    }

    /// Fetch a single record.
    pub fn find_student(&self, id: StudentId) -> Result<StudentRecord, MarksheetError> {
        self.store().find_by_id(id)
    }

    /// Number of stored records.
    pub fn student_count(&self) -> Result<usize, MarksheetError> {
        self.store().count()
    }
}

// =============================================================================
// TESTS
// =============================================================================
