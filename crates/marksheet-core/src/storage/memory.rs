//! In-memory record store.

use super::RecordStore;
use crate::{MarksheetError, StudentDraft, StudentId, StudentRecord};
use std::collections::BTreeMap;

/// Volatile store backed by a `BTreeMap`. Ids start at 1.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: BTreeMap<StudentId, StudentRecord>,
    next_id: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn create(&mut self, draft: StudentDraft) -> Result<StudentRecord, MarksheetError> {
        let id = StudentId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let record = draft.into_record(id);
        self.records.insert(id, record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: StudentId) -> Result<StudentRecord, MarksheetError> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(MarksheetError::NotFound(id))
    }

    fn save(&mut self, record: &StudentRecord) -> Result<StudentRecord, MarksheetError> {
        let slot = self
            .records
            .get_mut(&record.id())
            .ok_or(MarksheetError::NotFound(record.id()))?;
        *slot = record.clone();
        Ok(record.clone())
    }

    fn count(&self) -> Result<usize, MarksheetError> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_for_update;
    use crate::{Gender, Section};
    use chrono::NaiveDate;

    fn draft(first_name: &str) -> StudentDraft {
        StudentDraft {
            first_name: first_name.to_string(),
            last_name: "Lee".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2007, 1, 1).expect("date"),
            section: Section::B,
            gender: Gender::M,
            marks: validate_for_update(Some(60), Some(70), Some(80)).expect("marks"),
        }
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut store = MemoryStore::new();

        let a = store.create(draft("Ann")).expect("create");
        let b = store.create(draft("Bob")).expect("create");

        assert_eq!(a.id(), StudentId(1));
        assert_eq!(b.id(), StudentId(2));
        assert_eq!(store.count().expect("count"), 2);
    }

    #[test]
    fn find_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(
            store.find_by_id(StudentId(999)),
            Err(MarksheetError::NotFound(StudentId(999)))
        );
    }

    #[test]
    fn save_replaces_existing_record() {
        let mut store = MemoryStore::new();
        let mut record = store.create(draft("Ann")).expect("create");

        record.replace_marks(validate_for_update(Some(10), Some(20), Some(30)).expect("marks"));
        store.save(&record).expect("save");

        let fetched = store.find_by_id(record.id()).expect("find");
        assert_eq!(fetched.results().total(), 60);
    }

    #[test]
    fn save_of_unknown_record_is_not_found() {
        let mut store = MemoryStore::new();
        let mut other = MemoryStore::new();
        let record = other.create(draft("Ann")).expect("create");

        assert_eq!(
            store.save(&record),
            Err(MarksheetError::NotFound(StudentId(1)))
        );
        assert_eq!(store.count().expect("count"), 0);
    }
}
