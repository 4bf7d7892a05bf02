use std::sync::Arc;

use serde::de::DeserializeOwned;
use storage::local_store::LocalStore;
use study_core::model::{LectureId, LevelId, Subject, SubjectId};
use study_core::{LastRead, ProgressRecord};

use crate::error::LocalStateError;

pub const OPENED_LECTURES_KEY: &str = "opened_lectures";
pub const LAST_READ_KEY: &str = "last_read";

/// Reads a JSON value from the local store. Absent keys and undecodable
/// values both read as `None`; the latter is logged.
fn read_json<T: DeserializeOwned>(
    store: &dyn LocalStore,
    key: &'static str,
) -> Result<Option<T>, LocalStateError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring unreadable local state");
            Ok(None)
        }
    }
}

fn write_json<T: serde::Serialize>(
    store: &dyn LocalStore,
    key: &'static str,
    value: &T,
) -> Result<(), LocalStateError> {
    let raw =
        serde_json::to_string(value).map_err(|source| LocalStateError::Encode { key, source })?;
    store.set(key, &raw)?;
    Ok(())
}

/// Persists which lectures were opened and which was opened last.
///
/// Every call is a read-modify-write against the local store.
#[derive(Clone)]
pub struct ProgressTracker {
    store: Arc<dyn LocalStore>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Current record; missing state reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `LocalStateError::Storage` if the store cannot be read.
    pub fn load(&self) -> Result<ProgressRecord, LocalStateError> {
        let opened: Vec<LectureId> =
            read_json(self.store.as_ref(), OPENED_LECTURES_KEY)?.unwrap_or_default();
        let last_read: Option<LastRead> = read_json(self.store.as_ref(), LAST_READ_KEY)?;
        Ok(ProgressRecord::from_parts(opened, last_read))
    }

    /// Add a lecture to the opened set.
    ///
    /// # Errors
    ///
    /// Returns `LocalStateError` if the store cannot be read or written.
    pub fn record_opened(&self, lecture_id: &LectureId) -> Result<ProgressRecord, LocalStateError> {
        let mut record = self.load()?;
        if record.record_opened(lecture_id.clone()) {
            write_json(self.store.as_ref(), OPENED_LECTURES_KEY, &record.opened())?;
        }
        Ok(record)
    }

    /// # Errors
    ///
    /// Returns `LocalStateError` if the store cannot be read or written.
    pub fn record_last_read(&self, last_read: LastRead) -> Result<ProgressRecord, LocalStateError> {
        let mut record = self.load()?;
        write_json(self.store.as_ref(), LAST_READ_KEY, &last_read)?;
        record.record_last_read(last_read);
        Ok(record)
    }

    /// What selecting a lecture does: mark it opened and make it the last read.
    ///
    /// # Errors
    ///
    /// Returns `LocalStateError` if the store cannot be read or written.
    pub fn open_lecture(
        &self,
        level_id: &LevelId,
        subject_id: &SubjectId,
        lecture_id: &LectureId,
    ) -> Result<ProgressRecord, LocalStateError> {
        self.record_opened(lecture_id)?;
        let record = self.record_last_read(LastRead {
            lecture_id: lecture_id.clone(),
            subject_id: subject_id.clone(),
            level_id: level_id.clone(),
        })?;
        tracing::debug!(lecture = %lecture_id, opened = record.opened().len(), "lecture opened");
        Ok(record)
    }

    /// # Errors
    ///
    /// Returns `LocalStateError::Storage` if the store cannot be read.
    pub fn subject_progress(&self, subject: &Subject) -> Result<u8, LocalStateError> {
        Ok(self.load()?.subject_progress(subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::local_store::InMemoryLocalStore;
    use study_core::Catalog;

    fn tracker() -> (ProgressTracker, Arc<InMemoryLocalStore>) {
        let store = Arc::new(InMemoryLocalStore::new());
        (ProgressTracker::new(store.clone()), store)
    }

    fn ids(level: &str, subject: &str, lecture: &str) -> (LevelId, SubjectId, LectureId) {
        (
            LevelId::new(level).unwrap(),
            SubjectId::new(subject).unwrap(),
            LectureId::new(lecture).unwrap(),
        )
    }

    #[test]
    fn empty_store_reads_as_empty_record() {
        let (tracker, _) = tracker();
        assert_eq!(tracker.load().unwrap(), ProgressRecord::new());
    }

    #[test]
    fn opening_a_lecture_moves_subject_from_zero_to_fifty() {
        let (tracker, _) = tracker();
        let catalog = Catalog::bundled().unwrap();
        let subject = catalog.lookup_subject("level-2", "os-security").unwrap();
        assert_eq!(tracker.subject_progress(subject).unwrap(), 0);

        let (level, subject_id, lecture) = ids("level-2", "os-security", "os-lec-1");
        tracker.open_lecture(&level, &subject_id, &lecture).unwrap();

        assert_eq!(tracker.subject_progress(subject).unwrap(), 50);
    }

    #[test]
    fn open_lecture_writes_both_keys() {
        let (tracker, store) = tracker();
        let (level, subject, lecture) = ids("level-2", "ecommerce", "ecom-lec-2");
        tracker.open_lecture(&level, &subject, &lecture).unwrap();
        tracker.open_lecture(&level, &subject, &lecture).unwrap();

        assert_eq!(
            store.get(OPENED_LECTURES_KEY).unwrap().as_deref(),
            Some(r#"["ecom-lec-2"]"#)
        );
        assert_eq!(
            store.get(LAST_READ_KEY).unwrap().as_deref(),
            Some(r#"{"lectureId":"ecom-lec-2","subjectId":"ecommerce","levelId":"level-2"}"#)
        );
    }

    #[test]
    fn last_read_follows_the_latest_open() {
        let (tracker, _) = tracker();
        let (level, subject, first) = ids("level-2", "os-security", "os-lec-1");
        let (_, _, second) = ids("level-2", "os-security", "os-lec-2");
        tracker.open_lecture(&level, &subject, &first).unwrap();
        tracker.open_lecture(&level, &subject, &second).unwrap();
        tracker.open_lecture(&level, &subject, &first).unwrap();

        let record = tracker.load().unwrap();
        assert_eq!(record.opened(), &[first.clone(), second]);
        assert_eq!(record.last_read().unwrap().lecture_id, first);
    }

    #[test]
    fn corrupt_values_read_as_empty() {
        let (tracker, store) = tracker();
        store.set(OPENED_LECTURES_KEY, "{not json").unwrap();
        store.set(LAST_READ_KEY, r#"{"lectureId":""}"#).unwrap();
        let record = tracker.load().unwrap();
        assert!(record.opened().is_empty());
        assert!(record.last_read().is_none());
    }
}
