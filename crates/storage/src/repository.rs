use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use study_core::model::{Lecture, LectureId, Subject, SubjectId};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for catalog subjects and their lectures.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Upsert a batch of subjects and their lectures.
    ///
    /// Subjects are keyed by id and lectures by their (store-wide) id.
    /// Lectures already stored for a subject but absent from the batch are
    /// kept. The batch is applied entirely or not at all.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` naming the first subject that could not be written.
    async fn upsert_subjects(&self, subjects: &[Subject]) -> Result<(), StorageError>;

    /// All stored subjects in insertion order, lectures in document order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if rows cannot be read or decoded.
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if rows cannot be read or decoded.
    async fn get_subject(&self, id: &SubjectId) -> Result<Option<Subject>, StorageError>;
}

/// Repository contract for the per-user admin flag.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Whether `user_id` is an administrator. Unknown users are not.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be read.
    async fn is_admin(&self, user_id: &str) -> Result<bool, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be written.
    async fn set_admin(&self, user_id: &str, is_admin: bool) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
struct SubjectRow {
    subject: Subject,
    position: usize,
}

#[derive(Debug, Clone)]
struct LectureRow {
    subject_id: SubjectId,
    lecture: Lecture,
    position: usize,
}

#[derive(Debug, Default)]
struct CatalogState {
    subjects: HashMap<SubjectId, SubjectRow>,
    lectures: HashMap<LectureId, LectureRow>,
}

impl CatalogState {
    fn upsert(&mut self, subject: &Subject) {
        let next_position = self.subjects.len();
        let mut header = subject.clone();
        header.lectures.clear();
        match self.subjects.get_mut(&subject.id) {
            Some(row) => row.subject = header,
            None => {
                self.subjects.insert(
                    subject.id.clone(),
                    SubjectRow {
                        subject: header,
                        position: next_position,
                    },
                );
            }
        }
        for (position, lecture) in subject.lectures.iter().enumerate() {
            self.lectures.insert(
                lecture.id.clone(),
                LectureRow {
                    subject_id: subject.id.clone(),
                    lecture: lecture.clone(),
                    position,
                },
            );
        }
    }

    fn assemble(&self, row: &SubjectRow) -> Subject {
        let mut lectures: Vec<&LectureRow> = self
            .lectures
            .values()
            .filter(|lecture| lecture.subject_id == row.subject.id)
            .collect();
        lectures.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.lecture.id.as_str().cmp(b.lecture.id.as_str()))
        });
        let mut subject = row.subject.clone();
        subject.lectures = lectures.into_iter().map(|row| row.lecture.clone()).collect();
        subject
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Mutex<CatalogState>>,
    profiles: Arc<Mutex<HashMap<String, bool>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn upsert_subjects(&self, subjects: &[Subject]) -> Result<(), StorageError> {
        let mut guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        for subject in subjects {
            guard.upsert(subject);
        }
        Ok(())
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<&SubjectRow> = guard.subjects.values().collect();
        rows.sort_by_key(|row| row.position);
        Ok(rows.into_iter().map(|row| guard.assemble(row)).collect())
    }

    async fn get_subject(&self, id: &SubjectId) -> Result<Option<Subject>, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.subjects.get(id).map(|row| guard.assemble(row)))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn is_admin(&self, user_id: &str) -> Result<bool, StorageError> {
        let guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(user_id).copied().unwrap_or(false))
    }

    async fn set_admin(&self, user_id: &str, is_admin: bool) -> Result<(), StorageError> {
        let mut guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(user_id.to_owned(), is_admin);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let catalog: Arc<dyn CatalogRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Self { catalog, profiles }
    }
}
