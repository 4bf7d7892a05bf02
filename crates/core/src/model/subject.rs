use super::ids::{LectureId, LevelId, SubjectId};
use super::lecture::Lecture;
use super::text::Bilingual;

/// A course within a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: Bilingual,
    /// Presentation color token, e.g. `subject-ecommerce`.
    pub color: String,
    /// Presentation icon token, e.g. `ShoppingCart`.
    pub icon: String,
    /// Tag of the level this subject belongs to, e.g. `Level-2`.
    pub level_tag: String,
    pub lectures: Vec<Lecture>,
}

impl Subject {
    #[must_use]
    pub fn find_lecture(&self, id: &str) -> Option<&Lecture> {
        self.lectures.iter().find(|lecture| lecture.id == id)
    }

    pub fn lecture_ids(&self) -> impl Iterator<Item = &LectureId> {
        self.lectures.iter().map(|lecture| &lecture.id)
    }
}

/// Top-level academic grouping, e.g. "Level 2".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub id: LevelId,
    pub tag: String,
    pub name: Bilingual,
    pub subjects: Vec<Subject>,
}

impl Level {
    #[must_use]
    pub fn find_subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.id == id)
    }

    /// Insert a subject, replacing any existing subject with the same id in place.
    pub fn upsert_subject(&mut self, subject: Subject) {
        match self.subjects.iter_mut().find(|s| s.id == subject.id) {
            Some(existing) => *existing = subject,
            None => self.subjects.push(subject),
        }
    }
}
