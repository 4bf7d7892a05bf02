use thiserror::Error;

use crate::document::{LevelDocument, ValidationError};
use crate::model::{Bilingual, Lecture, Level, LevelId, Subject, SubjectId};

/// Built-in catalog shipped with the app.
const BUNDLED_CATALOG_JSON: &str = include_str!("../data/catalog.json");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A catalog lookup miss. Callers render a "not found" state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFound {
    #[error("level `{level}` not found")]
    Level { level: String },

    #[error("subject `{subject}` not found in level `{level}`")]
    Subject { level: String, subject: String },

    #[error("lecture `{lecture}` not found in subject `{subject}`")]
    Lecture { subject: String, lecture: String },
}

//
// ─── ENTRIES ───────────────────────────────────────────────────────────────────
//

/// A lecture together with where it lives in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LectureEntry<'a> {
    pub level_id: &'a LevelId,
    pub subject_id: &'a SubjectId,
    pub subject_name: &'a Bilingual,
    pub subject_color: &'a str,
    pub lecture: &'a Lecture,
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Read-only tree of levels, subjects and lectures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    levels: Vec<Level>,
}

impl Catalog {
    #[must_use]
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// The catalog bundled with the app.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the embedded document is invalid.
    pub fn bundled() -> Result<Self, ValidationError> {
        Self::from_json(BUNDLED_CATALOG_JSON)
    }

    /// Parse a catalog document: a JSON array of levels with nested subjects.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for malformed JSON or content that violates
    /// the data model.
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        let docs: Vec<LevelDocument> =
            serde_json::from_str(raw).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        let levels = docs
            .into_iter()
            .map(LevelDocument::into_level)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// # Errors
    ///
    /// Returns `NotFound::Level` if no level has this id.
    pub fn lookup_level(&self, level_id: &str) -> Result<&Level, NotFound> {
        self.levels
            .iter()
            .find(|level| level.id == level_id)
            .ok_or_else(|| NotFound::Level {
                level: level_id.to_owned(),
            })
    }

    /// # Errors
    ///
    /// Returns `NotFound` naming the first missing part of the path.
    pub fn lookup_subject(&self, level_id: &str, subject_id: &str) -> Result<&Subject, NotFound> {
        self.lookup_level(level_id)?
            .find_subject(subject_id)
            .ok_or_else(|| NotFound::Subject {
                level: level_id.to_owned(),
                subject: subject_id.to_owned(),
            })
    }

    /// # Errors
    ///
    /// Returns `NotFound` naming the first missing part of the path.
    pub fn lookup_lecture(
        &self,
        level_id: &str,
        subject_id: &str,
        lecture_id: &str,
    ) -> Result<&Lecture, NotFound> {
        self.lookup_subject(level_id, subject_id)?
            .find_lecture(lecture_id)
            .ok_or_else(|| NotFound::Lecture {
                subject: subject_id.to_owned(),
                lecture: lecture_id.to_owned(),
            })
    }

    /// Every lecture in level, subject, lecture order. Recomputed on each call.
    pub fn all_lectures(&self) -> impl Iterator<Item = LectureEntry<'_>> + '_ {
        self.levels.iter().flat_map(|level| {
            level.subjects.iter().flat_map(move |subject| {
                subject.lectures.iter().map(move |lecture| LectureEntry {
                    level_id: &level.id,
                    subject_id: &subject.id,
                    subject_name: &subject.name,
                    subject_color: subject.color.as_str(),
                    lecture,
                })
            })
        })
    }

    /// First lecture whose title or summary contains `query`, ignoring case.
    ///
    /// A blank query matches nothing. Surrounding whitespace is part of the
    /// needle otherwise.
    #[must_use]
    pub fn search_lectures(&self, query: &str) -> Option<LectureEntry<'_>> {
        if query.trim().is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        self.all_lectures().find(|entry| {
            entry.lecture.title.contains_lowercase(&needle)
                || entry.lecture.summary.contains_lowercase(&needle)
        })
    }

    /// Overlay subjects onto the levels whose tag matches `level_tag`.
    ///
    /// Subjects with an existing id are replaced in place. Returns the ids of
    /// subjects whose level tag matched no level.
    pub fn merge_subjects(&mut self, subjects: impl IntoIterator<Item = Subject>) -> Vec<SubjectId> {
        let mut unplaced = Vec::new();
        for subject in subjects {
            match self
                .levels
                .iter_mut()
                .find(|level| level.tag == subject.level_tag)
            {
                Some(level) => level.upsert_subject(subject),
                None => unplaced.push(subject.id),
            }
        }
        unplaced
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> Catalog {
        Catalog::bundled().expect("bundled catalog parses")
    }

    #[test]
    fn bundled_catalog_has_expected_shape() {
        let catalog = bundled();
        let ids: Vec<_> = catalog.levels().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["level-1", "level-2", "level-3", "level-4"]);

        let level2 = catalog.lookup_level("level-2").unwrap();
        assert_eq!(level2.subjects.len(), 4);
        assert!(catalog.lookup_level("level-1").unwrap().subjects.is_empty());
    }

    #[test]
    fn lookup_lecture_finds_nested_lecture() {
        let catalog = bundled();
        let lecture = catalog
            .lookup_lecture("level-2", "ecommerce", "ecom-lec-2")
            .unwrap();
        assert_eq!(lecture.flashcards.len(), 3);
        assert_eq!(lecture.quiz.len(), 3);
        assert_eq!(lecture.quiz[0].correct_index(), 1);
    }

    #[test]
    fn lookups_report_missing_part() {
        let catalog = bundled();
        assert_eq!(
            catalog.lookup_level("level-9").unwrap_err(),
            NotFound::Level {
                level: "level-9".into()
            }
        );
        assert!(matches!(
            catalog.lookup_subject("level-2", "nope").unwrap_err(),
            NotFound::Subject { .. }
        ));
        assert!(matches!(
            catalog.lookup_lecture("level-2", "ecommerce", "nope").unwrap_err(),
            NotFound::Lecture { .. }
        ));
        assert!(matches!(
            catalog.lookup_lecture("level-9", "ecommerce", "ecom-lec-2").unwrap_err(),
            NotFound::Level { .. }
        ));
    }

    #[test]
    fn all_lectures_follow_catalog_order() {
        let catalog = bundled();
        let ids: Vec<_> = catalog
            .all_lectures()
            .map(|entry| entry.lecture.id.as_str())
            .collect();
        assert_eq!(ids, vec!["ecom-lec-2", "os-lec-1", "os-lec-2"]);

        let first = catalog.all_lectures().next().unwrap();
        assert_eq!(first.subject_id.as_str(), "ecommerce");
        assert_eq!(first.subject_color, "subject-ecommerce");
        assert_eq!(first.level_id.as_str(), "level-2");
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_summary() {
        let catalog = bundled();
        let hit = catalog.search_lectures("PROCESSES").unwrap();
        assert_eq!(hit.lecture.id.as_str(), "os-lec-2");

        let hit = catalog.search_lectures("tokenization").unwrap();
        assert_eq!(hit.lecture.id.as_str(), "ecom-lec-2");

        assert!(catalog.search_lectures("quantum chromodynamics").is_none());
    }

    #[test]
    fn blank_search_is_a_no_op() {
        let catalog = bundled();
        assert!(catalog.search_lectures("").is_none());
        assert!(catalog.search_lectures("   ").is_none());
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        let catalog = bundled();
        let hit = catalog.search_lectures(" PROCESSES").unwrap();
        assert_eq!(hit.lecture.id.as_str(), "os-lec-2");
        assert!(catalog.search_lectures("  processes ").is_none());
    }

    #[test]
    fn merge_subjects_places_by_level_tag() {
        let mut catalog = bundled();
        let mut subject = catalog
            .lookup_subject("level-2", "web-info-systems")
            .unwrap()
            .clone();
        subject.name = Bilingual::new("Web Info Systems II", "نظم");
        let mut stray = subject.clone();
        stray.id = SubjectId::new("stray").unwrap();
        stray.level_tag = "Level-9".into();

        let unplaced = catalog.merge_subjects(vec![subject, stray]);

        assert_eq!(unplaced, vec![SubjectId::new("stray").unwrap()]);
        let level2 = catalog.lookup_level("level-2").unwrap();
        assert_eq!(level2.subjects.len(), 4);
        assert_eq!(level2.subjects[0].name.en(), "Web Info Systems II");
    }
}
