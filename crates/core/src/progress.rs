use serde::{Deserialize, Serialize};

use crate::model::{LectureId, LevelId, Subject, SubjectId};

/// The most recently opened lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRead {
    pub lecture_id: LectureId,
    pub subject_id: SubjectId,
    pub level_id: LevelId,
}

/// Which lectures a user has opened, and which one was opened last.
///
/// `opened` keeps first-open order and never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressRecord {
    opened: Vec<LectureId>,
    last_read: Option<LastRead>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a record from persisted parts, dropping duplicate ids.
    #[must_use]
    pub fn from_parts(opened: Vec<LectureId>, last_read: Option<LastRead>) -> Self {
        let mut record = Self {
            opened: Vec::with_capacity(opened.len()),
            last_read,
        };
        for id in opened {
            record.record_opened(id);
        }
        record
    }

    #[must_use]
    pub fn opened(&self) -> &[LectureId] {
        &self.opened
    }

    #[must_use]
    pub fn last_read(&self) -> Option<&LastRead> {
        self.last_read.as_ref()
    }

    /// Mark a lecture as opened. Returns `false` if it already was.
    pub fn record_opened(&mut self, lecture_id: LectureId) -> bool {
        if self.opened.contains(&lecture_id) {
            return false;
        }
        self.opened.push(lecture_id);
        true
    }

    /// Overwrite the last-read pointer.
    pub fn record_last_read(&mut self, last_read: LastRead) {
        self.last_read = Some(last_read);
    }

    #[must_use]
    pub fn is_opened(&self, lecture_id: &str) -> bool {
        self.opened.iter().any(|id| id == lecture_id)
    }

    /// Percentage (0..=100, rounded half up) of the subject's lectures that were opened.
    /// A subject without lectures is at 0.
    #[must_use]
    pub fn subject_progress(&self, subject: &Subject) -> u8 {
        let total = subject.lectures.len();
        if total == 0 {
            return 0;
        }
        let opened = subject
            .lecture_ids()
            .filter(|id| self.opened.contains(id))
            .count();
        let pct = (opened * 200 + total) / (total * 2);
        u8::try_from(pct).unwrap_or(100)
    }
}
