//! JSON document format for catalog content.
//!
//! The same shapes are used for the bundled catalog, for admin imports and for
//! the JSON columns the store keeps flashcards and quizzes in. Every field is
//! `#[serde(default)]`; required fields are checked during validation so errors
//! can name the subject and lecture they belong to.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    Bilingual, Flashcard, Lecture, LectureId, Level, LevelId, QuizQuestion, QuizQuestionError,
    Subject, SubjectId,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Where in a document a problem was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Subject id, or `#n` (1-based position) when the id itself is missing.
    pub subject: String,
    pub lecture: Option<String>,
}

impl Location {
    pub fn subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            lecture: None,
        }
    }

    pub fn lecture(&self, lecture: impl Into<String>) -> Self {
        Self {
            subject: self.subject.clone(),
            lecture: Some(lecture.into()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subject `{}`", self.subject)?;
        if let Some(lecture) = &self.lecture {
            write!(f, ", lecture `{lecture}`")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("nothing to import")]
    Empty,

    #[error("{location}: missing required field `{field}`")]
    MissingField { location: Location, field: String },

    #[error("{location}: quiz question {question}: {source}")]
    Quiz {
        location: Location,
        question: usize,
        #[source]
        source: QuizQuestionError,
    },

    #[error("duplicate subject id `{0}`")]
    DuplicateSubject(String),

    #[error("{location}: duplicate lecture id")]
    DuplicateLecture { location: Location },
}

impl ValidationError {
    /// The lecture id the error refers to, if any.
    #[must_use]
    pub fn lecture_id(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { location, .. }
            | ValidationError::Quiz { location, .. }
            | ValidationError::DuplicateLecture { location } => location.lecture.as_deref(),
            _ => None,
        }
    }

    /// The subject id (or `#n` position) the error refers to, if any.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { location, .. }
            | ValidationError::Quiz { location, .. }
            | ValidationError::DuplicateLecture { location } => Some(&location.subject),
            ValidationError::DuplicateSubject(id) => Some(id),
            _ => None,
        }
    }
}

fn require(value: &str, location: &Location, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField {
            location: location.clone(),
            field: field.to_owned(),
        });
    }
    Ok(())
}

//
// ─── DOCUMENTS ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlashcardDocument {
    pub question: String,
    pub question_ar: String,
    pub answer: String,
    pub answer_ar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizQuestionDocument {
    pub question: String,
    pub question_ar: String,
    pub options: Vec<String>,
    pub options_ar: Vec<String>,
    pub correct_index: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LectureDocument {
    pub id: String,
    pub title: String,
    pub title_ar: String,
    pub summary: String,
    pub summary_ar: String,
    pub flashcards: Vec<FlashcardDocument>,
    pub quiz: Vec<QuizQuestionDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubjectDocument {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub color: String,
    pub icon: String,
    pub level_tag: String,
    pub lectures: Vec<LectureDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelDocument {
    pub id: String,
    pub tag: String,
    pub name: String,
    pub name_ar: String,
    pub subjects: Vec<SubjectDocument>,
}

//
// ─── DOCUMENT → DOMAIN ─────────────────────────────────────────────────────────
//

impl FlashcardDocument {
    fn into_flashcard(self, location: &Location, index: usize) -> Result<Flashcard, ValidationError> {
        require(&self.question, location, &format!("flashcards[{index}].question"))?;
        require(&self.answer, location, &format!("flashcards[{index}].answer"))?;
        Ok(Flashcard::new(
            Bilingual::new(self.question, self.question_ar),
            Bilingual::new(self.answer, self.answer_ar),
        ))
    }

    #[must_use]
    pub fn from_flashcard(card: &Flashcard) -> Self {
        Self {
            question: card.question.en().to_owned(),
            question_ar: card.question.ar().to_owned(),
            answer: card.answer.en().to_owned(),
            answer_ar: card.answer.ar().to_owned(),
        }
    }
}

impl QuizQuestionDocument {
    fn into_question(self, location: &Location, index: usize) -> Result<QuizQuestion, ValidationError> {
        require(&self.question, location, &format!("quiz[{index}].question"))?;
        let correct_index = self.correct_index.ok_or_else(|| ValidationError::MissingField {
            location: location.clone(),
            field: format!("quiz[{index}].correctIndex"),
        })?;
        QuizQuestion::from_parallel(
            Bilingual::new(self.question, self.question_ar),
            self.options,
            self.options_ar,
            correct_index,
        )
        .map_err(|source| ValidationError::Quiz {
            location: location.clone(),
            question: index,
            source,
        })
    }

    #[must_use]
    pub fn from_question(question: &QuizQuestion) -> Self {
        Self {
            question: question.question().en().to_owned(),
            question_ar: question.question().ar().to_owned(),
            options: question.options().iter().map(|o| o.en().to_owned()).collect(),
            options_ar: question.options().iter().map(|o| o.ar().to_owned()).collect(),
            correct_index: Some(i64::try_from(question.correct_index()).unwrap_or(i64::MAX)),
        }
    }
}

impl LectureDocument {
    /// Validate into a domain `Lecture`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the subject and lecture on failure.
    pub fn into_lecture(self, subject: &Location, index: usize) -> Result<Lecture, ValidationError> {
        let label = if self.id.trim().is_empty() {
            format!("#{}", index + 1)
        } else {
            self.id.trim().to_owned()
        };
        let location = subject.lecture(label);

        let id = LectureId::new(self.id).map_err(|_| ValidationError::MissingField {
            location: location.clone(),
            field: "id".into(),
        })?;
        require(&self.title, &location, "title")?;

        let flashcards = self
            .flashcards
            .into_iter()
            .enumerate()
            .map(|(i, card)| card.into_flashcard(&location, i))
            .collect::<Result<Vec<_>, _>>()?;
        let quiz = self
            .quiz
            .into_iter()
            .enumerate()
            .map(|(i, q)| q.into_question(&location, i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Lecture {
            id,
            title: Bilingual::new(self.title, self.title_ar),
            summary: Bilingual::new(self.summary, self.summary_ar),
            flashcards,
            quiz,
        })
    }

    #[must_use]
    pub fn from_lecture(lecture: &Lecture) -> Self {
        Self {
            id: lecture.id.to_string(),
            title: lecture.title.en().to_owned(),
            title_ar: lecture.title.ar().to_owned(),
            summary: lecture.summary.en().to_owned(),
            summary_ar: lecture.summary.ar().to_owned(),
            flashcards: lecture
                .flashcards
                .iter()
                .map(FlashcardDocument::from_flashcard)
                .collect(),
            quiz: lecture
                .quiz
                .iter()
                .map(QuizQuestionDocument::from_question)
                .collect(),
        }
    }
}

impl SubjectDocument {
    /// Validate into a domain `Subject`. `index` is the position in its batch.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the subject (and lecture) on failure.
    pub fn into_subject(self, index: usize) -> Result<Subject, ValidationError> {
        let location = if self.id.trim().is_empty() {
            Location::subject(format!("#{}", index + 1))
        } else {
            Location::subject(self.id.trim())
        };

        let id = SubjectId::new(self.id).map_err(|_| ValidationError::MissingField {
            location: location.clone(),
            field: "id".into(),
        })?;
        require(&self.name, &location, "name")?;
        require(&self.level_tag, &location, "levelTag")?;

        let mut seen = HashSet::new();
        let mut lectures = Vec::with_capacity(self.lectures.len());
        for (i, doc) in self.lectures.into_iter().enumerate() {
            let lecture = doc.into_lecture(&location, i)?;
            if !seen.insert(lecture.id.clone()) {
                return Err(ValidationError::DuplicateLecture {
                    location: location.lecture(lecture.id.as_str()),
                });
            }
            lectures.push(lecture);
        }

        Ok(Subject {
            id,
            name: Bilingual::new(self.name, self.name_ar),
            color: self.color,
            icon: self.icon,
            level_tag: self.level_tag,
            lectures,
        })
    }

    #[must_use]
    pub fn from_subject(subject: &Subject) -> Self {
        Self {
            id: subject.id.to_string(),
            name: subject.name.en().to_owned(),
            name_ar: subject.name.ar().to_owned(),
            color: subject.color.clone(),
            icon: subject.icon.clone(),
            level_tag: subject.level_tag.clone(),
            lectures: subject.lectures.iter().map(LectureDocument::from_lecture).collect(),
        }
    }
}

impl LevelDocument {
    /// # Errors
    ///
    /// Returns `ValidationError` if the level or any nested subject is invalid.
    pub fn into_level(self) -> Result<Level, ValidationError> {
        let location = Location::subject(format!("level {}", self.id.trim()));
        let id = LevelId::new(self.id).map_err(|_| ValidationError::MissingField {
            location: location.clone(),
            field: "id".into(),
        })?;
        require(&self.name, &location, "name")?;
        let subjects = self
            .subjects
            .into_iter()
            .enumerate()
            .map(|(i, doc)| doc.into_subject(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Level {
            id,
            tag: self.tag,
            name: Bilingual::new(self.name, self.name_ar),
            subjects,
        })
    }
}

//
// ─── BATCHES ───────────────────────────────────────────────────────────────────
//

/// Parse an admin import payload: one subject object or an array of them.
///
/// The whole batch is validated before anything is returned; lecture ids must
/// be unique across the batch because the store keys lectures globally.
///
/// # Errors
///
/// Returns the first `ValidationError` found.
pub fn parse_subject_batch(raw: &str) -> Result<Vec<Subject>, ValidationError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    let docs: Vec<SubjectDocument> = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item)
                    .map_err(|e| ValidationError::Malformed(format!("subject #{}: {e}", i + 1)))
            })
            .collect::<Result<_, _>>()?,
        object @ serde_json::Value::Object(_) => vec![
            serde_json::from_value(object)
                .map_err(|e| ValidationError::Malformed(e.to_string()))?,
        ],
        _ => {
            return Err(ValidationError::Malformed(
                "expected a subject object or an array of subjects".into(),
            ));
        }
    };
    if docs.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut subject_ids = HashSet::new();
    let mut lecture_ids = HashSet::new();
    let mut subjects = Vec::with_capacity(docs.len());
    for (i, doc) in docs.into_iter().enumerate() {
        let subject = doc.into_subject(i)?;
        if !subject_ids.insert(subject.id.clone()) {
            return Err(ValidationError::DuplicateSubject(subject.id.to_string()));
        }
        for lecture in &subject.lectures {
            if !lecture_ids.insert(lecture.id.clone()) {
                return Err(ValidationError::DuplicateLecture {
                    location: Location::subject(subject.id.as_str()).lecture(lecture.id.as_str()),
                });
            }
        }
        subjects.push(subject);
    }
    Ok(subjects)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
