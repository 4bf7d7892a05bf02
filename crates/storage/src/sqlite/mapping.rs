use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use study_core::document::{
    FlashcardDocument, LectureDocument, Location, QuizQuestionDocument, SubjectDocument,
};
use study_core::model::{Lecture, Subject};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn position_to_i64(position: usize) -> Result<i64, StorageError> {
    i64::try_from(position).map_err(|_| StorageError::Serialization("position overflow".into()))
}

/// JSON column values for a lecture's flashcards and quiz.
pub(crate) fn lecture_columns(lecture: &Lecture) -> Result<(String, String), StorageError> {
    let flashcards: Vec<FlashcardDocument> = lecture
        .flashcards
        .iter()
        .map(FlashcardDocument::from_flashcard)
        .collect();
    let quiz: Vec<QuizQuestionDocument> = lecture
        .quiz
        .iter()
        .map(QuizQuestionDocument::from_question)
        .collect();
    Ok((
        serde_json::to_string(&flashcards).map_err(ser)?,
        serde_json::to_string(&quiz).map_err(ser)?,
    ))
}

pub(crate) fn map_subject_row(row: &SqliteRow) -> Result<SubjectDocument, StorageError> {
    Ok(SubjectDocument {
        id: row.try_get("id").map_err(ser)?,
        name: row.try_get("name").map_err(ser)?,
        name_ar: row.try_get("name_ar").map_err(ser)?,
        color: row.try_get("color").map_err(ser)?,
        icon: row.try_get("icon").map_err(ser)?,
        level_tag: row.try_get("level_tag").map_err(ser)?,
        lectures: Vec::new(),
    })
}

pub(crate) fn map_lecture_row(row: &SqliteRow) -> Result<LectureDocument, StorageError> {
    let flashcards: String = row.try_get("flashcards").map_err(ser)?;
    let quiz: String = row.try_get("quiz").map_err(ser)?;
    Ok(LectureDocument {
        id: row.try_get("id").map_err(ser)?,
        title: row.try_get("title").map_err(ser)?,
        title_ar: row.try_get("title_ar").map_err(ser)?,
        summary: row.try_get("summary").map_err(ser)?,
        summary_ar: row.try_get("summary_ar").map_err(ser)?,
        flashcards: serde_json::from_str(&flashcards).map_err(ser)?,
        quiz: serde_json::from_str(&quiz).map_err(ser)?,
    })
}

/// Rebuild a domain subject from its row and its lecture rows in order.
pub(crate) fn into_subject(
    doc: SubjectDocument,
    lectures: Vec<LectureDocument>,
) -> Result<Subject, StorageError> {
    let location = Location::subject(doc.id.clone());
    let lectures = lectures
        .into_iter()
        .enumerate()
        .map(|(i, lecture)| lecture.into_lecture(&location, i))
        .collect::<Result<Vec<_>, _>>()
        .map_err(ser)?;
    let mut subject = doc.into_subject(0).map_err(ser)?;
    subject.lectures = lectures;
    Ok(subject)
}
