use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::Row;
use study_core::document::LectureDocument;
use study_core::model::{Subject, SubjectId};

use super::SqliteRepository;
use super::mapping::{
    into_subject, lecture_columns, map_lecture_row, map_subject_row, position_to_i64, ser,
};
use crate::repository::{CatalogRepository, StorageError};

fn write_error(subject: &SubjectId, err: &sqlx::Error) -> StorageError {
    StorageError::Connection(format!("subject `{subject}`: {err}"))
}

#[async_trait]
impl CatalogRepository for SqliteRepository {
    async fn upsert_subjects(&self, subjects: &[Subject]) -> Result<(), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        for subject in subjects {
            sqlx::query(
                r"
                INSERT INTO subjects (id, name, name_ar, color, icon, level_tag, position)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, (SELECT COALESCE(MAX(position) + 1, 0) FROM subjects))
                ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    name_ar = excluded.name_ar,
                    color = excluded.color,
                    icon = excluded.icon,
                    level_tag = excluded.level_tag
                ",
            )
            .bind(subject.id.as_str())
            .bind(subject.name.en())
            .bind(subject.name.ar())
            .bind(subject.color.as_str())
            .bind(subject.icon.as_str())
            .bind(subject.level_tag.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error(&subject.id, &e))?;

            for (position, lecture) in subject.lectures.iter().enumerate() {
                let (flashcards, quiz) = lecture_columns(lecture)?;
                sqlx::query(
                    r"
                    INSERT INTO lectures (id, subject_id, title, title_ar, summary, summary_ar, flashcards, quiz, position)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    ON CONFLICT(id) DO UPDATE SET
                        subject_id = excluded.subject_id,
                        title = excluded.title,
                        title_ar = excluded.title_ar,
                        summary = excluded.summary,
                        summary_ar = excluded.summary_ar,
                        flashcards = excluded.flashcards,
                        quiz = excluded.quiz,
                        position = excluded.position
                    ",
                )
                .bind(lecture.id.as_str())
                .bind(subject.id.as_str())
                .bind(lecture.title.en())
                .bind(lecture.title.ar())
                .bind(lecture.summary.en())
                .bind(lecture.summary.ar())
                .bind(flashcards)
                .bind(quiz)
                .bind(position_to_i64(position)?)
                .execute(&mut *tx)
                .await
                .map_err(|e| write_error(&subject.id, &e))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        tracing::debug!(subjects = subjects.len(), "subjects upserted");
        Ok(())
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        let subject_rows = sqlx::query(
            r"
            SELECT id, name, name_ar, color, icon, level_tag
            FROM subjects
            ORDER BY position ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let lecture_rows = sqlx::query(
            r"
            SELECT id, subject_id, title, title_ar, summary, summary_ar, flashcards, quiz
            FROM lectures
            ORDER BY subject_id ASC, position ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut lectures: HashMap<String, Vec<LectureDocument>> = HashMap::new();
        for row in &lecture_rows {
            let subject_id: String = row.try_get("subject_id").map_err(ser)?;
            lectures
                .entry(subject_id)
                .or_default()
                .push(map_lecture_row(row)?);
        }

        let mut subjects = Vec::with_capacity(subject_rows.len());
        for row in &subject_rows {
            let doc = map_subject_row(row)?;
            let own = lectures.remove(&doc.id).unwrap_or_default();
            subjects.push(into_subject(doc, own)?);
        }
        Ok(subjects)
    }

    async fn get_subject(&self, id: &SubjectId) -> Result<Option<Subject>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, name_ar, color, icon, level_tag
            FROM subjects WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lecture_rows = sqlx::query(
            r"
            SELECT id, subject_id, title, title_ar, summary, summary_ar, flashcards, quiz
            FROM lectures
            WHERE subject_id = ?1
            ORDER BY position ASC, id ASC
            ",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let lectures = lecture_rows
            .iter()
            .map(map_lecture_row)
            .collect::<Result<Vec<_>, _>>()?;
        into_subject(map_subject_row(&row)?, lectures).map(Some)
    }
}
