mod ids;
mod lecture;
mod quiz_question;
mod subject;
mod text;

pub use ids::{IdError, LectureId, LevelId, SubjectId};
pub use lecture::{Flashcard, Lecture};
pub use quiz_question::{QuizQuestion, QuizQuestionError};
pub use subject::{Level, Subject};
pub use text::{Bilingual, Language};
