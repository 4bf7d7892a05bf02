use super::ids::LectureId;
use super::quiz_question::QuizQuestion;
use super::text::Bilingual;

/// A question/answer pair for self-testing. Position in the lecture is its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub question: Bilingual,
    pub answer: Bilingual,
}

impl Flashcard {
    #[must_use]
    pub fn new(question: Bilingual, answer: Bilingual) -> Self {
        Self { question, answer }
    }
}

/// A unit of study content: summary notes, flashcards and a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecture {
    pub id: LectureId,
    pub title: Bilingual,
    /// Lightweight markup, see [`crate::summary::parse_summary`].
    pub summary: Bilingual,
    pub flashcards: Vec<Flashcard>,
    pub quiz: Vec<QuizQuestion>,
}

impl Lecture {
    /// True when title and summary are authored in both languages.
    #[must_use]
    pub fn is_display_ready(&self) -> bool {
        self.title.is_complete() && self.summary.is_complete()
    }
}
