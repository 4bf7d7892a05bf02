#![forbid(unsafe_code)]

pub mod catalog;
pub mod document;
pub mod error;
pub mod flashcards;
pub mod model;
pub mod progress;
pub mod quiz;
pub mod summary;

pub use catalog::{Catalog, LectureEntry, NotFound};
pub use document::{Location, ValidationError, parse_subject_batch};
pub use error::Error;
pub use flashcards::{CardFace, FlashcardSession};
pub use progress::{LastRead, ProgressRecord};
pub use quiz::{CheckOutcome, OptionFeedback, QuizSession, QuizState};
pub use summary::{SummaryBlock, parse_summary};
