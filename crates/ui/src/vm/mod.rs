mod catalog_vm;
mod labels;
mod lecture_vm;

pub use catalog_vm::{
    ContinueReadingVm, LectureRowVm, LevelCardVm, SearchOutcome, SubjectCardVm, SubjectPageVm,
    map_continue_reading, map_level_cards, map_subject_cards, map_subject_page, search_target,
};
pub use labels::{Labels, labels, position_label};
pub use lecture_vm::{
    FlashcardVm, QuizOptionVm, QuizVm, map_flashcard, map_quiz, summary_blocks,
};
