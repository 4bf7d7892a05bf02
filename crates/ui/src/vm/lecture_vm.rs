use study_core::model::{Language, Lecture};
use study_core::{
    CardFace, FlashcardSession, OptionFeedback, QuizSession, QuizState, SummaryBlock,
    parse_summary,
};

use crate::vm::{labels, position_label};

/// Summary blocks in the display language.
#[must_use]
pub fn summary_blocks(lecture: &Lecture, language: Language) -> Vec<SummaryBlock> {
    parse_summary(lecture.summary.get(language))
}

//
// ─── FLASHCARDS ────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardVm {
    pub position_label: String,
    pub face_label: &'static str,
    pub text: String,
    pub revealed: bool,
    pub can_prev: bool,
    pub can_next: bool,
}

/// `None` for a session without cards.
#[must_use]
pub fn map_flashcard(session: &FlashcardSession, language: Language) -> Option<FlashcardVm> {
    let card = session.current()?;
    let position = session.position()?;
    let text = labels(language);
    let (face_label, body) = match session.face().unwrap_or_default() {
        CardFace::Front => (text.question, &card.question),
        CardFace::Back => (text.answer, &card.answer),
    };
    Some(FlashcardVm {
        position_label: position_label(language, position, session.len()),
        face_label,
        text: body.get(language).to_owned(),
        revealed: session.is_revealed(),
        can_prev: !session.at_first(),
        can_next: !session.at_last(),
    })
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub letter: char,
    pub text: String,
    pub class: &'static str,
    pub selectable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizVm {
    Empty,
    Question {
        progress_label: String,
        score_label: String,
        prompt: String,
        options: Vec<QuizOptionVm>,
        verdict: Option<(bool, &'static str)>,
        can_check: bool,
        checked: bool,
        advance_label: &'static str,
    },
    Finished {
        score_label: String,
    },
}

#[must_use]
pub fn map_quiz(session: &QuizSession, language: Language) -> QuizVm {
    let text = labels(language);
    if session.total() == 0 {
        return QuizVm::Empty;
    }
    let (index, can_check, verdict) = match session.state() {
        QuizState::Finished { score } => {
            return QuizVm::Finished {
                score_label: format!("{}: {score} / {}", text.score, session.total()),
            };
        }
        QuizState::Answering { index, pending } => (index, pending.is_some(), None),
        QuizState::Checked { index, correct, .. } => {
            let verdict = if correct { text.correct } else { text.incorrect };
            (index, false, Some((correct, verdict)))
        }
    };
    let Some(question) = session.current_question() else {
        return QuizVm::Empty;
    };
    let checked = verdict.is_some();
    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| QuizOptionVm {
            letter: option_letter(i),
            text: option.get(language).to_owned(),
            class: feedback_class(session.option_feedback(i)),
            selectable: !checked,
        })
        .collect();
    let is_last = index + 1 == session.total();

    QuizVm::Question {
        progress_label: format!(
            "{} {}",
            text.question,
            position_label(language, index + 1, session.total())
        ),
        score_label: format!("{}: {}", text.score, session.score()),
        prompt: question.question().get(language).to_owned(),
        options,
        verdict,
        can_check,
        checked,
        advance_label: if is_last {
            text.finish_quiz
        } else {
            text.next_question
        },
    }
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}

fn feedback_class(feedback: OptionFeedback) -> &'static str {
    match feedback {
        OptionFeedback::Neutral => "quiz-option",
        OptionFeedback::Selected => "quiz-option quiz-option--selected",
        OptionFeedback::Correct => "quiz-option quiz-option--correct",
        OptionFeedback::Incorrect => "quiz-option quiz-option--incorrect",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::Catalog;

    fn lecture(subject: &str, lecture: &str) -> Lecture {
        Catalog::bundled()
            .unwrap()
            .lookup_lecture("level-2", subject, lecture)
            .unwrap()
            .clone()
    }

    #[test]
    fn summary_follows_language() {
        let lecture = lecture("ecommerce", "ecom-lec-2");
        let en = summary_blocks(&lecture, Language::En);
        assert_eq!(
            en[0],
            SummaryBlock::Heading("E-Commerce Infrastructure".to_owned())
        );
        let ar = summary_blocks(&lecture, Language::Ar);
        assert!(matches!(ar[0], SummaryBlock::Heading(_)));
        assert_ne!(en[0], ar[0]);
    }

    #[test]
    fn flashcard_shows_question_then_answer() {
        let lecture = lecture("ecommerce", "ecom-lec-2");
        let mut session = FlashcardSession::new(lecture.flashcards.clone());

        let front = map_flashcard(&session, Language::En).unwrap();
        assert_eq!(front.position_label, "1 of 3");
        assert_eq!(front.face_label, "Question");
        assert_eq!(front.text, "What is a CDN?");
        assert!(!front.can_prev);
        assert!(front.can_next);

        session.flip();
        let back = map_flashcard(&session, Language::En).unwrap();
        assert_eq!(back.face_label, "Answer");
        assert!(back.text.starts_with("Content Delivery Network"));

        session.next();
        session.next();
        let last = map_flashcard(&session, Language::En).unwrap();
        assert!(!last.revealed);
        assert!(!last.can_next);
        assert_eq!(map_flashcard(&FlashcardSession::new(Vec::new()), Language::En), None);
    }

    #[test]
    fn quiz_vm_tracks_feedback_and_score() {
        let lecture = lecture("ecommerce", "ecom-lec-2");
        let mut quiz = QuizSession::new(lecture.quiz.clone());

        let QuizVm::Question {
            can_check, options, ..
        } = map_quiz(&quiz, Language::En)
        else {
            panic!("expected a question");
        };
        assert!(!can_check);
        assert_eq!(options[1].letter, 'B');
        assert_eq!(options[1].text, "Shopify");

        quiz.select_option(0);
        quiz.check();
        let QuizVm::Question {
            options,
            verdict,
            checked,
            score_label,
            ..
        } = map_quiz(&quiz, Language::En)
        else {
            panic!("expected a question");
        };
        assert!(checked);
        assert_eq!(verdict, Some((false, "Incorrect")));
        assert_eq!(options[0].class, "quiz-option quiz-option--incorrect");
        assert_eq!(options[1].class, "quiz-option quiz-option--correct");
        assert!(options.iter().all(|o| !o.selectable));
        assert_eq!(score_label, "Score: 0");

        while quiz.advance() {
            if quiz.is_finished() {
                break;
            }
            quiz.select_option(0);
            quiz.check();
        }
        assert_eq!(
            map_quiz(&quiz, Language::En),
            QuizVm::Finished {
                score_label: "Score: 0 / 3".to_owned()
            }
        );
    }

    #[test]
    fn empty_quiz_has_nothing_to_show() {
        assert_eq!(map_quiz(&QuizSession::new(Vec::new()), Language::Ar), QuizVm::Empty);
    }
}
