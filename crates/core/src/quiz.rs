use crate::model::QuizQuestion;

/// Where a quiz pass currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Waiting for the learner to pick and check an option.
    Answering {
        index: usize,
        pending: Option<usize>,
    },
    /// The answer to `index` has been checked and scored.
    Checked {
        index: usize,
        selected: usize,
        correct: bool,
    },
    Finished {
        score: usize,
    },
}

/// Result of a successful `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    pub correct: bool,
    pub correct_index: usize,
    pub score: usize,
}

/// How a single option should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFeedback {
    Neutral,
    Selected,
    Correct,
    Incorrect,
}

/// A single pass through a lecture's questions.
///
/// Score only grows inside a pass and each question is scored at most once,
/// because `check` is only accepted while answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    state: QuizState,
    score: usize,
}

impl QuizSession {
    /// Start a pass. A quiz without questions is already finished with score 0.
    #[must_use]
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let state = Self::initial_state(&questions);
        Self {
            questions,
            state,
            score: 0,
        }
    }

    fn initial_state(questions: &[QuizQuestion]) -> QuizState {
        if questions.is_empty() {
            QuizState::Finished { score: 0 }
        } else {
            QuizState::Answering {
                index: 0,
                pending: None,
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, QuizState::Finished { .. })
    }

    /// Zero-based index of the question on screen, `None` once finished.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            QuizState::Answering { index, .. } | QuizState::Checked { index, .. } => Some(index),
            QuizState::Finished { .. } => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_index().and_then(|index| self.questions.get(index))
    }

    /// Pick an option for the current question.
    ///
    /// Returns `false` and leaves the session untouched unless the quiz is
    /// answering and `option` exists.
    pub fn select_option(&mut self, option: usize) -> bool {
        let QuizState::Answering { index, .. } = self.state else {
            return false;
        };
        let in_range = self
            .questions
            .get(index)
            .is_some_and(|question| option < question.options().len());
        if !in_range {
            return false;
        }
        self.state = QuizState::Answering {
            index,
            pending: Some(option),
        };
        true
    }

    /// Score the pending choice.
    ///
    /// Returns `None` without changing anything when not answering or when no
    /// option has been selected.
    pub fn check(&mut self) -> Option<CheckOutcome> {
        let QuizState::Answering {
            index,
            pending: Some(selected),
        } = self.state
        else {
            return None;
        };
        let question = self.questions.get(index)?;
        let correct = question.is_correct(selected);
        if correct {
            self.score += 1;
        }
        self.state = QuizState::Checked {
            index,
            selected,
            correct,
        };
        Some(CheckOutcome {
            correct,
            correct_index: question.correct_index(),
            score: self.score,
        })
    }

    /// Move past a checked question. Returns `false` when not in `Checked`.
    pub fn advance(&mut self) -> bool {
        let QuizState::Checked { index, .. } = self.state else {
            return false;
        };
        self.state = if index + 1 < self.questions.len() {
            QuizState::Answering {
                index: index + 1,
                pending: None,
            }
        } else {
            QuizState::Finished { score: self.score }
        };
        true
    }

    /// Back to the first question with a zero score, from any state.
    pub fn restart(&mut self) {
        self.score = 0;
        self.state = Self::initial_state(&self.questions);
    }

    /// Rendering hint for option `option` of the current question.
    #[must_use]
    pub fn option_feedback(&self, option: usize) -> OptionFeedback {
        match self.state {
            QuizState::Answering { pending, .. } if pending == Some(option) => {
                OptionFeedback::Selected
            }
            QuizState::Checked {
                index, selected, ..
            } => {
                let is_answer = self
                    .questions
                    .get(index)
                    .is_some_and(|question| question.is_correct(option));
                if is_answer {
                    OptionFeedback::Correct
                } else if option == selected {
                    OptionFeedback::Incorrect
                } else {
                    OptionFeedback::Neutral
                }
            }
            _ => OptionFeedback::Neutral,
        }
    }
}
