use thiserror::Error;

use super::text::Bilingual;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizQuestionError {
    #[error("a quiz question needs at least one option")]
    NoOptions,

    #[error("correct option index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: i64, len: usize },

    #[error("option lists differ in length ({en} english, {ar} arabic)")]
    OptionCountMismatch { en: usize, ar: usize },
}

/// A multiple-choice question with exactly one correct option.
///
/// Options are stored as bilingual pairs so the English and Arabic variants
/// of an option always share an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    question: Bilingual,
    options: Vec<Bilingual>,
    correct_index: usize,
}

impl QuizQuestion {
    /// # Errors
    ///
    /// Returns `QuizQuestionError::NoOptions` for an empty option list and
    /// `QuizQuestionError::CorrectIndexOutOfRange` if `correct_index` does not
    /// point at an option.
    pub fn new(
        question: Bilingual,
        options: Vec<Bilingual>,
        correct_index: usize,
    ) -> Result<Self, QuizQuestionError> {
        if options.is_empty() {
            return Err(QuizQuestionError::NoOptions);
        }
        if correct_index >= options.len() {
            return Err(QuizQuestionError::CorrectIndexOutOfRange {
                index: i64::try_from(correct_index).unwrap_or(i64::MAX),
                len: options.len(),
            });
        }
        Ok(Self {
            question,
            options,
            correct_index,
        })
    }

    /// Builds a question from parallel per-language option lists, which must
    /// have the same length.
    ///
    /// # Errors
    ///
    /// Returns `QuizQuestionError` if the lists disagree in length or the
    /// correct index is negative or out of range.
    pub fn from_parallel(
        question: Bilingual,
        options_en: Vec<String>,
        options_ar: Vec<String>,
        correct_index: i64,
    ) -> Result<Self, QuizQuestionError> {
        if options_en.len() != options_ar.len() {
            return Err(QuizQuestionError::OptionCountMismatch {
                en: options_en.len(),
                ar: options_ar.len(),
            });
        }
        if options_en.is_empty() {
            return Err(QuizQuestionError::NoOptions);
        }
        let len = options_en.len();
        let correct_index = usize::try_from(correct_index)
            .ok()
            .filter(|idx| *idx < len)
            .ok_or(QuizQuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len,
            })?;

        let options = options_en
            .into_iter()
            .zip(options_ar)
            .map(|(en, ar)| Bilingual::new(en, ar))
            .collect();
        Self::new(question, options, correct_index)
    }

    #[must_use]
    pub fn question(&self) -> &Bilingual {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[Bilingual] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn parallel_options_are_zipped() {
        let q = QuizQuestion::from_parallel(
            Bilingual::new("Where is the bootstrap program stored?", "أين؟"),
            opts(&["Hard Drive", "RAM", "ROM/EEPROM", "Cache"]),
            opts(&["القرص", "الذاكرة", "ROM/EEPROM", "المخبئة"]),
            2,
        )
        .unwrap();
        assert_eq!(q.options().len(), 4);
        assert_eq!(q.options()[2].en(), "ROM/EEPROM");
        assert_eq!(q.options()[0].ar(), "القرص");
        assert!(q.is_correct(2));
        assert!(!q.is_correct(1));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = QuizQuestion::from_parallel(
            Bilingual::new("Q", "س"),
            opts(&["a", "b", "c", "d"]),
            opts(&["أ", "ب", "ج", "د"]),
            5,
        )
        .unwrap_err();
        assert_eq!(
            err,
            QuizQuestionError::CorrectIndexOutOfRange { index: 5, len: 4 }
        );
    }

    #[test]
    fn negative_index_is_rejected() {
        let err = QuizQuestion::from_parallel(
            Bilingual::new("Q", "س"),
            opts(&["a", "b"]),
            opts(&["أ", "ب"]),
            -1,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            QuizQuestionError::CorrectIndexOutOfRange { index: -1, len: 2 }
        ));
    }

    #[test]
    fn mismatched_option_lists_are_rejected() {
        let err = QuizQuestion::from_parallel(
            Bilingual::new("Q", "س"),
            opts(&["a", "b", "c"]),
            opts(&["أ", "ب"]),
            0,
        )
        .unwrap_err();
        assert_eq!(err, QuizQuestionError::OptionCountMismatch { en: 3, ar: 2 });
    }

    #[test]
    fn missing_arabic_options_are_rejected() {
        let err = QuizQuestion::from_parallel(
            Bilingual::new("Q", ""),
            opts(&["a", "b"]),
            Vec::new(),
            1,
        )
        .unwrap_err();
        assert_eq!(err, QuizQuestionError::OptionCountMismatch { en: 2, ar: 0 });
    }

    #[test]
    fn empty_options_are_rejected() {
        let err = QuizQuestion::new(Bilingual::new("Q", "س"), Vec::new(), 0).unwrap_err();
        assert_eq!(err, QuizQuestionError::NoOptions);
    }
}
