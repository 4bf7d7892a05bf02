use serde::{Deserialize, Serialize};

/// Display language of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// The persisted language code (`"en"` or `"ar"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    /// Arabic is laid out right-to-left.
    #[must_use]
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

/// A user-facing text in both supported languages.
///
/// Either side may be empty for content that has not been authored yet;
/// `is_complete` reports whether the text is ready for display in both languages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bilingual {
    en: String,
    ar: String,
}

impl Bilingual {
    #[must_use]
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    #[must_use]
    pub fn en(&self) -> &str {
        &self.en
    }

    #[must_use]
    pub fn ar(&self) -> &str {
        &self.ar
    }

    #[must_use]
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.en.trim().is_empty() && !self.ar.trim().is_empty()
    }

    /// Case-insensitive substring match against either language.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.en.to_lowercase().contains(needle) || self.ar.to_lowercase().contains(needle)
    }
}
