use std::sync::Arc;

use storage::local_store::LocalStore;
use study_core::model::Language;

use crate::error::LocalStateError;

pub const LANGUAGE_KEY: &str = "language";

/// Display-language preference, stored as a bare language code.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn LocalStore>,
}

impl Preferences {
    #[must_use]
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Stored language, English when unset or unrecognized.
    ///
    /// # Errors
    ///
    /// Returns `LocalStateError::Storage` if the store cannot be read.
    pub fn language(&self) -> Result<Language, LocalStateError> {
        let Some(code) = self.store.get(LANGUAGE_KEY)? else {
            return Ok(Language::default());
        };
        Ok(Language::from_code(&code).unwrap_or_else(|| {
            tracing::warn!(code = %code, "unknown language code in local state");
            Language::default()
        }))
    }

    /// # Errors
    ///
    /// Returns `LocalStateError::Storage` if the store cannot be written.
    pub fn set_language(&self, language: Language) -> Result<(), LocalStateError> {
        self.store.set(LANGUAGE_KEY, language.code())?;
        Ok(())
    }

    /// Switch between English and Arabic and return the new language.
    ///
    /// # Errors
    ///
    /// Returns `LocalStateError::Storage` if the store cannot be read or written.
    pub fn toggle_language(&self) -> Result<Language, LocalStateError> {
        let next = self.language()?.toggled();
        self.set_language(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::local_store::InMemoryLocalStore;

    #[test]
    fn defaults_to_english() {
        let prefs = Preferences::new(Arc::new(InMemoryLocalStore::new()));
        assert_eq!(prefs.language().unwrap(), Language::En);
    }

    #[test]
    fn toggle_persists_code() {
        let store = Arc::new(InMemoryLocalStore::new());
        let prefs = Preferences::new(store.clone());
        assert_eq!(prefs.toggle_language().unwrap(), Language::Ar);
        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("ar"));
        assert_eq!(prefs.toggle_language().unwrap(), Language::En);
    }

    #[test]
    fn unknown_code_falls_back_to_english() {
        let store = Arc::new(InMemoryLocalStore::new());
        store.set(LANGUAGE_KEY, "fr").unwrap();
        let prefs = Preferences::new(store);
        assert_eq!(prefs.language().unwrap(), Language::En);
    }
}
