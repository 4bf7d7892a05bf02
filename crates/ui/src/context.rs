use std::sync::Arc;

use dioxus::prelude::*;
use services::{
    AdminImportService, AppServices, AuthGate, AuthState, CatalogService, Preferences,
    ProgressTracker,
};
use study_core::ProgressRecord;
use study_core::model::Language;

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<CatalogService>;
    fn progress(&self) -> Arc<ProgressTracker>;
    fn preferences(&self) -> Arc<Preferences>;
    fn auth(&self) -> Arc<AuthGate>;
    fn import(&self) -> Arc<AdminImportService>;
}

impl UiApp for AppServices {
    fn catalog(&self) -> Arc<CatalogService> {
        AppServices::catalog(self)
    }

    fn progress(&self) -> Arc<ProgressTracker> {
        AppServices::progress(self)
    }

    fn preferences(&self) -> Arc<Preferences> {
        AppServices::preferences(self)
    }

    fn auth(&self) -> Arc<AuthGate> {
        AppServices::auth(self)
    }

    fn import(&self) -> Arc<AdminImportService> {
        AppServices::import(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressTracker>,
    preferences: Arc<Preferences>,
    auth: Arc<AuthGate>,
    import: Arc<AdminImportService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            progress: app.progress(),
            preferences: app.preferences(),
            auth: app.auth(),
            import: app.import(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<Preferences> {
        Arc::clone(&self.preferences)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthGate> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn import(&self) -> Arc<AdminImportService> {
        Arc::clone(&self.import)
    }

    /// Current progress; an unreadable store renders as no progress.
    #[must_use]
    pub fn progress_record(&self) -> ProgressRecord {
        self.progress.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "progress unavailable");
            ProgressRecord::new()
        })
    }

    fn stored_language(&self) -> Language {
        self.preferences.language().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "language preference unavailable");
            Language::default()
        })
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Reactive per-window state: display language and the last known auth state.
#[derive(Clone, Copy, PartialEq)]
pub struct UiSession {
    language: Signal<Language>,
    auth: Signal<AuthState>,
}

impl UiSession {
    #[must_use]
    pub fn language(&self) -> Language {
        (self.language)()
    }

    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.auth.read().clone()
    }

    pub fn set_auth_state(&mut self, state: AuthState) {
        self.auth.set(state);
    }

    /// Flip the language and persist the choice. A failed write still flips
    /// the language for this window.
    pub fn toggle_language(&mut self, preferences: &Preferences) {
        let next = self.language().toggled();
        if let Err(err) = preferences.set_language(next) {
            tracing::warn!(error = %err, "language preference not saved");
        }
        self.language.set(next);
    }
}

/// Provide the session to every descendant, seeded from stored preferences
/// and the gate's current state.
pub fn use_session_provider(ctx: &AppContext) -> UiSession {
    use_context_provider(|| UiSession {
        language: Signal::new(ctx.stored_language()),
        auth: Signal::new(ctx.auth.state()),
    })
}

#[must_use]
pub fn use_session() -> UiSession {
    use_context::<UiSession>()
}
