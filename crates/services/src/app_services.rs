use std::path::PathBuf;
use std::sync::Arc;

use storage::local_store::{FileLocalStore, InMemoryLocalStore, LocalStore};
use storage::repository::Storage;

use crate::auth::{AuthGate, IdentityProvider, ProfileDirectory, User};
use crate::catalog_service::{CatalogService, CatalogSource};
use crate::error::AppServicesError;
use crate::import_service::AdminImportService;
use crate::preferences::Preferences;
use crate::progress::ProgressTracker;

/// Settings the binary resolves from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// `SQLite` URL; `None` keeps everything in memory.
    pub db_url: Option<String>,
    /// Client-state file; `None` keeps client state in memory.
    pub state_file: Option<PathBuf>,
    pub catalog_source: CatalogSource,
    /// Signed-in user id; `None` starts signed out.
    pub user: Option<String>,
}

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressTracker>,
    preferences: Arc<Preferences>,
    auth: Arc<AuthGate>,
    import: Arc<AdminImportService>,
}

impl AppServices {
    /// Wire services over already-built adapters.
    #[must_use]
    pub fn new(
        storage: Storage,
        local: Arc<dyn LocalStore>,
        catalog_source: CatalogSource,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let catalog = Arc::new(CatalogService::new(
            catalog_source,
            Arc::clone(&storage.catalog),
        ));
        let progress = Arc::new(ProgressTracker::new(Arc::clone(&local)));
        let preferences = Arc::new(Preferences::new(local));
        let auth = Arc::new(AuthGate::new(identity));
        let import = Arc::new(AdminImportService::new(Arc::clone(&storage.catalog)));
        Self {
            storage,
            catalog,
            progress,
            preferences,
            auth,
            import,
        }
    }

    /// Build services from configuration, connecting and migrating `SQLite`
    /// when a URL is given.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppServicesError> {
        let storage = match &config.db_url {
            Some(url) => Storage::sqlite(url).await?,
            None => Storage::in_memory(),
        };
        let local: Arc<dyn LocalStore> = match &config.state_file {
            Some(path) => Arc::new(FileLocalStore::new(path.clone())),
            None => Arc::new(InMemoryLocalStore::new()),
        };
        let identity: Arc<dyn IdentityProvider> = Arc::new(ProfileDirectory::new(
            config.user.clone().map(User::new),
            Arc::clone(&storage.profiles),
        ));
        tracing::info!(
            db = config.db_url.as_deref().unwrap_or("memory"),
            catalog = %config.catalog_source,
            signed_in = config.user.is_some(),
            "services configured"
        );
        Ok(Self::new(
            storage,
            local,
            config.catalog_source.clone(),
            identity,
        ))
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
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
}
