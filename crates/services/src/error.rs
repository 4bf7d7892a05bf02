//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use study_core::ValidationError;

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("catalog document is invalid: {0}")]
    Validation(#[from] ValidationError),
    #[error("catalog request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `AdminImportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("sign in to import content")]
    AuthRequired,
    #[error("only administrators can import content")]
    AuthForbidden,
    #[error("still checking administrator access")]
    AuthPending,
    #[error("an import is already in progress")]
    Busy,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("store write failed: {0}")]
    Store(#[from] StorageError),
}

/// Errors emitted by the identity provider behind `AuthGate`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading or writing client-local state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LocalStateError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
