#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod catalog_service;
pub mod error;
pub mod import_service;
pub mod preferences;
pub mod progress;

pub use app_services::{AppConfig, AppServices};
pub use auth::{
    AdminAccess, AdminFlag, AuthGate, AuthState, IdentityProvider, ProfileDirectory,
    StaticIdentityProvider, SubscriptionId, User, admin_access,
};
pub use catalog_service::{CatalogService, CatalogSource, UnknownCatalogSource};
pub use error::{AppServicesError, AuthError, CatalogError, ImportError, LocalStateError};
pub use import_service::{AdminImportService, ImportReport};
pub use preferences::Preferences;
pub use progress::ProgressTracker;
