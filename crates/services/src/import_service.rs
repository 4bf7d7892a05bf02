use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use storage::repository::CatalogRepository;
use study_core::model::Subject;
use study_core::{Catalog, parse_subject_batch};

use crate::auth::{AdminAccess, AuthState, User, admin_access};
use crate::error::ImportError;

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Top-level subjects written.
    pub imported_count: usize,
    pub lecture_count: usize,
}

/// Check that `actor` may import, before anything touches the store.
///
/// # Errors
///
/// Returns `AuthRequired`, `AuthForbidden` or `AuthPending` per the session state.
pub fn authorize(actor: &AuthState) -> Result<&User, ImportError> {
    match (admin_access(actor), actor.user()) {
        (AdminAccess::Granted, Some(user)) => Ok(user),
        (AdminAccess::RedirectToSignIn, _) => Err(ImportError::AuthRequired),
        (AdminAccess::RedirectHome, _) => Err(ImportError::AuthForbidden),
        _ => Err(ImportError::AuthPending),
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Validates admin-supplied catalog JSON and upserts it into the store.
///
/// One import runs at a time; a second call while one is in flight is
/// rejected rather than queued.
pub struct AdminImportService {
    subjects: Arc<dyn CatalogRepository>,
    in_flight: AtomicBool,
}

impl AdminImportService {
    #[must_use]
    pub fn new(subjects: Arc<dyn CatalogRepository>) -> Self {
        Self {
            subjects,
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlight<'_>, ImportError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ImportError::Busy)?;
        Ok(InFlight(&self.in_flight))
    }

    /// Import one subject object or an array of subjects.
    ///
    /// The whole batch is validated before the single store write, so a
    /// rejected batch leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns an auth error for a non-admin actor, `ImportError::Busy` while
    /// another import runs, `ImportError::Validation` for a bad payload and
    /// `ImportError::Store` if the write fails.
    pub async fn import_subjects(
        &self,
        actor: &AuthState,
        raw: &str,
    ) -> Result<ImportReport, ImportError> {
        let user = authorize(actor)?;
        let _in_flight = self.begin()?;
        tracing::info!(user = %user.id, bytes = raw.len(), "import started");

        let subjects = parse_subject_batch(raw).inspect_err(|err| {
            tracing::warn!(
                user = %user.id,
                subject = err.subject_id(),
                lecture = err.lecture_id(),
                error = %err,
                "import rejected"
            );
        })?;
        self.write(user, &subjects).await
    }

    /// Import every subject of the bundled catalog.
    ///
    /// # Errors
    ///
    /// Same as [`AdminImportService::import_subjects`].
    pub async fn seed_bundled(&self, actor: &AuthState) -> Result<ImportReport, ImportError> {
        let user = authorize(actor)?;
        let _in_flight = self.begin()?;
        tracing::info!(user = %user.id, "seeding bundled catalog");

        let catalog = Catalog::bundled()?;
        let subjects: Vec<Subject> = catalog
            .levels()
            .iter()
            .flat_map(|level| level.subjects.iter().cloned())
            .collect();
        self.write(user, &subjects).await
    }

    async fn write(&self, user: &User, subjects: &[Subject]) -> Result<ImportReport, ImportError> {
        let report = ImportReport {
            imported_count: subjects.len(),
            lecture_count: subjects.iter().map(|s| s.lectures.len()).sum(),
        };
        self.subjects.upsert_subjects(subjects).await.map_err(|err| {
            tracing::error!(user = %user.id, error = %err, "import write failed");
            err
        })?;
        tracing::info!(
            user = %user.id,
            subjects = report.imported_count,
            lectures = report.lecture_count,
            "import finished"
        );
        Ok(report)
    }
}
