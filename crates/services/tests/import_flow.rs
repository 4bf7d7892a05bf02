use std::sync::Arc;

use async_trait::async_trait;
use services::{
    AdminFlag, AdminImportService, AppConfig, AppServices, AuthState, CatalogService,
    CatalogSource, ImportError, User,
};
use storage::repository::{CatalogRepository, InMemoryRepository, Storage, StorageError};
use study_core::ValidationError;
use study_core::model::{Subject, SubjectId};
use tokio::sync::Notify;

const GOOD_QUESTION: &str = r#"{
    "question": "2 + 2?",
    "questionAr": "٢ + ٢؟",
    "options": ["3", "4", "5", "22"],
    "optionsAr": ["٣", "٤", "٥", "٢٢"],
    "correctIndex": 1
}"#;

const BAD_QUESTION: &str = r#"{
    "question": "Pick one",
    "options": ["a", "b", "c", "d"],
    "optionsAr": ["أ", "ب", "ج", "د"],
    "correctIndex": 5
}"#;

fn subject_json(id: &str, lecture_id: &str, question: &str) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "name": "Calculus",
            "nameAr": "التفاضل",
            "color": "subject-ecommerce",
            "icon": "Sigma",
            "levelTag": "Level-3",
            "lectures": [{{
                "id": "{lecture_id}",
                "title": "Limits",
                "titleAr": "النهايات",
                "summary": "Limits intro",
                "summaryAr": "مقدمة النهايات",
                "flashcards": [{{"question": "Limit?", "questionAr": "نهاية؟", "answer": "A value", "answerAr": "قيمة"}}],
                "quiz": [{question}]
            }}]
        }}"#
    )
}

fn admin() -> AuthState {
    AuthState::SignedIn {
        user: User::new("admin"),
        admin: AdminFlag::Yes,
    }
}

fn service() -> (AdminImportService, InMemoryRepository) {
    let repo = InMemoryRepository::new();
    (AdminImportService::new(Arc::new(repo.clone())), repo)
}

#[tokio::test]
async fn signed_out_import_is_refused_before_any_write() {
    let (service, repo) = service();
    let raw = subject_json("calc", "calc-lec-1", GOOD_QUESTION);

    let err = service
        .import_subjects(&AuthState::SignedOut, &raw)
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::AuthRequired));
    assert!(repo.list_subjects().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_admin_and_pending_are_refused() {
    let (service, repo) = service();
    let raw = subject_json("calc", "calc-lec-1", GOOD_QUESTION);
    let learner = AuthState::SignedIn {
        user: User::new("learner"),
        admin: AdminFlag::No,
    };
    let pending = AuthState::SignedIn {
        user: User::new("learner"),
        admin: AdminFlag::Unknown,
    };

    assert!(matches!(
        service.import_subjects(&learner, &raw).await,
        Err(ImportError::AuthForbidden)
    ));
    assert!(matches!(
        service.import_subjects(&pending, &raw).await,
        Err(ImportError::AuthPending)
    ));
    assert!(repo.list_subjects().await.unwrap().is_empty());
}

#[tokio::test]
async fn single_object_and_array_are_both_accepted() {
    let (service, repo) = service();
    let one = subject_json("calc", "calc-lec-1", GOOD_QUESTION);
    let report = service.import_subjects(&admin(), &one).await.unwrap();
    assert_eq!(report.imported_count, 1);

    let two = format!(
        "[{}, {}]",
        subject_json("algebra", "alg-lec-1", GOOD_QUESTION),
        subject_json("geometry", "geo-lec-1", GOOD_QUESTION)
    );
    let report = service.import_subjects(&admin(), &two).await.unwrap();
    assert_eq!(report.imported_count, 2);
    assert_eq!(report.lecture_count, 2);

    let ids: Vec<_> = repo
        .list_subjects()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id.to_string())
        .collect();
    assert_eq!(ids, vec!["calc", "algebra", "geometry"]);
}

#[tokio::test]
async fn out_of_range_answer_names_the_lecture_and_writes_nothing() {
    let (service, repo) = service();
    let raw = format!(
        "[{}, {}]",
        subject_json("algebra", "alg-lec-1", GOOD_QUESTION),
        subject_json("math", "math-lec-1", BAD_QUESTION)
    );

    let err = service.import_subjects(&admin(), &raw).await.unwrap_err();

    let ImportError::Validation(validation) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(matches!(validation, ValidationError::Quiz { .. }));
    assert_eq!(validation.lecture_id(), Some("math-lec-1"));
    assert_eq!(validation.subject_id(), Some("math"));
    assert!(validation.to_string().contains("math-lec-1"));
    assert!(repo.list_subjects().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let (service, _) = service();
    let err = service
        .import_subjects(&admin(), "{ not json")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ImportError::Validation(ValidationError::Malformed(_))
    ));
}

#[tokio::test]
async fn reimporting_is_idempotent_and_counts_subjects_not_lectures() {
    let (service, repo) = service();
    let raw = format!(
        "[{}, {}]",
        subject_json("algebra", "alg-lec-1", GOOD_QUESTION),
        subject_json("geometry", "geo-lec-1", GOOD_QUESTION)
    );

    let first = service.import_subjects(&admin(), &raw).await.unwrap();
    let stored_once = repo.list_subjects().await.unwrap();
    let second = service.import_subjects(&admin(), &raw).await.unwrap();
    let stored_twice = repo.list_subjects().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.imported_count, 2);
    assert_eq!(stored_once, stored_twice);
}

#[derive(Default)]
struct GatedRepository {
    inner: InMemoryRepository,
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl CatalogRepository for GatedRepository {
    async fn upsert_subjects(&self, subjects: &[Subject]) -> Result<(), StorageError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.upsert_subjects(subjects).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        self.inner.list_subjects().await
    }

    async fn get_subject(&self, id: &SubjectId) -> Result<Option<Subject>, StorageError> {
        self.inner.get_subject(id).await
    }
}

#[tokio::test]
async fn second_import_while_one_is_in_flight_is_rejected() {
    let repo = Arc::new(GatedRepository::default());
    let service = Arc::new(AdminImportService::new(repo.clone()));
    let raw = subject_json("calc", "calc-lec-1", GOOD_QUESTION);

    let first = tokio::spawn({
        let service = Arc::clone(&service);
        let raw = raw.clone();
        async move {
            let actor = admin();
            service.import_subjects(&actor, &raw).await
        }
    });

    repo.entered.notified().await;
    assert!(service.is_busy());
    assert!(matches!(
        service.import_subjects(&admin(), &raw).await,
        Err(ImportError::Busy)
    ));

    repo.release.notify_one();
    let report = first.await.expect("join").expect("first import");
    assert_eq!(report.imported_count, 1);
    assert!(!service.is_busy());
}

#[tokio::test]
async fn seeded_bundle_shows_up_in_store_backed_catalog() {
    let storage = Storage::in_memory();
    let service = AdminImportService::new(Arc::clone(&storage.catalog));
    let report = service.seed_bundled(&admin()).await.unwrap();
    assert_eq!(report.imported_count, 4);
    assert_eq!(report.lecture_count, 3);

    let raw = subject_json("calc", "calc-lec-1", GOOD_QUESTION);
    service.import_subjects(&admin(), &raw).await.unwrap();

    let catalog = CatalogService::new(CatalogSource::Store, Arc::clone(&storage.catalog))
        .load()
        .await
        .unwrap();
    let lecture = catalog
        .lookup_lecture("level-3", "calc", "calc-lec-1")
        .unwrap();
    assert_eq!(lecture.quiz[0].correct_index(), 1);
    assert!(catalog.lookup_lecture("level-2", "ecommerce", "ecom-lec-2").is_ok());
}

#[tokio::test]
async fn sqlite_import_through_app_services() {
    let config = AppConfig {
        db_url: Some("sqlite:file:memdb_import_flow?mode=memory&cache=shared".into()),
        catalog_source: CatalogSource::Store,
        user: Some("sara".into()),
        ..AppConfig::default()
    };
    let services = AppServices::from_config(&config).await.expect("services");
    services
        .storage()
        .profiles
        .set_admin("sara", true)
        .await
        .unwrap();

    let actor = services.auth().refresh().await.unwrap();
    let raw = subject_json("calc", "calc-lec-1", GOOD_QUESTION);
    let report = services
        .import()
        .import_subjects(&actor, &raw)
        .await
        .unwrap();
    assert_eq!(report.imported_count, 1);

    let catalog = services.catalog().load().await.unwrap();
    assert!(catalog.lookup_subject("level-3", "calc").is_ok());
}
