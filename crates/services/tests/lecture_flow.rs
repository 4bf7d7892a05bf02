use std::sync::Arc;

use services::{
    AdminAccess, AppConfig, AppServices, CatalogSource, StaticIdentityProvider, admin_access,
};
use storage::local_store::InMemoryLocalStore;
use storage::repository::Storage;
use study_core::model::Language;
use study_core::{FlashcardSession, QuizSession, QuizState};

#[tokio::test]
async fn studying_a_lecture_updates_progress() {
    let services = AppServices::from_config(&AppConfig::default())
        .await
        .expect("services");
    let catalog = services.catalog().load().await.unwrap();
    let progress = services.progress();

    let level = catalog.lookup_level("level-2").unwrap();
    let subject = catalog.lookup_subject("level-2", "ecommerce").unwrap();
    let lecture = catalog
        .lookup_lecture("level-2", "ecommerce", "ecom-lec-2")
        .unwrap();
    assert_eq!(progress.subject_progress(subject).unwrap(), 0);

    progress
        .open_lecture(&level.id, &subject.id, &lecture.id)
        .unwrap();
    assert_eq!(progress.subject_progress(subject).unwrap(), 100);
    let last = progress.load().unwrap().last_read().cloned().unwrap();
    assert_eq!(last.lecture_id, lecture.id);

    let mut cards = FlashcardSession::new(lecture.flashcards.clone());
    assert_eq!(cards.len(), 3);
    cards.flip();
    assert!(cards.is_revealed());
    cards.next();
    cards.next();
    cards.next();
    assert_eq!(cards.position(), Some(3));

    let mut quiz = QuizSession::new(lecture.quiz.clone());
    for question in &lecture.quiz {
        assert!(quiz.select_option(question.correct_index()));
        quiz.check().unwrap();
        quiz.advance();
    }
    assert_eq!(quiz.state(), QuizState::Finished { score: 3 });
}

#[tokio::test]
async fn search_leads_to_a_lecture_with_its_full_route() {
    let services = AppServices::from_config(&AppConfig::default())
        .await
        .expect("services");
    let catalog = services.catalog().load().await.unwrap();

    let hit = catalog.search_lectures(" Processes").unwrap();
    assert_eq!(hit.level_id.as_str(), "level-2");
    assert_eq!(hit.subject_id.as_str(), "os-security");
    assert_eq!(hit.lecture.id.as_str(), "os-lec-2");

    services
        .progress()
        .open_lecture(hit.level_id, hit.subject_id, &hit.lecture.id)
        .unwrap();
    let os = catalog.lookup_subject("level-2", "os-security").unwrap();
    assert_eq!(services.progress().subject_progress(os).unwrap(), 50);
}

#[tokio::test]
async fn language_preference_survives_service_rebuild() {
    let local = Arc::new(InMemoryLocalStore::new());
    let build = || {
        AppServices::new(
            Storage::in_memory(),
            local.clone(),
            CatalogSource::Bundled,
            Arc::new(StaticIdentityProvider::signed_out()),
        )
    };

    let first = build();
    assert_eq!(first.preferences().language().unwrap(), Language::En);
    first.preferences().set_language(Language::Ar).unwrap();

    let second = build();
    assert_eq!(second.preferences().language().unwrap(), Language::Ar);
}

#[tokio::test]
async fn signed_out_session_is_sent_to_sign_in_for_admin() {
    let services = AppServices::from_config(&AppConfig::default())
        .await
        .expect("services");
    let auth = services.auth();
    assert_eq!(admin_access(&auth.state()), AdminAccess::Pending);
    auth.refresh().await.unwrap();
    assert_eq!(admin_access(&auth.state()), AdminAccess::RedirectToSignIn);
}
