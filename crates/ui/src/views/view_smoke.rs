use dioxus::prelude::*;
use services::{StaticIdentityProvider, User};

use super::lecture::{FlashcardIntent, LectureTab, QuizIntent};
use super::test_harness::{ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_identity};
use crate::routes::Route;

const ECOM_LECTURE: ViewKind = ViewKind::Lecture("level-2", "ecommerce", "ecom-lec-2");

fn admin() -> StaticIdentityProvider {
    StaticIdentityProvider::signed_in(User::new("sara"), true)
}

fn quiz(harness: &mut ViewHarness, intent: QuizIntent) {
    let dispatch = harness.lecture.quiz();
    harness.dom.in_runtime(|| dispatch.call(intent));
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_hero_and_search() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Your University Study Companion"), "missing hero in {html}");
    assert!(html.contains("Search lectures..."), "missing search box in {html}");
    assert!(!html.contains("Continue reading"), "unexpected continue card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn levels_view_smoke_lists_every_level() {
    let mut harness = setup_view_harness(ViewKind::Levels).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Select Your Level"), "missing title in {html}");
    for name in ["Level 1", "Level 2", "Level 3", "Level 4"] {
        assert!(html.contains(name), "missing {name} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn level_view_smoke_renders_subject_cards() {
    let mut harness = setup_view_harness(ViewKind::Level("level-2")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Fundamentals of E-Commerce"), "missing subject in {html}");
    assert!(html.contains("Computer Animation"), "missing subject in {html}");
    assert!(html.contains("0%"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn level_view_smoke_reports_unknown_level() {
    let mut harness = setup_view_harness(ViewKind::Level("level-9")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Page not found"), "missing not found in {html}");
    assert!(html.contains("Go home"), "missing home link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subject_view_smoke_lists_lectures() {
    let mut harness = setup_view_harness(ViewKind::Subject("level-2", "os-security")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("os-lec-1"), "missing lecture link in {html}");
    assert!(html.contains("os-lec-2"), "missing lecture link in {html}");
    assert!(!html.contains('✓'), "nothing opened yet in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lecture_view_smoke_records_progress() {
    let mut harness = setup_view_harness(ECOM_LECTURE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Lecture 2: E-Commerce Infrastructure"),
        "missing title in {html}"
    );
    assert!(html.contains("Summary Notes"), "missing tab in {html}");

    let record = harness.app.progress().load().expect("load progress");
    assert!(record.is_opened("ecom-lec-2"));
    let last = record.last_read().expect("last read");
    assert_eq!(last.lecture_id.as_str(), "ecom-lec-2");
    assert_eq!(last.subject_id.as_str(), "ecommerce");
}

#[tokio::test(flavor = "current_thread")]
async fn lecture_view_smoke_flips_flashcards() {
    let mut harness = setup_view_harness(ECOM_LECTURE).await;
    harness.settle().await;

    let mut tab = harness.lecture.tab();
    harness.dom.in_runtime(|| tab.set(LectureTab::Flashcards));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("What is a CDN?"), "missing question in {html}");
    assert!(html.contains("1 of 3"), "missing position in {html}");

    let flashcards = harness.lecture.flashcards();
    harness.dom.in_runtime(|| flashcards.call(FlashcardIntent::Flip));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Content Delivery Network"), "missing answer in {html}");

    harness.dom.in_runtime(|| flashcards.call(FlashcardIntent::Next));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("2 of 3"), "missing position in {html}");
    assert!(!html.contains("flashcard--back"), "next card should show its question");
}

#[tokio::test(flavor = "current_thread")]
async fn lecture_view_smoke_scores_a_perfect_quiz() {
    let mut harness = setup_view_harness(ECOM_LECTURE).await;
    harness.settle().await;

    let mut tab = harness.lecture.tab();
    harness.dom.in_runtime(|| tab.set(LectureTab::Quiz));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Salesforce"), "missing options in {html}");

    quiz(&mut harness, QuizIntent::Select(1));
    quiz(&mut harness, QuizIntent::Check);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Correct!"), "missing verdict in {html}");

    quiz(&mut harness, QuizIntent::Advance);
    for answer in [2, 1] {
        quiz(&mut harness, QuizIntent::Select(answer));
        quiz(&mut harness, QuizIntent::Check);
        quiz(&mut harness, QuizIntent::Advance);
    }
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Quiz Complete!"), "missing completion in {html}");
    assert!(html.contains("Score: 3 / 3"), "missing score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_redirects_signed_out_visitors() {
    let mut harness = setup_view_harness(ViewKind::Admin).await;
    harness.settle().await;
    let html = harness.render();
    assert_eq!(harness.redirect.target(), Some(Route::Auth {}));
    assert!(
        html.contains("Sign in to open the admin dashboard."),
        "missing notice in {html}"
    );
    assert!(!html.contains("admin-import-json"), "import rendered in {html}");
    assert!(!html.contains("Import JSON"), "import rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_sends_learners_home() {
    let identity = StaticIdentityProvider::signed_in(User::new("omar"), false);
    let mut harness = setup_view_harness_with_identity(ViewKind::Admin, identity).await;
    harness.settle().await;
    let html = harness.render();
    assert_eq!(harness.redirect.target(), Some(Route::Home {}));
    assert!(!html.contains("admin-import-json"), "import rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_shows_import_to_admins() {
    let mut harness = setup_view_harness_with_identity(ViewKind::Admin, admin()).await;
    harness.settle().await;
    let html = harness.render();
    assert_eq!(harness.redirect.target(), None);
    assert!(html.contains("admin-import-json"), "missing textarea in {html}");
    assert!(html.contains("Import JSON"), "missing import button in {html}");
    assert!(html.contains("Upload Bundled Catalog"), "missing seed button in {html}");
}

const IMPORT_JSON: &str = r#"{
    "id": "compilers",
    "name": "Compilers",
    "nameAr": "المترجمات",
    "levelTag": "Level-3",
    "lectures": [{ "id": "comp-lec-1", "title": "Lexing", "titleAr": "التحليل" }]
}"#;

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_clears_input_after_import() {
    let mut harness = setup_view_harness_with_identity(ViewKind::Admin, admin()).await;
    harness.settle().await;

    let mut raw = harness.import.raw();
    let run = harness.import.run();
    harness.dom.in_runtime(|| raw.set(IMPORT_JSON.to_owned()));
    harness.dom.in_runtime(|| run.call(false));
    for _ in 0..4 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(
        html.contains("Imported 1 subject(s) with 1 lecture(s)."),
        "missing summary in {html}"
    );
    assert!(harness.dom.in_runtime(|| raw.read().is_empty()));
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_keeps_input_after_failed_import() {
    let mut harness = setup_view_harness_with_identity(ViewKind::Admin, admin()).await;
    harness.settle().await;

    let mut raw = harness.import.raw();
    let run = harness.import.run();
    harness.dom.in_runtime(|| raw.set("{ not json".to_owned()));
    harness.dom.in_runtime(|| run.call(false));
    for _ in 0..4 {
        harness.drive_async().await;
    }

    assert!(harness.render().contains("import-error"));
    assert_eq!(harness.dom.in_runtime(|| raw.read().clone()), "{ not json");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_names_the_signed_in_user() {
    let mut harness = setup_view_harness_with_identity(ViewKind::Auth, admin()).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("sara"), "missing user in {html}");
    assert!(html.contains("Administrator"), "missing role in {html}");
    assert!(html.contains("Sign Out"), "missing sign out in {html}");
}
