use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, CatalogSource, StaticIdentityProvider};
use storage::local_store::InMemoryLocalStore;
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context, use_session_provider};
use crate::views::admin::{ImportTestHandles, RedirectRecorder};
use crate::views::lecture::LectureTestHandles;
use crate::views::{
    AdminView, AuthView, HomeView, LectureView, LevelView, LevelsView, SubjectView,
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Levels,
    Level(&'static str),
    Subject(&'static str, &'static str),
    Lecture(&'static str, &'static str, &'static str),
    Auth,
    Admin,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    lecture_handles: LectureTestHandles,
    import_handles: ImportTestHandles,
    redirect: RedirectRecorder,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_session_provider(&ctx);
    use_context_provider(|| props.view);
    use_context_provider(|| props.lecture_handles.clone());
    use_context_provider(|| props.import_handles.clone());
    use_context_provider(|| props.redirect.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Levels => rsx! { LevelsView {} },
        ViewKind::Level(level) => rsx! { LevelView { level_id: level.to_owned() } },
        ViewKind::Subject(level, subject) => rsx! {
            SubjectView { level_id: level.to_owned(), subject_id: subject.to_owned() }
        },
        ViewKind::Lecture(level, subject, lecture) => rsx! {
            LectureView {
                level_id: level.to_owned(),
                subject_id: subject.to_owned(),
                lecture_id: lecture.to_owned(),
            }
        },
        ViewKind::Auth => rsx! { AuthView {} },
        ViewKind::Admin => rsx! { AdminView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub app: Arc<AppServices>,
    pub lecture: LectureTestHandles,
    pub import: ImportTestHandles,
    pub redirect: RedirectRecorder,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_identity(view, StaticIdentityProvider::signed_out()).await
}

pub async fn setup_view_harness_with_identity(
    view: ViewKind,
    identity: StaticIdentityProvider,
) -> ViewHarness {
    let app = Arc::new(AppServices::new(
        Storage::in_memory(),
        Arc::new(InMemoryLocalStore::new()),
        CatalogSource::Bundled,
        Arc::new(identity),
    ));
    app.auth().refresh().await.expect("refresh session");

    let lecture = LectureTestHandles::default();
    let import = ImportTestHandles::default();
    let redirect = RedirectRecorder::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&app),
            view,
            lecture_handles: lecture.clone(),
            import_handles: import.clone(),
            redirect: redirect.clone(),
        },
    );

    ViewHarness {
        dom,
        app,
        lecture,
        import,
        redirect,
    }
}
