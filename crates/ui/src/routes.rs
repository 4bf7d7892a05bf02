use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use study_core::LectureEntry;

use crate::context::{AppContext, use_session, use_session_provider};
use crate::views::{
    AdminView, AuthView, HomeView, LectureView, LevelView, LevelsView, NotFoundView, SubjectView,
};
use crate::vm::labels;

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/levels", LevelsView)] Levels {},
        #[route("/level/:level_id", LevelView)] Level { level_id: String },
        #[route("/level/:level_id/subject/:subject_id", SubjectView)]
        Subject { level_id: String, subject_id: String },
        #[route("/level/:level_id/subject/:subject_id/lecture/:lecture_id", LectureView)]
        Lecture { level_id: String, subject_id: String, lecture_id: String },
        #[route("/auth", AuthView)] Auth {},
        #[route("/admin", AdminView)] Admin {},
        #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

//
// ─── NAV TARGETS ───────────────────────────────────────────────────────────────
//

/// Where a view model wants to send the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    Levels,
    Level {
        level_id: String,
    },
    Subject {
        level_id: String,
        subject_id: String,
    },
    Lecture {
        level_id: String,
        subject_id: String,
        lecture_id: String,
    },
    Auth,
    Admin,
}

impl NavTarget {
    /// Where a search hit leads.
    #[must_use]
    pub fn for_lecture(entry: &LectureEntry<'_>) -> Self {
        Self::Lecture {
            level_id: entry.level_id.to_string(),
            subject_id: entry.subject_id.to_string(),
            lecture_id: entry.lecture.id.to_string(),
        }
    }
}

impl From<NavTarget> for Route {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Home => Route::Home {},
            NavTarget::Levels => Route::Levels {},
            NavTarget::Level { level_id } => Route::Level { level_id },
            NavTarget::Subject {
                level_id,
                subject_id,
            } => Route::Subject {
                level_id,
                subject_id,
            },
            NavTarget::Lecture {
                level_id,
                subject_id,
                lecture_id,
            } => Route::Lecture {
                level_id,
                subject_id,
                lecture_id,
            },
            NavTarget::Auth => Route::Auth {},
            NavTarget::Admin => Route::Admin {},
        }
    }
}

//
// ─── LAYOUT ────────────────────────────────────────────────────────────────────
//

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session_provider(&ctx);

    let auth = ctx.auth();
    use_hook(move || {
        spawn(async move {
            let mut session = session;
            match auth.refresh().await {
                Ok(state) => session.set_auth_state(state),
                Err(err) => {
                    tracing::warn!(error = %err, "session refresh failed");
                    session.set_auth_state(auth.state());
                }
            }
        });
    });

    let language = session.language();
    let dir = if language.is_rtl() { "rtl" } else { "ltr" };
    let lang = language.code();

    rsx! {
        div { class: "app", dir: "{dir}", lang: "{lang}",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_session();
    let navigator = dioxus_router::use_navigator();
    let text = labels(session.language());
    let signed_in = session.auth_state().user().is_some();
    let preferences = ctx.preferences();
    let auth = ctx.auth();

    rsx! {
        nav { class: "navbar",
            Link { class: "brand", to: Route::Home {}, "{text.app_title}" }
            div { class: "nav-actions",
                Link { class: "btn btn-outline btn-admin", to: Route::Admin {}, "{text.nav_admin}" }
                Link { class: "btn btn-ghost", to: Route::Levels {}, "{text.nav_levels}" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| session.toggle_language(&preferences),
                    "{text.language_toggle}"
                }
                if signed_in {
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| {
                            let auth = auth.clone();
                            spawn(async move {
                                let mut session = session;
                                if let Err(err) = auth.sign_out().await {
                                    tracing::warn!(error = %err, "sign-out failed");
                                }
                                session.set_auth_state(auth.state());
                                let _ = navigator.push(Route::Home {});
                            });
                        },
                        "{text.sign_out}"
                    }
                } else {
                    Link { class: "btn btn-primary", to: Route::Auth {}, "{text.sign_in}" }
                }
            }
        }
    }
}
