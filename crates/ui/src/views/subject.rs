use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{AppContext, use_session};
use crate::routes::Route;
use crate::views::state::{PendingState, ViewError, ViewState, use_catalog, view_state_from_resource};
use crate::vm::{SubjectPageVm, labels, map_subject_page};

#[component]
pub fn SubjectView(level_id: String, subject_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let language = use_session().language();
    let text = labels(language);
    let resource = use_catalog();
    let record = ctx.progress_record();

    let state = match view_state_from_resource(resource) {
        ViewState::Ready(catalog) => match catalog.lookup_subject(&level_id, &subject_id) {
            Ok(subject) => ViewState::Ready(map_subject_page(subject, &record, language)),
            Err(missing) => ViewState::Error(ViewError::from(missing)),
        },
        ViewState::Loading => ViewState::Loading,
        ViewState::Idle => ViewState::Idle,
        ViewState::Error(err) => ViewState::Error(err),
    };

    rsx! {
        div { class: "page subject-page",
            Link {
                class: "btn btn-ghost back",
                to: Route::Level { level_id: level_id.clone() },
                "{text.back}"
            }
            PendingState {
                state: state.shape(),
                language,
                on_retry: move |()| {
                    let mut resource = resource;
                    resource.restart();
                },
            }
            if let ViewState::Ready(page) = state {
                SubjectDashboard { page, level_id, subject_id }
            }
        }
    }
}

#[component]
fn SubjectDashboard(page: SubjectPageVm, level_id: String, subject_id: String) -> Element {
    let text = labels(use_session().language());

    rsx! {
        header { class: "view-header",
            h1 { class: "view-title", "{page.name}" }
            div { class: "progress-row",
                span { class: "muted", "{text.progress}" }
                div { class: "progress-bar",
                    div { class: "progress-fill {page.color_class}", style: "width: {page.progress}%" }
                }
                span { class: "progress-value", "{page.progress}%" }
            }
        }
        h2 { class: "section-title", "{text.lectures}" }
        if page.lectures.is_empty() {
            div { class: "card card-empty", "{text.no_lectures}" }
        } else {
            div { class: "lecture-list",
                for lecture in page.lectures.iter() {
                    Link {
                        key: "{lecture.id}",
                        class: "card lecture-row",
                        to: Route::Lecture {
                            level_id: level_id.clone(),
                            subject_id: subject_id.clone(),
                            lecture_id: lecture.id.clone(),
                        },
                        span { class: "lecture-icon {page.color_class}", "📄" }
                        h3 { class: "lecture-title", "{lecture.title}" }
                        if lecture.opened {
                            span { class: "lecture-opened", "✓" }
                        }
                    }
                }
            }
        }
    }
}
