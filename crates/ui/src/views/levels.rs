use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{AppContext, use_session};
use crate::routes::Route;
use crate::views::state::{PendingState, ViewState, use_catalog, view_state_from_resource};
use crate::vm::{labels, map_level_cards, map_subject_cards};

#[component]
pub fn LevelsView() -> Element {
    let language = use_session().language();
    let text = labels(language);
    let resource = use_catalog();
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page levels-page",
            Link { class: "btn btn-ghost back", to: Route::Home {}, "{text.back}" }
            h1 { class: "view-title", "{text.levels_title}" }
            PendingState {
                state: state.shape(),
                language,
                on_retry: move |()| {
                    let mut resource = resource;
                    resource.restart();
                },
            }
            if let ViewState::Ready(catalog) = state {
                div { class: "card-grid",
                    for card in map_level_cards(&catalog, language) {
                        Link {
                            key: "{card.id}",
                            class: "card level-card",
                            to: Route::Level { level_id: card.id.clone() },
                            div { class: "level-icon", "📖" }
                            h2 { "{card.name}" }
                            p { class: "muted", "{card.subject_count_label}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn LevelView(level_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let language = use_session().language();
    let text = labels(language);
    let resource = use_catalog();
    let state = view_state_from_resource(resource);
    let record = ctx.progress_record();

    let page = match &state {
        ViewState::Ready(catalog) => match catalog.lookup_level(&level_id) {
            Ok(level) => Some((
                level.name.get(language).to_owned(),
                map_subject_cards(level, &record, language),
            )),
            Err(missing) => {
                return rsx! {
                    div { class: "page",
                        PendingState {
                            state: ViewState::Error(missing.into()),
                            language,
                            on_retry: |()| {},
                        }
                    }
                };
            }
        },
        _ => None,
    };

    rsx! {
        div { class: "page level-page",
            Link { class: "btn btn-ghost back", to: Route::Levels {}, "{text.back}" }
            PendingState {
                state: state.shape(),
                language,
                on_retry: move |()| {
                    let mut resource = resource;
                    resource.restart();
                },
            }
            if let Some((name, subjects)) = page {
                h1 { class: "view-title", "{name}" }
                p { class: "muted", "{text.subjects}" }
                if subjects.is_empty() {
                    div { class: "card card-empty", "{text.no_subjects}" }
                } else {
                    div { class: "card-grid",
                        for subject in subjects {
                            Link {
                                key: "{subject.id}",
                                class: "card subject-card",
                                to: Route::Subject {
                                    level_id: level_id.clone(),
                                    subject_id: subject.id.clone(),
                                },
                                div { class: "subject-stripe {subject.color_class}" }
                                div { class: "subject-icon {subject.color_class}", "{subject.icon}" }
                                div { class: "subject-body",
                                    h3 { "{subject.name}" }
                                    p { class: "muted", "{subject.lecture_count_label}" }
                                    div { class: "progress-bar",
                                        div {
                                            class: "progress-fill",
                                            style: "width: {subject.progress}%",
                                        }
                                    }
                                    span { class: "progress-value", "{subject.progress}%" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
