use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use study_core::Catalog;
use study_core::model::Language;

use crate::context::{AppContext, use_session};
use crate::routes::Route;
use crate::views::state::{PendingState, ViewState, use_catalog, view_state_from_resource};
use crate::vm::{SearchOutcome, labels, map_continue_reading, search_target};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let language = use_session().language();
    let text = labels(language);
    let resource = use_catalog();
    let state = view_state_from_resource(resource);
    let record = ctx.progress_record();

    rsx! {
        div { class: "page home-page",
            section { class: "hero",
                div { class: "hero-mark", "🎓" }
                h1 { class: "hero-title", "{text.hero}" }
                p { class: "hero-subtitle", "{text.subtitle}" }
                Link { class: "btn btn-primary btn-lg", to: Route::Levels {}, "{text.get_started}" }
            }
            PendingState {
                state: state.shape(),
                language,
                on_retry: move |()| {
                    let mut resource = resource;
                    resource.restart();
                },
            }
            if let ViewState::Ready(catalog) = state {
                SearchBox { catalog: catalog.clone(), language }
                if let Some(card) = map_continue_reading(&catalog, &record, language) {
                    section { class: "continue-card",
                        h3 { "{text.continue_reading}" }
                        Link { to: Route::from(card.target.clone()),
                            span { class: "continue-title", "{card.lecture_title}" }
                            span { class: "continue-subject", "{card.subject_name}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SearchBox(catalog: Catalog, language: Language) -> Element {
    let navigator = use_navigator();
    let text = labels(language);
    let mut query = use_signal(String::new);
    let mut no_match = use_signal(|| false);

    rsx! {
        form {
            class: "search",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let current = query.read().clone();
                match search_target(&catalog, &current) {
                    SearchOutcome::Blank => {}
                    SearchOutcome::NoMatch => no_match.set(true),
                    SearchOutcome::Found(target) => {
                        no_match.set(false);
                        query.set(String::new());
                        let _ = navigator.push(Route::from(target));
                    }
                }
            },
            input {
                class: "search-input",
                r#type: "search",
                placeholder: "{text.search_placeholder}",
                value: "{query}",
                oninput: move |evt| {
                    no_match.set(false);
                    query.set(evt.value());
                },
            }
            button { class: "btn btn-secondary", r#type: "submit", "{text.search_button}" }
            if no_match() {
                p { class: "search-empty", "{text.search_no_match}" }
            }
        }
    }
}
