use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::use_session;
use crate::routes::Route;
use crate::vm::labels;

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let text = labels(use_session().language());
    let path = format!("/{}", segments.join("/"));
    tracing::debug!(%path, "no route matched");

    rsx! {
        div { class: "page not-found-page",
            section { class: "card",
                h1 { class: "view-title", "{text.not_found_title}" }
                p { class: "muted", code { "{path}" } }
                Link { class: "btn btn-primary", to: Route::Home {}, "{text.go_home}" }
            }
        }
    }
}
