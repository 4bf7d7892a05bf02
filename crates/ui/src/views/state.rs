use dioxus::prelude::*;
use services::CatalogError;
use study_core::model::Language;
use study_core::{Catalog, NotFound};

use crate::context::AppContext;
use crate::vm::labels;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotFound(NotFound),
    Unavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(&self, language: Language) -> String {
        let text = labels(language);
        match self {
            ViewError::NotFound(missing) => format!("{}: {missing}", text.not_found_title),
            ViewError::Unavailable => text.unavailable.to_owned(),
        }
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ViewError::Unavailable)
    }
}

impl From<NotFound> for ViewError {
    fn from(missing: NotFound) -> Self {
        ViewError::NotFound(missing)
    }
}

impl From<CatalogError> for ViewError {
    fn from(err: CatalogError) -> Self {
        tracing::warn!(error = %err, "catalog unavailable");
        ViewError::Unavailable
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unavailable),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Load the catalog from whichever source the app was configured with.
pub fn use_catalog() -> Resource<Result<Catalog, ViewError>> {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    use_resource(move || {
        let catalog = catalog.clone();
        async move { Ok::<_, ViewError>(catalog.load().await?) }
    })
}

/// Shared rendering for the non-ready states of a page.
#[component]
pub fn PendingState(state: ViewState<()>, language: Language, on_retry: EventHandler) -> Element {
    let text = labels(language);
    match state {
        ViewState::Idle | ViewState::Ready(()) => rsx! {},
        ViewState::Loading => rsx! {
            p { class: "loading", "{text.loading}" }
        },
        ViewState::Error(err) => {
            let message = err.message(language);
            rsx! {
                div { class: "view-error",
                    p { "{message}" }
                    if err.is_retryable() {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_retry.call(()),
                            "{text.retry}"
                        }
                    } else {
                        dioxus_router::Link {
                            class: "btn btn-ghost",
                            to: crate::routes::Route::Home {},
                            "{text.go_home}"
                        }
                    }
                }
            }
        }
    }
}

impl<T> ViewState<T> {
    /// The same state with the ready payload dropped.
    #[must_use]
    pub fn shape(&self) -> ViewState<()> {
        match self {
            ViewState::Idle => ViewState::Idle,
            ViewState::Loading => ViewState::Loading,
            ViewState::Ready(_) => ViewState::Ready(()),
            ViewState::Error(err) => ViewState::Error(err.clone()),
        }
    }
}
