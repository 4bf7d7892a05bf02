use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::{AdminFlag, AuthState};

use crate::context::{AppContext, use_session};
use crate::routes::Route;
use crate::vm::labels;

/// Session status page. Signing in itself happens with the identity
/// provider; this page reports what the provider currently says.
#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();
    let navigator = use_navigator();
    let text = labels(session.language());

    let body = match session.auth_state() {
        AuthState::Loading => rsx! {
            p { class: "loading", "{text.checking_session}" }
        },
        AuthState::SignedOut => rsx! {
            p { class: "muted", "{text.signed_out_hint}" }
            Link { class: "btn btn-ghost", to: Route::Home {}, "{text.go_home}" }
        },
        AuthState::SignedIn { user, admin } => {
            let who = user.email.clone().unwrap_or_else(|| user.id.clone());
            let role = match admin {
                AdminFlag::Yes => text.role_admin,
                AdminFlag::No | AdminFlag::Unknown => text.role_learner,
            };
            rsx! {
                p { class: "auth-user",
                    "{text.signed_in_as} "
                    strong { "{who}" }
                }
                span { class: "badge", "{role}" }
                div { class: "auth-actions",
                    if admin == AdminFlag::Yes {
                        Link { class: "btn btn-secondary", to: Route::Admin {}, "{text.nav_admin}" }
                    }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| {
                            let auth = ctx.auth();
                            spawn(async move {
                                let mut session = session;
                                if let Err(err) = auth.sign_out().await {
                                    tracing::warn!(error = %err, "sign out failed");
                                }
                                session.set_auth_state(auth.state());
                                let _ = navigator.push(Route::Home {});
                            });
                        },
                        "{text.sign_out}"
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "page auth-page",
            section { class: "card auth-card",
                h1 { class: "view-title", "{text.auth_title}" }
                {body}
            }
        }
    }
}
