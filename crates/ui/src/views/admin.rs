use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::{AdminAccess, ImportError, ImportReport, admin_access};
use study_core::model::Language;

use crate::context::{AppContext, use_session};
use crate::routes::Route;
use crate::vm::labels;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
enum ImportStatus {
    Idle,
    Running,
    Done(ImportReport),
    Failed(String),
}

/// Admin dashboard. Nothing protected renders until the gate has resolved
/// the admin flag.
#[component]
pub fn AdminView() -> Element {
    let session = use_session();
    let language = session.language();
    let text = labels(language);

    match admin_access(&session.auth_state()) {
        AdminAccess::Pending => rsx! {
            div { class: "page admin-page",
                div { class: "spinner", role: "status", "aria-label": "{text.loading}" }
            }
        },
        AdminAccess::RedirectToSignIn => rsx! {
            Redirect { to: Route::Auth {}, notice: text.redirect_sign_in }
        },
        AdminAccess::RedirectHome => rsx! {
            Redirect { to: Route::Home {}, notice: text.redirect_home }
        },
        AdminAccess::Granted => rsx! {
            div { class: "page admin-page",
                h1 { class: "view-title", "{text.admin_title}" }
                ImportPanel { language }
            }
        },
    }
}

/// Replace the current entry with `to`, showing `notice` until the router
/// has moved on.
#[component]
fn Redirect(to: Route, notice: &'static str) -> Element {
    #[cfg(test)]
    {
        if let Some(recorder) = try_consume_context::<RedirectRecorder>() {
            recorder.record(to.clone());
            return rsx! {
                p { class: "redirect-notice", "{notice}" }
            };
        }
    }

    let navigator = use_navigator();
    use_effect(move || {
        let _ = navigator.replace(to.clone());
    });

    rsx! {
        p { class: "redirect-notice", "{notice}" }
    }
}

#[component]
fn ImportPanel(language: Language) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();
    let text = labels(language);
    let mut raw = use_signal(String::new);
    let mut status = use_signal(|| ImportStatus::Idle);

    let busy = status() == ImportStatus::Running || ctx.import().is_busy();

    let run_import = use_callback(move |seed: bool| {
        let import = ctx.import();
        let actor = session.auth_state();
        let payload = raw.read().clone();
        status.set(ImportStatus::Running);
        spawn(async move {
            let mut raw = raw;
            let mut status = status;
            let result = if seed {
                import.seed_bundled(&actor).await
            } else {
                import.import_subjects(&actor, &payload).await
            };
            let next = import_status(result);
            if clears_payload(&next, seed) {
                raw.set(String::new());
            }
            status.set(next);
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ImportTestHandles>() {
                handles.register(raw, run_import);
            }
        }
    }

    rsx! {
        section { class: "card admin-section",
            h2 { "{text.import_title}" }
            p { class: "muted", "{text.import_hint}" }
            textarea {
                id: "admin-import-json",
                class: "import-input",
                rows: "14",
                spellcheck: "false",
                dir: "ltr",
                value: "{raw}",
                oninput: move |evt| raw.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: busy || raw.read().trim().is_empty(),
                onclick: move |_| run_import.call(false),
                if busy { "{text.importing}" } else { "{text.import_button}" }
            }
        }
        section { class: "card admin-section",
            h2 { "{text.seed_title}" }
            p { class: "muted", "{text.seed_hint}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: busy,
                onclick: move |_| run_import.call(true),
                "{text.seed_button}"
            }
        }
        {match status() {
            ImportStatus::Idle | ImportStatus::Running => rsx! {},
            ImportStatus::Done(report) => {
                let summary = import_summary(language, report);
                rsx! {
                    p { class: "import-result", "{summary}" }
                }
            }
            ImportStatus::Failed(message) => rsx! {
                p { class: "import-error", role: "alert", "{text.import_failed}: {message}" }
            },
        }}
    }
}

fn import_status(result: Result<ImportReport, ImportError>) -> ImportStatus {
    match result {
        Ok(report) => ImportStatus::Done(report),
        Err(err) => {
            tracing::warn!(error = %err, "import failed");
            ImportStatus::Failed(err.to_string())
        }
    }
}

/// A successful JSON import empties the input. Seeding never touches it.
fn clears_payload(status: &ImportStatus, seed: bool) -> bool {
    !seed && matches!(status, ImportStatus::Done(_))
}

fn import_summary(language: Language, report: ImportReport) -> String {
    match language {
        Language::En => format!(
            "Imported {} subject(s) with {} lecture(s).",
            report.imported_count, report.lecture_count
        ),
        Language::Ar => format!(
            "تم استيراد {} مادة تحتوي على {} محاضرة.",
            report.imported_count, report.lecture_count
        ),
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct RedirectRecorder {
    target: Rc<RefCell<Option<Route>>>,
}

#[cfg(test)]
impl RedirectRecorder {
    fn record(&self, to: Route) {
        *self.target.borrow_mut() = Some(to);
    }

    pub(crate) fn target(&self) -> Option<Route> {
        self.target.borrow().clone()
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ImportTestHandles {
    raw: Rc<RefCell<Option<Signal<String>>>>,
    run: Rc<RefCell<Option<Callback<bool>>>>,
}

#[cfg(test)]
impl ImportTestHandles {
    fn register(&self, raw: Signal<String>, run: Callback<bool>) {
        *self.raw.borrow_mut() = Some(raw);
        *self.run.borrow_mut() = Some(run);
    }

    pub(crate) fn raw(&self) -> Signal<String> {
        (*self.raw.borrow()).expect("import input registered")
    }

    pub(crate) fn run(&self) -> Callback<bool> {
        (*self.run.borrow()).expect("import dispatch registered")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_subjects_and_lectures() {
        let report = ImportReport {
            imported_count: 2,
            lecture_count: 5,
        };
        assert_eq!(
            import_summary(Language::En, report),
            "Imported 2 subject(s) with 5 lecture(s)."
        );
        assert!(import_summary(Language::Ar, report).contains('5'));
    }

    #[test]
    fn only_a_successful_json_import_clears_the_input() {
        let done = ImportStatus::Done(ImportReport {
            imported_count: 1,
            lecture_count: 1,
        });
        assert!(clears_payload(&done, false));
        assert!(!clears_payload(&done, true));
        assert!(!clears_payload(&ImportStatus::Failed("bad".into()), false));
    }

    #[test]
    fn failures_carry_the_error_message() {
        assert_eq!(
            import_status(Err(ImportError::Busy)),
            ImportStatus::Failed("an import is already in progress".to_owned())
        );
    }
}
