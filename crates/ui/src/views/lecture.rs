use dioxus::prelude::*;
use dioxus_router::Link;
use study_core::model::{Bilingual, Language, Lecture};
use study_core::{FlashcardSession, QuizSession, QuizState, SummaryBlock};

use crate::context::{AppContext, use_session};
use crate::routes::Route;
use crate::views::state::{PendingState, ViewError, ViewState, view_state_from_resource};
use crate::vm::{FlashcardVm, QuizVm, labels, map_flashcard, map_quiz, summary_blocks};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum LectureTab {
    #[default]
    Summary,
    Flashcards,
    Quiz,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlashcardIntent {
    Flip,
    Next,
    Prev,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum QuizIntent {
    Select(usize),
    Check,
    Advance,
    Restart,
}

#[derive(Clone, Debug, PartialEq)]
struct LectureData {
    subject_name: Bilingual,
    color_class: String,
    lecture: Lecture,
}

#[component]
pub fn LectureView(level_id: String, subject_id: String, lecture_id: String) -> Element {
    // Keyed so that tab, flashcard and quiz state start fresh per lecture.
    let key = format!("{level_id}/{subject_id}/{lecture_id}");
    rsx! {
        LecturePage { key: "{key}", level_id, subject_id, lecture_id }
    }
}

#[component]
fn LecturePage(level_id: String, subject_id: String, lecture_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let language = use_session().language();
    let text = labels(language);

    let resource = {
        let (level_id, subject_id, lecture_id) =
            (level_id.clone(), subject_id.clone(), lecture_id.clone());
        use_resource(move || {
            let catalog = ctx.catalog();
            let progress = ctx.progress();
            let (level_id, subject_id, lecture_id) =
                (level_id.clone(), subject_id.clone(), lecture_id.clone());
            async move {
                let catalog = catalog.load().await?;
                let level = catalog.lookup_level(&level_id)?;
                let subject = catalog.lookup_subject(&level_id, &subject_id)?;
                let lecture = catalog.lookup_lecture(&level_id, &subject_id, &lecture_id)?;
                if let Err(err) = progress.open_lecture(&level.id, &subject.id, &lecture.id) {
                    tracing::warn!(lecture = %lecture.id, error = %err, "progress not recorded");
                }
                Ok::<_, ViewError>(LectureData {
                    subject_name: subject.name.clone(),
                    color_class: subject.color.clone(),
                    lecture: lecture.clone(),
                })
            }
        })
    };
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page lecture-page",
            Link {
                class: "btn btn-ghost back",
                to: Route::Subject {
                    level_id: level_id.clone(),
                    subject_id: subject_id.clone(),
                },
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
            if let ViewState::Ready(data) = state {
                LectureBody { data }
            }
        }
    }
}

#[component]
fn LectureBody(data: LectureData) -> Element {
    let language = use_session().language();
    let text = labels(language);
    let mut tab = use_signal(LectureTab::default);
    let cards = {
        let initial = data.lecture.flashcards.clone();
        use_signal(move || FlashcardSession::new(initial))
    };
    let quiz = {
        let initial = data.lecture.quiz.clone();
        use_signal(move || QuizSession::new(initial))
    };

    let dispatch_flashcard = use_callback(move |intent: FlashcardIntent| {
        let mut cards = cards;
        let mut session = cards.write();
        match intent {
            FlashcardIntent::Flip => session.flip(),
            FlashcardIntent::Next => session.next(),
            FlashcardIntent::Prev => session.prev(),
        }
    });

    let dispatch_quiz = use_callback(move |intent: QuizIntent| {
        let mut quiz = quiz;
        let mut session = quiz.write();
        match intent {
            QuizIntent::Select(option) => {
                session.select_option(option);
            }
            QuizIntent::Check => {
                if let Some(outcome) = session.check() {
                    tracing::debug!(
                        correct = outcome.correct,
                        score = outcome.score,
                        "quiz answer checked"
                    );
                }
            }
            QuizIntent::Advance => {
                session.advance();
                if let QuizState::Finished { score } = session.state() {
                    tracing::info!(score, total = session.total(), "quiz finished");
                }
            }
            QuizIntent::Restart => session.restart(),
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<LectureTestHandles>() {
                handles.register(tab, dispatch_flashcard, dispatch_quiz);
            }
        }
    }

    let title = data.lecture.title.get(language).to_owned();
    let subject_name = data.subject_name.get(language).to_owned();
    let tabs = [
        (LectureTab::Summary, text.summary_tab),
        (LectureTab::Flashcards, text.flashcards_tab),
        (LectureTab::Quiz, text.quiz_tab),
    ];

    rsx! {
        header { class: "view-header lecture-header",
            span { class: "subject-chip {data.color_class}", "{subject_name}" }
            h1 { class: "view-title", "{title}" }
        }
        nav { class: "tabs", role: "tablist",
            for (kind, label) in tabs {
                button {
                    key: "{label}",
                    class: if tab() == kind { "tab tab--active" } else { "tab" },
                    r#type: "button",
                    role: "tab",
                    onclick: move |_| tab.set(kind),
                    "{label}"
                }
            }
        }
        {match tab() {
            LectureTab::Summary => rsx! {
                SummaryPanel { blocks: summary_blocks(&data.lecture, language) }
            },
            LectureTab::Flashcards => rsx! {
                FlashcardPanel {
                    vm: map_flashcard(&cards.read(), language),
                    language,
                    on_intent: dispatch_flashcard,
                }
            },
            LectureTab::Quiz => rsx! {
                QuizPanel {
                    vm: map_quiz(&quiz.read(), language),
                    language,
                    on_intent: dispatch_quiz,
                }
            },
        }}
    }
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

#[component]
fn SummaryPanel(blocks: Vec<SummaryBlock>) -> Element {
    rsx! {
        article { class: "card summary",
            for (index, block) in blocks.iter().enumerate() {
                Fragment { key: "{index}", {summary_block(block)} }
            }
        }
    }
}

fn summary_block(block: &SummaryBlock) -> Element {
    match block {
        SummaryBlock::Heading(text) => rsx! { h2 { class: "summary-heading", "{text}" } },
        SummaryBlock::Subheading(text) => rsx! { h3 { class: "summary-subheading", "{text}" } },
        SummaryBlock::LabeledBullet { label, text } => rsx! {
            div { class: "summary-bullet",
                span { class: "summary-dot", "•" }
                p {
                    strong { "{label}" }
                    if let Some(text) = text {
                        ": {text}"
                    }
                }
            }
        },
        SummaryBlock::Bullet(text) => rsx! {
            div { class: "summary-bullet",
                span { class: "summary-dot", "•" }
                p { "{text}" }
            }
        },
        SummaryBlock::Numbered(text) => rsx! { p { class: "summary-numbered", "{text}" } },
        SummaryBlock::Spacer => rsx! { div { class: "summary-spacer" } },
        SummaryBlock::Paragraph(text) => rsx! { p { class: "summary-paragraph", "{text}" } },
    }
}

//
// ─── FLASHCARDS ────────────────────────────────────────────────────────────────
//

#[component]
fn FlashcardPanel(
    vm: Option<FlashcardVm>,
    language: Language,
    on_intent: EventHandler<FlashcardIntent>,
) -> Element {
    let text = labels(language);
    let Some(card) = vm else {
        return rsx! {
            div { class: "card card-empty", "{text.no_flashcards}" }
        };
    };

    rsx! {
        section { class: "flashcards",
            p { class: "flashcard-position", "{card.position_label}" }
            button {
                class: if card.revealed { "flashcard flashcard--back" } else { "flashcard" },
                r#type: "button",
                onclick: move |_| on_intent.call(FlashcardIntent::Flip),
                span { class: "flashcard-face", "{card.face_label}" }
                p { class: "flashcard-text", "{card.text}" }
                span { class: "flashcard-hint muted", "{text.click_to_flip}" }
            }
            div { class: "flashcard-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !card.can_prev,
                    onclick: move |_| on_intent.call(FlashcardIntent::Prev),
                    "{text.previous}"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !card.can_next,
                    onclick: move |_| on_intent.call(FlashcardIntent::Next),
                    "{text.next}"
                }
            }
        }
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

#[component]
fn QuizPanel(vm: QuizVm, language: Language, on_intent: EventHandler<QuizIntent>) -> Element {
    let text = labels(language);
    match vm {
        QuizVm::Empty => rsx! {
            div { class: "card card-empty", "{text.no_quiz}" }
        },
        QuizVm::Finished { score_label } => rsx! {
            section { class: "card quiz-finished",
                div { class: "quiz-trophy", "🏆" }
                h2 { "{text.quiz_complete}" }
                p { class: "quiz-score", "{score_label}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Restart),
                    "{text.restart_quiz}"
                }
            }
        },
        QuizVm::Question {
            progress_label,
            score_label,
            prompt,
            options,
            verdict,
            can_check,
            checked,
            advance_label,
        } => rsx! {
            section { class: "card quiz",
                div { class: "quiz-meta",
                    span { "{progress_label}" }
                    span { "{score_label}" }
                }
                h2 { class: "quiz-prompt", "{prompt}" }
                div { class: "quiz-options",
                    for (index, option) in options.into_iter().enumerate() {
                        button {
                            key: "{index}",
                            class: "{option.class}",
                            r#type: "button",
                            disabled: !option.selectable,
                            onclick: move |_| on_intent.call(QuizIntent::Select(index)),
                            span { class: "quiz-letter", "{option.letter}" }
                            span { "{option.text}" }
                        }
                    }
                }
                if let Some((correct, message)) = verdict {
                    p {
                        class: if correct { "quiz-verdict quiz-verdict--correct" } else { "quiz-verdict quiz-verdict--incorrect" },
                        "{message}"
                    }
                }
                if checked {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Advance),
                        "{advance_label}"
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: !can_check,
                        onclick: move |_| on_intent.call(QuizIntent::Check),
                        "{text.check_answer}"
                    }
                }
            }
        },
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LectureTestHandles {
    tab: Rc<RefCell<Option<Signal<LectureTab>>>>,
    flashcards: Rc<RefCell<Option<Callback<FlashcardIntent>>>>,
    quiz: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl LectureTestHandles {
    pub(crate) fn register(
        &self,
        tab: Signal<LectureTab>,
        flashcards: Callback<FlashcardIntent>,
        quiz: Callback<QuizIntent>,
    ) {
        *self.tab.borrow_mut() = Some(tab);
        *self.flashcards.borrow_mut() = Some(flashcards);
        *self.quiz.borrow_mut() = Some(quiz);
    }

    pub(crate) fn tab(&self) -> Signal<LectureTab> {
        (*self.tab.borrow()).expect("lecture tab registered")
    }

    pub(crate) fn flashcards(&self) -> Callback<FlashcardIntent> {
        (*self.flashcards.borrow()).expect("flashcard dispatch registered")
    }

    pub(crate) fn quiz(&self) -> Callback<QuizIntent> {
        (*self.quiz.borrow()).expect("quiz dispatch registered")
    }
}
