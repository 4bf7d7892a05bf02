use study_core::model::{Language, Level, Subject};
use study_core::{Catalog, ProgressRecord};

use crate::routes::NavTarget;
use crate::vm::labels;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCardVm {
    pub id: String,
    pub name: String,
    pub subject_count_label: String,
}

#[must_use]
pub fn map_level_cards(catalog: &Catalog, language: Language) -> Vec<LevelCardVm> {
    let text = labels(language);
    catalog
        .levels()
        .iter()
        .map(|level| LevelCardVm {
            id: level.id.to_string(),
            name: level.name.get(language).to_owned(),
            subject_count_label: format!("{} {}", level.subjects.len(), text.subjects),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCardVm {
    pub id: String,
    pub name: String,
    pub color_class: String,
    pub icon: &'static str,
    pub lecture_count_label: String,
    pub progress: u8,
}

#[must_use]
pub fn map_subject_cards(
    level: &Level,
    record: &ProgressRecord,
    language: Language,
) -> Vec<SubjectCardVm> {
    let text = labels(language);
    level
        .subjects
        .iter()
        .map(|subject| SubjectCardVm {
            id: subject.id.to_string(),
            name: subject.name.get(language).to_owned(),
            color_class: color_class(&subject.color),
            icon: icon_glyph(&subject.icon),
            lecture_count_label: format!("{} {}", subject.lectures.len(), text.lectures),
            progress: record.subject_progress(subject),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LectureRowVm {
    pub id: String,
    pub title: String,
    pub opened: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectPageVm {
    pub name: String,
    pub color_class: String,
    pub progress: u8,
    pub lectures: Vec<LectureRowVm>,
}

#[must_use]
pub fn map_subject_page(
    subject: &Subject,
    record: &ProgressRecord,
    language: Language,
) -> SubjectPageVm {
    SubjectPageVm {
        name: subject.name.get(language).to_owned(),
        color_class: color_class(&subject.color),
        progress: record.subject_progress(subject),
        lectures: subject
            .lectures
            .iter()
            .map(|lecture| LectureRowVm {
                id: lecture.id.to_string(),
                title: lecture.title.get(language).to_owned(),
                opened: record.is_opened(lecture.id.as_str()),
            })
            .collect(),
    }
}

/// The "continue reading" card for the last lecture opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinueReadingVm {
    pub target: NavTarget,
    pub lecture_title: String,
    pub subject_name: String,
}

/// `None` when nothing was read yet or the lecture is no longer in the catalog.
#[must_use]
pub fn map_continue_reading(
    catalog: &Catalog,
    record: &ProgressRecord,
    language: Language,
) -> Option<ContinueReadingVm> {
    let last = record.last_read()?;
    let subject = catalog
        .lookup_subject(last.level_id.as_str(), last.subject_id.as_str())
        .ok()?;
    let lecture = subject.find_lecture(last.lecture_id.as_str())?;
    Some(ContinueReadingVm {
        target: NavTarget::Lecture {
            level_id: last.level_id.to_string(),
            subject_id: last.subject_id.to_string(),
            lecture_id: last.lecture_id.to_string(),
        },
        lecture_title: lecture.title.get(language).to_owned(),
        subject_name: subject.name.get(language).to_owned(),
    })
}

/// Outcome of submitting the search box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Blank,
    Found(NavTarget),
    NoMatch,
}

#[must_use]
pub fn search_target(catalog: &Catalog, query: &str) -> SearchOutcome {
    if query.trim().is_empty() {
        return SearchOutcome::Blank;
    }
    catalog
        .search_lectures(query)
        .map_or(SearchOutcome::NoMatch, |entry| {
            SearchOutcome::Found(NavTarget::for_lecture(&entry))
        })
}

fn color_class(color: &str) -> String {
    if color.trim().is_empty() {
        "subject-default".to_owned()
    } else {
        color.to_owned()
    }
}

fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "Globe" => "🌐",
        "Shield" => "🛡",
        "ShoppingCart" => "🛒",
        "Palette" => "🎨",
        _ => "📘",
    }
}
