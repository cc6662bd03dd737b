//! Shared output formatting for page commands.

use gwiki_core::page::{Page, view::format_date};
use serde::Serialize;

/// Typed page fields for JSON output.
#[derive(Debug, Serialize)]
pub struct PageOutput {
    pub page: String,
    pub format: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub date: String,
    pub language: String,
    pub draft: bool,
    /// Fields that fell back to a default while reading.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl PageOutput {
    pub fn from_page(page: &Page, date_format: &str) -> Self {
        let meta = page.meta();
        let title = meta.title();
        let description = meta.description();
        let tags = meta.tags();
        let date = meta.date();
        let language = meta.language();
        let draft = meta.draft();

        let issues = [
            &title.issue,
            &description.issue,
            &tags.issue,
            &date.issue,
            &language.issue,
            &draft.issue,
        ]
        .into_iter()
        .flatten()
        .map(ToString::to_string)
        .collect();

        Self {
            page: page.name.clone(),
            format: page.document.mark().to_string(),
            title: title.value,
            description: description.value,
            tags: tags.value,
            date: format_date(date.value, date_format),
            language: language.value,
            draft: draft.value,
            issues,
        }
    }
}
