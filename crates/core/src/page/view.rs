//! Typed accessors over a page's front matter.
//!
//! Getters never fail: a missing or malformed field yields a documented
//! default together with a [`FieldIssue`] describing what was recovered.

use std::fmt::Write as _;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{error, warn};

use crate::frontmatter::{Metadata, Timestamp, Value};

pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const TAGS: &str = "tags";
pub const DATE: &str = "date";
pub const LANGUAGE: &str = "language";
pub const DRAFT: &str = "draft";

/// Date format used for reading and writing the `date` field.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a typed field fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIssue {
    #[error("field '{field}' is missing")]
    Missing { field: &'static str },

    #[error("field '{field}' should be a {expected}, found a {found}")]
    WrongType { field: &'static str, expected: &'static str, found: &'static str },

    #[error("field '{field}' has malformed value '{value}'")]
    Malformed { field: &'static str, value: String },
}

/// A typed value plus the issue recovered while reading it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    pub value: T,
    pub issue: Option<FieldIssue>,
}

impl<T> Field<T> {
    fn ok(value: T) -> Self {
        Self { value, issue: None }
    }

    fn recovered(value: T, issue: FieldIssue) -> Self {
        Self { value, issue: Some(issue) }
    }

    pub fn is_clean(&self) -> bool {
        self.issue.is_none()
    }
}

/// Read-only typed view over a page's metadata.
#[derive(Debug, Clone, Copy)]
pub struct PageMeta<'a> {
    page: &'a str,
    metadata: &'a Metadata,
}

impl<'a> PageMeta<'a> {
    pub fn new(page: &'a str, metadata: &'a Metadata) -> Self {
        Self { page, metadata }
    }

    pub fn title(&self) -> Field<String> {
        self.string(TITLE)
    }

    pub fn description(&self) -> Field<String> {
        self.string(DESCRIPTION)
    }

    pub fn language(&self) -> Field<String> {
        self.string(LANGUAGE)
    }

    /// Tags as strings. Any sequence of scalars is accepted, whichever
    /// format produced it; numbers and booleans are stringified.
    pub fn tags(&self) -> Field<Vec<String>> {
        let Some(value) = self.metadata.get(TAGS) else {
            return Field::ok(Vec::new());
        };
        let items = value
            .as_sequence()
            .and_then(|seq| seq.iter().map(Value::scalar_text).collect::<Option<Vec<_>>>());
        match items {
            Some(tags) => Field::ok(tags),
            None => {
                let issue = FieldIssue::WrongType {
                    field: TAGS,
                    expected: "sequence of strings",
                    found: value.kind(),
                };
                warn!(page = self.page, "{issue}, using no tags");
                Field::recovered(Vec::new(), issue)
            }
        }
    }

    /// Publication date. Defaults to today when absent (warning) or
    /// malformed (error). Strings holding an ISO date or RFC 3339 date-time
    /// are accepted, as JSON front matter has no timestamp type.
    pub fn date(&self) -> Field<NaiveDate> {
        let today = Local::now().date_naive();
        let Some(value) = self.metadata.get(DATE) else {
            warn!(page = self.page, "no date on page, using today");
            return Field::recovered(today, FieldIssue::Missing { field: DATE });
        };

        let parsed = match value {
            Value::Timestamp(ts) => ts.date().ok_or_else(|| FieldIssue::WrongType {
                field: DATE,
                expected: "date",
                found: "time of day",
            }),
            Value::String(s) => s
                .parse::<Timestamp>()
                .ok()
                .and_then(|ts| ts.date())
                .ok_or_else(|| FieldIssue::Malformed { field: DATE, value: s.clone() }),
            other => Err(FieldIssue::WrongType {
                field: DATE,
                expected: "date",
                found: other.kind(),
            }),
        };

        match parsed {
            Ok(date) => Field::ok(date),
            Err(issue) => {
                error!(page = self.page, "{issue}, using today");
                Field::recovered(today, issue)
            }
        }
    }

    /// Draft flag, `true` unless explicitly set to a boolean.
    pub fn draft(&self) -> Field<bool> {
        match self.metadata.get(DRAFT) {
            Some(Value::Bool(b)) => Field::ok(*b),
            Some(other) => {
                let issue = FieldIssue::WrongType {
                    field: DRAFT,
                    expected: "boolean",
                    found: other.kind(),
                };
                warn!(page = self.page, "{issue}, treating page as draft");
                Field::recovered(true, issue)
            }
            None => {
                warn!(page = self.page, "missing draft status, treating page as draft");
                Field::recovered(true, FieldIssue::Missing { field: DRAFT })
            }
        }
    }

    fn string(&self, field: &'static str) -> Field<String> {
        match self.metadata.get(field) {
            Some(Value::String(s)) => Field::ok(s.clone()),
            Some(other) => {
                let issue =
                    FieldIssue::WrongType { field, expected: "string", found: other.kind() };
                warn!(page = self.page, "{issue}, using empty value");
                Field::recovered(String::new(), issue)
            }
            None => Field::ok(String::new()),
        }
    }
}

/// Mutable typed view, used when saving edited fields.
#[derive(Debug)]
pub struct PageMetaMut<'a> {
    page: &'a str,
    metadata: &'a mut Metadata,
}

impl<'a> PageMetaMut<'a> {
    pub fn new(page: &'a str, metadata: &'a mut Metadata) -> Self {
        Self { page, metadata }
    }

    pub fn view(&self) -> PageMeta<'_> {
        PageMeta::new(self.page, &*self.metadata)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.insert(TITLE.to_string(), Value::String(title.into()));
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.metadata.insert(DESCRIPTION.to_string(), Value::String(description.into()));
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.metadata.insert(LANGUAGE.to_string(), Value::String(language.into()));
    }

    /// Whitespace separated tags.
    pub fn set_tags(&mut self, input: &str) {
        let tags = input.split_whitespace().map(|t| Value::String(t.to_string())).collect();
        self.metadata.insert(TAGS.to_string(), Value::Sequence(tags));
    }

    /// `true` only for the text "true" in any letter case.
    pub fn set_draft(&mut self, input: &str) {
        let draft = input.trim().eq_ignore_ascii_case("true");
        self.metadata.insert(DRAFT.to_string(), Value::Bool(draft));
    }

    /// Parse `input` with `format` and store it as a date. On failure the
    /// previous value is kept.
    pub fn set_date(&mut self, input: &str, format: &str) -> Result<(), FieldIssue> {
        let date = NaiveDate::parse_from_str(input.trim(), format)
            .map_err(|_| FieldIssue::Malformed { field: DATE, value: input.to_string() })?;
        self.metadata.insert(DATE.to_string(), Value::Timestamp(Timestamp::LocalDate(date)));
        Ok(())
    }
}

/// Render a date with a user supplied format, falling back to ISO 8601
/// when the format asks for fields a date does not have.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.format(DEFAULT_DATE_FORMAT).to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::{FormatMark, decode};

    fn meta(mark: FormatMark, payload: &str) -> Metadata {
        decode(mark, payload.as_bytes()).unwrap()
    }

    #[test]
    fn strings_default_to_empty() {
        let fm = Metadata::new();
        let view = PageMeta::new("p", &fm);
        assert_eq!(view.title(), Field { value: String::new(), issue: None });
        assert_eq!(view.description().value, "");
        assert_eq!(view.language().value, "");
    }

    #[test]
    fn wrong_typed_string_is_reported_not_rendered() {
        let fm = meta(FormatMark::Dash, "title: 42\n");
        let title = PageMeta::new("p", &fm).title();
        assert_eq!(title.value, "");
        assert_eq!(
            title.issue,
            Some(FieldIssue::WrongType { field: TITLE, expected: "string", found: "integer" })
        );
    }

    #[test]
    fn tags_from_every_format() {
        let json = meta(FormatMark::Brace, r#"{"tags": ["a", "b"]}"#);
        let toml = meta(FormatMark::Plus, "tags = [\"a\", \"b\"]\n");
        let yaml = meta(FormatMark::Dash, "tags:\n  - a\n  - b\n");
        for fm in [&json, &toml, &yaml] {
            let tags = PageMeta::new("p", fm).tags();
            assert!(tags.is_clean());
            assert_eq!(tags.value, ["a", "b"]);
        }
    }

    #[test]
    fn tags_stringify_scalars_and_reject_nesting() {
        let fm = meta(FormatMark::Brace, r#"{"tags": ["a", 2, true]}"#);
        assert_eq!(PageMeta::new("p", &fm).tags().value, ["a", "2", "true"]);

        let fm = meta(FormatMark::Brace, r#"{"tags": [["nested"]]}"#);
        let tags = PageMeta::new("p", &fm).tags();
        assert!(tags.value.is_empty());
        assert!(matches!(tags.issue, Some(FieldIssue::WrongType { field: TAGS, .. })));
    }

    #[test]
    fn malformed_draft_defaults_to_true() {
        let fm = meta(FormatMark::Brace, r#"{"draft": "maybe"}"#);
        let draft = PageMeta::new("p", &fm).draft();
        assert!(draft.value);
        assert_eq!(
            draft.issue,
            Some(FieldIssue::WrongType { field: DRAFT, expected: "boolean", found: "string" })
        );
    }

    #[test]
    fn missing_draft_defaults_to_true() {
        let fm = Metadata::new();
        let draft = PageMeta::new("p", &fm).draft();
        assert!(draft.value);
        assert_eq!(draft.issue, Some(FieldIssue::Missing { field: DRAFT }));
    }

    #[test]
    fn explicit_draft_false() {
        let fm = meta(FormatMark::Plus, "draft = false\n");
        assert_eq!(PageMeta::new("p", &fm).draft(), Field { value: false, issue: None });
    }

    #[test]
    fn date_from_native_timestamp_and_strings() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let cases = [
            meta(FormatMark::Plus, "date = 2024-01-15\n"),
            meta(FormatMark::Plus, "date = 2024-01-15T08:00:00+01:00\n"),
            meta(FormatMark::Brace, r#"{"date": "2024-01-15T10:00:00Z"}"#),
            meta(FormatMark::Dash, "date: 2024-01-15\n"),
        ];
        for fm in &cases {
            let date = PageMeta::new("p", fm).date();
            assert_eq!(date, Field { value: expected, issue: None });
        }
    }

    #[test]
    fn malformed_and_missing_dates_fall_back_to_today() {
        let today = Local::now().date_naive();

        let fm = meta(FormatMark::Dash, "date: next tuesday\n");
        let date = PageMeta::new("p", &fm).date();
        assert_eq!(date.value, today);
        assert!(matches!(date.issue, Some(FieldIssue::Malformed { field: DATE, .. })));

        let fm = Metadata::new();
        let date = PageMeta::new("p", &fm).date();
        assert_eq!(date.value, today);
        assert_eq!(date.issue, Some(FieldIssue::Missing { field: DATE }));
    }

    #[test]
    fn setters_store_typed_values() {
        let mut fm = Metadata::new();
        let mut page = PageMetaMut::new("p", &mut fm);
        page.set_title("Hello");
        page.set_tags("  rust   wiki ");
        page.set_draft("TRUE");
        page.set_language("en");
        page.set_description("A page");
        page.set_date("2024-02-29", DEFAULT_DATE_FORMAT).unwrap();

        let view = page.view();
        assert_eq!(view.title().value, "Hello");
        assert_eq!(view.tags().value, ["rust", "wiki"]);
        assert!(view.draft().value);
        assert_eq!(view.language().value, "en");
        assert_eq!(view.description().value, "A page");
        assert_eq!(view.date().value, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn set_draft_is_false_for_anything_but_true() {
        let mut fm = Metadata::new();
        let mut page = PageMetaMut::new("p", &mut fm);
        page.set_draft("yes");
        assert!(!page.view().draft().value);
    }

    #[test]
    fn set_date_keeps_previous_value_on_error() {
        let mut fm = meta(FormatMark::Plus, "date = 2020-05-01\n");
        let mut page = PageMetaMut::new("p", &mut fm);
        let err = page.set_date("01/02/2024", DEFAULT_DATE_FORMAT).unwrap_err();
        assert!(matches!(err, FieldIssue::Malformed { field: DATE, .. }));
        assert_eq!(page.view().date().value, NaiveDate::from_ymd_opt(2020, 5, 1).unwrap());
    }

    #[test]
    fn format_date_falls_back_on_time_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date, "%d.%m.%Y"), "09.03.2024");
        assert_eq!(format_date(date, "%H:%M"), "2024-03-09");
    }
}
