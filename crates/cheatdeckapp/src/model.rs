//! # Domain Model
//!
//! A cheatsheet is a small reference document: a title, a language code, a
//! list of tags and a list of items (`code` + `description`, optionally an
//! `example`). Each cheatsheet lives in its own JSON file.
//!
//! ## Two Shapes
//!
//! - [`SheetDocument`] is exactly what sits on disk. Its `language` key may be
//!   missing (older collections predate languages) and it never stores the
//!   filename.
//! - [`Cheatsheet`] is what callers see: the document plus its `filename`
//!   (the stable identity) with the language resolved to an effective value.
//!
//! ## Identity
//!
//! The filename is a slug derived from the title at creation time (see
//! [`slugify`]). It never changes afterwards, even when the title does.
//!
//! ## Dates
//!
//! `created` and `updated` are calendar dates written as `YYYY-MM-DD`. On disk
//! they are kept as [`RecordDate`], the exact text that was read, so rewriting
//! a record never reformats a date it did not change. [`Cheatsheet`] exposes
//! the parsed value: a missing, empty or unparseable date becomes `None`,
//! which sorts before every real date.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One entry of a cheatsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatItem {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl CheatItem {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            example: None,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// A date as stored in a record, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DATE_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The parsed date, or `None` for blank or unparseable text.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.0.trim(), DATE_FORMAT).ok()
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The on-disk JSON payload of a single cheatsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub items: Vec<CheatItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<RecordDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<RecordDate>,
}

impl SheetDocument {
    /// Attaches identity and resolves the language against `default_language`.
    ///
    /// An empty `language` string is treated like a missing key. Older
    /// collections wrote `""` for "not set", and no catalog code is empty.
    pub fn into_cheatsheet(self, filename: &str, default_language: &str) -> Cheatsheet {
        let language = match self.language {
            Some(lang) if !lang.is_empty() => lang,
            _ => default_language.to_string(),
        };
        Cheatsheet {
            filename: filename.to_string(),
            title: self.title,
            language,
            tags: self.tags,
            items: self.items,
            created: self.created.as_ref().and_then(RecordDate::date),
            updated: self.updated.as_ref().and_then(RecordDate::date),
        }
    }

    /// True when the document carries no usable `language` key (absent or `""`).
    pub fn lacks_language(&self) -> bool {
        self.language.as_deref().map_or(true, str::is_empty)
    }
}

/// A cheatsheet as handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cheatsheet {
    pub filename: String,
    pub title: String,
    /// Effective language: explicit value from disk or the repository default.
    pub language: String,
    pub tags: Vec<String>,
    pub items: Vec<CheatItem>,
    #[serde(serialize_with = "serialize_date")]
    pub created: Option<NaiveDate>,
    #[serde(serialize_with = "serialize_date")]
    pub updated: Option<NaiveDate>,
}

impl Cheatsheet {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Today's date in local time, the granularity records are stamped with.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Turns a title into a filesystem-safe slug.
///
/// Lowercases, replaces everything that is not alphanumeric, `-` or `_` with
/// `-`, then collapses runs of `-` and trims them from both ends. Uniqueness is
/// the repository's job, not this function's.
pub fn slugify(title: &str) -> String {
    let replaced: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    replaced
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn serialize_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match date {
        Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_str(""),
    }
}
