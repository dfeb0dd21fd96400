//! Tag support for cheatsheets.
//!
//! Tags have no registry of their own: a tag exists exactly as long as some
//! cheatsheet lists it. Every operation here is derived from a fresh
//! [`Repository::list_all`].
//!
//! ## Cascading Edits
//!
//! [`Repository::delete_tag`] and [`Repository::rename_tag`] rewrite each
//! affected cheatsheet through [`Repository::update`], one at a time and with
//! no transaction. A crash halfway leaves some records changed and others
//! not; running the same operation again finishes the job, since it only
//! touches records that still carry the old tag.
//!
//! ## Tag Naming Rules
//!
//! See [`validation`] for the full rules. In summary: trimmed, lowercased,
//! and alphanumeric apart from `-` and `_`.

pub mod validation;

use crate::model::Cheatsheet;
use crate::repository::Repository;
use crate::store::SheetBackend;
use serde::Serialize;
use std::collections::BTreeSet;

pub use validation::{normalize_tag, TagValidationError};

/// A tag and the number of cheatsheets carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagUsage {
    pub name: String,
    pub usage_count: usize,
}

impl<B: SheetBackend> Repository<B> {
    /// Every distinct tag, sorted.
    pub fn list_tags(&self) -> Vec<String> {
        self.list_all()
            .into_iter()
            .flat_map(|sheet| sheet.tags)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tags by descending usage. Ties stay alphabetical.
    pub fn tags_with_usage(&self) -> Vec<TagUsage> {
        let sheets = self.list_all();
        let tags: BTreeSet<&str> = sheets
            .iter()
            .flat_map(|sheet| sheet.tags.iter().map(String::as_str))
            .collect();

        let mut usage: Vec<TagUsage> = tags
            .into_iter()
            .map(|name| TagUsage {
                name: name.to_string(),
                usage_count: sheets.iter().filter(|s| s.has_tag(name)).count(),
            })
            .collect();
        usage.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        usage
    }

    pub fn tag_usage_count(&self, name: &str) -> usize {
        self.list_all().iter().filter(|s| s.has_tag(name)).count()
    }

    /// Whether `name` is acceptable as a tag. Nothing is written: a tag only
    /// comes into existence when a cheatsheet uses it.
    pub fn create_tag(&self, name: &str) -> bool {
        normalize_tag(name).is_ok()
    }

    /// Removes `name` from every cheatsheet. True if at least one changed.
    pub fn delete_tag(&mut self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }

        self.rewrite_tags(name, |tags| tags.retain(|t| t != name))
    }

    /// Replaces `old` with the normalized `new` in place. True if at least one
    /// cheatsheet changed.
    ///
    /// When a cheatsheet already carries `new`, the duplicate collapses into
    /// its first position.
    pub fn rename_tag(&mut self, old: &str, new: &str) -> bool {
        if old.is_empty() {
            return false;
        }
        let Ok(new) = normalize_tag(new) else {
            return false;
        };
        if new == old {
            return false;
        }

        self.rewrite_tags(old, |tags| {
            let mut seen = BTreeSet::new();
            let renamed: Vec<String> = tags
                .drain(..)
                .map(|t| if t == old { new.clone() } else { t })
                .filter(|t| seen.insert(t.clone()))
                .collect();
            *tags = renamed;
        })
    }

    /// Applies `edit` to the tags of every cheatsheet carrying `tag` and
    /// persists each one. Returns whether any save succeeded.
    fn rewrite_tags<F>(&mut self, tag: &str, mut edit: F) -> bool
    where
        F: FnMut(&mut Vec<String>),
    {
        let affected: Vec<Cheatsheet> = self
            .list_all()
            .into_iter()
            .filter(|s| s.has_tag(tag))
            .collect();

        let mut changed = 0;
        for mut sheet in affected {
            edit(&mut sheet.tags);
            match self.update(&sheet.filename, &sheet.title, sheet.tags, sheet.items, None) {
                Ok(()) => changed += 1,
                Err(e) => {
                    tracing::warn!(filename = %sheet.filename, error = %e, "failed to rewrite tags")
                }
            }
        }
        changed > 0
    }
}
