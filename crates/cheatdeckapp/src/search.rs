//! Case-insensitive substring search over cheatsheets.
//!
//! A record matches when the query occurs in its title, in any tag, or in any
//! item's `code`, `description` or `example`. Zones are checked in that order
//! and the first hit wins; a record is returned at most once.

use crate::model::Cheatsheet;
use crate::repository::Repository;
use crate::store::SheetBackend;

/// `query` must already be lowercased.
pub fn matches_query(sheet: &Cheatsheet, query: &str) -> bool {
    if contains(&sheet.title, query) {
        return true;
    }
    if sheet.tags.iter().any(|tag| contains(tag, query)) {
        return true;
    }
    sheet.items.iter().any(|item| {
        contains(&item.code, query)
            || contains(&item.description, query)
            || item
                .example
                .as_deref()
                .is_some_and(|example| contains(example, query))
    })
}

fn contains(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(query)
}

impl<B: SheetBackend> Repository<B> {
    pub fn search(&self, query: &str) -> Vec<Cheatsheet> {
        let query = query.to_lowercase();
        self.list_all()
            .into_iter()
            .filter(|sheet| matches_query(sheet, &query))
            .collect()
    }

    /// Empty when `language` is not in the catalog.
    pub fn search_by_language(&self, query: &str, language: &str) -> Vec<Cheatsheet> {
        if !self.catalog().is_supported(language) {
            return Vec::new();
        }
        self.search(query)
            .into_iter()
            .filter(|sheet| sheet.language == language)
            .collect()
    }
}
