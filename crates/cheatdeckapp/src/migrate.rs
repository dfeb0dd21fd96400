//! Language migrations over a whole collection.
//!
//! - [`Repository::migrate_language`] moves every cheatsheet from one
//!   supported language to another.
//! - [`Repository::fill_missing_languages`] upgrades collections written
//!   before cheatsheets had a `language` key, guessing the language from the
//!   title with [`detect_language`].
//!
//! Both save record by record through [`Repository::update`]; a failed save is
//! logged and skipped, and re-running the migration picks it up again.

use crate::repository::Repository;
use crate::store::SheetBackend;

/// Title words that mark a cheatsheet as Spanish.
const SPANISH_WORDS: &[&str] = &["básico", "avanzado", "comandos", "fórmulas", "intermedio"];

/// Characters that only show up in Spanish titles.
const SPANISH_CHARS: &[char] = &['ñ', 'á', 'é', 'í', 'ó', 'ú', 'ü'];

/// Guesses `"es"` or `"en"` from a title.
pub fn detect_language(title: &str) -> &'static str {
    let title = title.to_lowercase();
    if SPANISH_WORDS.iter().any(|word| title.contains(word)) {
        return "es";
    }
    if title.contains(SPANISH_CHARS) {
        return "es";
    }
    "en"
}

impl<B: SheetBackend> Repository<B> {
    /// Re-saves every cheatsheet whose effective language is `from` with
    /// language `to`. Returns how many were saved; 0 if either code is unknown.
    pub fn migrate_language(&mut self, from: &str, to: &str) -> usize {
        let catalog = self.catalog();
        if !catalog.is_supported(from) || !catalog.is_supported(to) {
            return 0;
        }

        let mut migrated = 0;
        for sheet in self.list_by_language(from) {
            match self.update(&sheet.filename, &sheet.title, sheet.tags, sheet.items, Some(to)) {
                Ok(()) => migrated += 1,
                Err(e) => {
                    tracing::warn!(filename = %sheet.filename, error = %e, "language migration failed")
                }
            }
        }
        migrated
    }

    /// Writes a detected language into every document that has none.
    ///
    /// Returns `(filename, language)` for each cheatsheet that was saved.
    pub fn fill_missing_languages(&mut self) -> Vec<(String, String)> {
        let mut slugs = match self.backend().list_slugs() {
            Ok(slugs) => slugs,
            Err(e) => {
                tracing::warn!(error = %e, "cannot list cheatsheets");
                return Vec::new();
            }
        };
        slugs.sort();

        let mut filled = Vec::new();
        for slug in slugs {
            let document = match self.read_document(&slug) {
                Ok(document) if document.lacks_language() => document,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(filename = %slug, error = %e, "skipping cheatsheet");
                    continue;
                }
            };

            let language = detect_language(&document.title);
            match self.update(&slug, &document.title, document.tags, document.items, Some(language)) {
                Ok(()) => {
                    tracing::info!(filename = %slug, language, "assigned language");
                    filled.push((slug, language.to_string()));
                }
                Err(e) => tracing::warn!(filename = %slug, error = %e, "failed to assign language"),
            }
        }
        filled
    }
}
