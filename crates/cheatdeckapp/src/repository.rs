//! # Repository
//!
//! [`Repository`] is the single entry point for reading and writing
//! cheatsheets. It owns a [`SheetBackend`] (where the JSON documents live) and
//! a [`LanguageCatalog`] (which language codes are valid and which one is the
//! default).
//!
//! ## Derived Indexes
//!
//! Nothing is cached. Tag lists, language lists and statistics are computed
//! from a fresh [`Repository::list_all`] on every call, so external edits to
//! the directory are always visible.
//!
//! ## Failure Model
//!
//! - Collection reads never fail: unreadable or malformed documents are
//!   skipped and logged.
//! - Single-record operations return [`CheatdeckError::NotFound`],
//!   [`CheatdeckError::Malformed`] or [`CheatdeckError::Io`] so callers can
//!   tell "missing" from "corrupt" from "permission denied". A filename that
//!   would point outside the collection is [`CheatdeckError::InvalidName`].
//! - `create` and `update` do not validate their input. Call
//!   [`Repository::validate`] first when the data comes from a user.
//!
//! The other operations are spread over sibling modules as extra `impl`
//! blocks: [`crate::search`], [`crate::tags`], [`crate::validation`],
//! [`crate::migrate`] and [`crate::seed`].

use crate::catalog::LanguageCatalog;
use crate::error::{CheatdeckError, Result};
use crate::model::{slugify, today, CheatItem, Cheatsheet, RecordDate, SheetDocument};
use crate::store::{FsBackend, SheetBackend};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Slug used when a title has no usable characters at all.
const FALLBACK_SLUG: &str = "cheatsheet";

/// Tag value meaning "every cheatsheet".
pub const ALL_TAGS: &str = "all";

/// Per-language record counts, as produced by [`Repository::language_statistics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageStats {
    pub name: String,
    pub flag: String,
    pub count: usize,
}

pub struct Repository<B: SheetBackend = FsBackend> {
    backend: B,
    catalog: LanguageCatalog,
    default_override: Option<String>,
}

impl Repository<FsBackend> {
    /// Opens a repository over a records directory (created if absent) and a
    /// catalog file.
    pub fn open(
        records_dir: impl Into<PathBuf>,
        catalog_path: impl Into<PathBuf>,
        default_language: Option<&str>,
    ) -> Result<Self> {
        let backend = FsBackend::open(records_dir)?;
        let catalog = LanguageCatalog::load(catalog_path);
        let repo = Self::new(backend, catalog);
        Ok(match default_language {
            Some(code) => repo.with_default_language(code),
            None => repo,
        })
    }
}

impl<B: SheetBackend> Repository<B> {
    pub fn new(backend: B, catalog: LanguageCatalog) -> Self {
        Self {
            backend,
            catalog,
            default_override: None,
        }
    }

    /// Overrides the catalog's default language for this repository.
    pub fn with_default_language(mut self, code: &str) -> Self {
        self.default_override = Some(code.to_string());
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// The language substituted when a record has none.
    pub fn default_language(&self) -> &str {
        self.default_override
            .as_deref()
            .unwrap_or_else(|| self.catalog.default_language())
    }

    // --- Reads ---

    /// Every readable record, oldest `updated` first.
    pub fn list_all(&self) -> Vec<Cheatsheet> {
        let mut slugs = match self.backend.list_slugs() {
            Ok(slugs) => slugs,
            Err(e) => {
                tracing::warn!(error = %e, "cannot list cheatsheets");
                return Vec::new();
            }
        };
        slugs.sort();

        let mut sheets: Vec<Cheatsheet> = slugs
            .iter()
            .filter_map(|slug| match self.get(slug) {
                Ok(sheet) => Some(sheet),
                Err(e) => {
                    tracing::warn!(filename = %slug, error = %e, "skipping cheatsheet");
                    None
                }
            })
            .collect();

        // Stable: equal dates keep filename order
        sheets.sort_by(|a, b| a.updated.cmp(&b.updated));
        sheets
    }

    pub fn get(&self, filename: &str) -> Result<Cheatsheet> {
        let document = self.read_document(filename)?;
        Ok(document.into_cheatsheet(filename, self.default_language()))
    }

    /// `"all"` is a sentinel for "no filter", even if a real tag has that name.
    pub fn list_by_tag(&self, tag: &str) -> Vec<Cheatsheet> {
        let sheets = self.list_all();
        if tag == ALL_TAGS {
            return sheets;
        }
        sheets.into_iter().filter(|s| s.has_tag(tag)).collect()
    }

    pub fn list_by_language(&self, language: &str) -> Vec<Cheatsheet> {
        if !self.catalog.is_supported(language) {
            return Vec::new();
        }
        self.list_all()
            .into_iter()
            .filter(|s| s.language == language)
            .collect()
    }

    pub fn list_by_tag_and_language(&self, tag: &str, language: &str) -> Vec<Cheatsheet> {
        if !self.catalog.is_supported(language) {
            return Vec::new();
        }
        self.list_by_tag(tag)
            .into_iter()
            .filter(|s| s.language == language)
            .collect()
    }

    /// Effective languages actually used by records, sorted.
    pub fn available_languages(&self) -> Vec<String> {
        self.list_all()
            .into_iter()
            .map(|s| s.language)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Record count for every language in the catalog, including empty ones.
    pub fn language_statistics(&self) -> BTreeMap<String, LanguageStats> {
        let sheets = self.list_all();
        self.catalog
            .document()
            .supported_languages
            .iter()
            .map(|(code, info)| {
                let count = sheets.iter().filter(|s| &s.language == code).count();
                let stats = LanguageStats {
                    name: info.name.clone(),
                    flag: info.flag.clone().unwrap_or_default(),
                    count,
                };
                (code.clone(), stats)
            })
            .collect()
    }

    // --- Writes ---

    /// Creates a record and returns its filename. Does not validate.
    pub fn create(
        &mut self,
        title: &str,
        tags: Vec<String>,
        items: Vec<CheatItem>,
        language: Option<&str>,
    ) -> Result<String> {
        let filename = self.unique_filename(title);
        let now = RecordDate::from_date(today());
        let document = SheetDocument {
            title: title.to_string(),
            language: Some(language.unwrap_or(self.default_language()).to_string()),
            tags,
            items,
            created: Some(now.clone()),
            updated: Some(now),
        };
        self.write_document(&filename, &document)?;
        Ok(filename)
    }

    /// Rewrites an existing record, keeping its filename and `created` date.
    ///
    /// `language` falls back to the stored value, then to the default.
    pub fn update(
        &mut self,
        filename: &str,
        title: &str,
        tags: Vec<String>,
        items: Vec<CheatItem>,
        language: Option<&str>,
    ) -> Result<()> {
        let existing = self.read_document(filename)?;
        let now = RecordDate::from_date(today());

        let language = match language {
            Some(code) => code.to_string(),
            // A stored `""` counts as unset, like in `into_cheatsheet`
            None => existing
                .language
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| self.default_language().to_string()),
        };

        let document = SheetDocument {
            title: title.to_string(),
            language: Some(language),
            tags,
            items,
            created: existing
                .created
                .filter(|date| !date.is_blank())
                .or_else(|| Some(now.clone())),
            updated: Some(now),
        };
        self.write_document(filename, &document)
    }

    pub fn delete(&mut self, filename: &str) -> Result<()> {
        if !self.backend.remove(filename)? {
            return Err(CheatdeckError::NotFound(filename.to_string()));
        }
        Ok(())
    }

    // --- Catalog management ---

    pub fn add_language(
        &mut self,
        code: &str,
        name: &str,
        flag: Option<&str>,
        interface: Option<BTreeMap<String, String>>,
    ) -> Result<()> {
        self.catalog.add_language(code, name, flag, interface)
    }

    /// Refuses both the catalog default and this repository's own default.
    pub fn remove_language(&mut self, code: &str) -> Result<()> {
        if code == self.default_language() {
            return Err(CheatdeckError::DefaultLanguage(code.to_string()));
        }
        self.catalog.remove_language(code)
    }

    pub fn update_language_interface<I>(&mut self, code: &str, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.catalog.update_interface(code, updates)
    }

    pub fn reload_catalog(&mut self) {
        self.catalog.reload();
    }

    /// Interface text in the repository's default language unless `code` is given.
    pub fn interface_text(&self, key: &str, code: Option<&str>) -> String {
        self.catalog
            .interface_text(key, Some(code.unwrap_or(self.default_language())))
    }

    // --- Internals ---

    pub(crate) fn read_document(&self, filename: &str) -> Result<SheetDocument> {
        let content = self
            .backend
            .read(filename)?
            .ok_or_else(|| CheatdeckError::NotFound(filename.to_string()))?;
        serde_json::from_str(&content).map_err(|e| CheatdeckError::malformed(filename, e))
    }

    pub(crate) fn write_document(&self, filename: &str, document: &SheetDocument) -> Result<()> {
        let content =
            serde_json::to_string_pretty(document).map_err(CheatdeckError::Serialization)?;
        self.backend.write(filename, &content)
    }

    fn unique_filename(&self, title: &str) -> String {
        let base = match slugify(title) {
            slug if slug.is_empty() => FALLBACK_SLUG.to_string(),
            slug => slug,
        };

        let mut candidate = base.clone();
        let mut counter = 1;
        while self.backend.exists(&candidate) {
            candidate = format!("{}-{}", base, counter);
            counter += 1;
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{item, mem_repo, TestEnv};

    #[test]
    fn test_create_then_get_roundtrip() {
        let mut repo = mem_repo();
        let filename = repo
            .create(
                "Docker Commands",
                vec!["docker".into()],
                vec![item("docker run", "Run a container")],
                Some("en"),
            )
            .unwrap();
        assert_eq!(filename, "docker-commands");

        let sheet = repo.get(&filename).unwrap();
        assert_eq!(sheet.title, "Docker Commands");
        assert_eq!(sheet.tags, vec!["docker"]);
        assert_eq!(sheet.items, vec![item("docker run", "Run a container")]);
        assert_eq!(sheet.language, "en");
        assert_eq!(sheet.created, sheet.updated);
        assert_eq!(sheet.created, Some(today()));
    }

    #[test]
    fn test_create_defaults_language() {
        let mut repo = mem_repo();
        let filename = repo.create("T", vec![], vec![], None).unwrap();
        assert_eq!(repo.get(&filename).unwrap().language, "en");

        let raw = repo.backend().read(&filename).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["language"], "en");
    }

    #[test]
    fn test_duplicate_titles_get_suffixes() {
        let mut repo = mem_repo();
        let a = repo.create("Git", vec![], vec![], None).unwrap();
        let b = repo.create("Git", vec![], vec![], None).unwrap();
        let c = repo.create("git", vec![], vec![], None).unwrap();
        assert_eq!(a, "git");
        assert_eq!(b, "git-1");
        assert_eq!(c, "git-2");
    }

    #[test]
    fn test_unusable_title_gets_fallback_slug() {
        let mut repo = mem_repo();
        assert_eq!(repo.create("???", vec![], vec![], None).unwrap(), "cheatsheet");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let repo = mem_repo();
        let err = repo.get("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_malformed() {
        let repo = mem_repo();
        repo.backend().insert_raw("broken", "{ nope");
        assert!(matches!(
            repo.get("broken"),
            Err(CheatdeckError::Malformed { .. })
        ));
    }

    #[test]
    fn test_missing_language_reads_as_default() {
        let repo = mem_repo();
        repo.backend()
            .insert_raw("old", r#"{"title": "Old", "tags": [], "items": []}"#);
        assert_eq!(repo.get("old").unwrap().language, "en");

        let repo = repo.with_default_language("es");
        assert_eq!(repo.get("old").unwrap().language, "es");
    }

    #[test]
    fn test_list_all_skips_malformed_and_sorts_by_updated() {
        let repo = mem_repo();
        let backend = repo.backend();
        backend.insert_raw("b", r#"{"title": "B", "updated": "2025-03-01"}"#);
        backend.insert_raw("a", r#"{"title": "A", "updated": "2025-05-01"}"#);
        backend.insert_raw("c", r#"{"title": "C"}"#);
        backend.insert_raw("bad", "not json");
        backend.insert_raw("arr", "[1, 2]");

        let titles: Vec<_> = repo.list_all().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_update_preserves_identity_and_created() {
        let mut repo = mem_repo();
        repo.backend().insert_raw(
            "notes",
            r#"{"title": "Notes", "language": "es", "tags": ["a"], "items": [],
                "created": "2024-01-01", "updated": "2024-01-02"}"#,
        );

        repo.update("notes", "Renamed", vec!["b".into()], vec![], None)
            .unwrap();

        let sheet = repo.get("notes").unwrap();
        assert_eq!(sheet.filename, "notes");
        assert_eq!(sheet.title, "Renamed");
        assert_eq!(sheet.tags, vec!["b"]);
        assert_eq!(sheet.language, "es");
        assert_eq!(sheet.created, chrono::NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(sheet.updated, Some(today()));
        assert!(!repo.backend().exists("renamed"));
    }

    #[test]
    fn test_update_explicit_language_and_missing_created() {
        let mut repo = mem_repo();
        repo.backend().insert_raw("n", r#"{"title": "N"}"#);
        repo.update("n", "N", vec![], vec![], Some("fr")).unwrap();
        let sheet = repo.get("n").unwrap();
        assert_eq!(sheet.language, "fr");
        assert_eq!(sheet.created, Some(today()));
    }

    #[test]
    fn test_update_keeps_created_text_verbatim() {
        let mut repo = mem_repo();
        repo.backend()
            .insert_raw("short", r#"{"title": "S", "created": "2023-1-5"}"#);
        repo.backend()
            .insert_raw("odd", r#"{"title": "O", "created": "someday"}"#);
        repo.backend()
            .insert_raw("blank", r#"{"title": "B", "created": "  "}"#);

        for slug in ["short", "odd", "blank"] {
            repo.update(slug, "T", vec![], vec![], None).unwrap();
        }

        let created = |slug: &str| -> serde_json::Value {
            let raw = repo.backend().read(slug).unwrap().unwrap();
            serde_json::from_str::<serde_json::Value>(&raw).unwrap()["created"].clone()
        };
        assert_eq!(created("short"), "2023-1-5");
        assert_eq!(created("odd"), "someday");
        assert_eq!(
            created("blank"),
            today().format("%Y-%m-%d").to_string().as_str()
        );
    }

    #[test]
    fn test_update_missing_or_malformed_fails() {
        let mut repo = mem_repo();
        assert!(repo
            .update("ghost", "x", vec![], vec![], None)
            .unwrap_err()
            .is_not_found());

        repo.backend().insert_raw("bad", "{");
        assert!(matches!(
            repo.update("bad", "x", vec![], vec![], None),
            Err(CheatdeckError::Malformed { .. })
        ));
        assert_eq!(repo.backend().read("bad").unwrap().unwrap(), "{");
    }

    #[test]
    fn test_delete() {
        let mut repo = mem_repo();
        let filename = repo.create("T", vec![], vec![], None).unwrap();
        repo.delete(&filename).unwrap();
        assert!(repo.get(&filename).unwrap_err().is_not_found());
        assert!(repo.delete(&filename).unwrap_err().is_not_found());
    }

    #[test]
    fn test_write_failure_surfaces_as_io() {
        let mut repo = mem_repo();
        repo.backend().set_simulate_write_error(true);
        assert!(matches!(
            repo.create("T", vec![], vec![], None),
            Err(CheatdeckError::Io(_))
        ));
    }

    #[test]
    fn test_tag_sentinel_all() {
        let mut repo = mem_repo();
        repo.create("A", vec!["all".into()], vec![], None).unwrap();
        repo.create("B", vec!["git".into()], vec![], None).unwrap();

        assert_eq!(repo.list_by_tag("all"), repo.list_all());
        assert_eq!(repo.list_by_tag("all").len(), 2);
        assert_eq!(repo.list_by_tag("git").len(), 1);
        assert!(repo.list_by_tag("rust").is_empty());
    }

    #[test]
    fn test_language_filters() {
        let mut repo = mem_repo();
        repo.create("A", vec!["git".into()], vec![], Some("en")).unwrap();
        repo.create("B", vec!["git".into()], vec![], Some("es")).unwrap();
        repo.backend().insert_raw("c", r#"{"title": "C", "tags": ["git"]}"#);

        assert_eq!(repo.list_by_language("en").len(), 2);
        assert_eq!(repo.list_by_language("es").len(), 1);
        assert!(repo.list_by_language("xx").is_empty());

        assert_eq!(repo.list_by_tag_and_language("git", "es").len(), 1);
        assert_eq!(repo.list_by_tag_and_language("all", "en").len(), 2);
        assert!(repo.list_by_tag_and_language("git", "xx").is_empty());

        assert_eq!(repo.available_languages(), vec!["en", "es"]);
    }

    #[test]
    fn test_language_statistics() {
        let mut repo = mem_repo();
        repo.create("A", vec![], vec![], Some("es")).unwrap();
        repo.create("B", vec![], vec![], Some("es")).unwrap();

        let stats = repo.language_statistics();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats["es"].count, 2);
        assert_eq!(stats["es"].name, "Español");
        assert_eq!(stats["en"].count, 0);
        assert_eq!(stats["fr"].flag, "");
    }

    #[test]
    fn test_remove_language_guards_repository_default() {
        let mut repo = mem_repo().with_default_language("es");
        assert!(matches!(
            repo.remove_language("es"),
            Err(CheatdeckError::DefaultLanguage(_))
        ));
        assert!(matches!(
            repo.remove_language("en"),
            Err(CheatdeckError::DefaultLanguage(_))
        ));
        repo.remove_language("fr").unwrap();
        assert!(!repo.catalog().is_supported("fr"));
    }

    #[test]
    fn test_interface_text_uses_repository_default() {
        let repo = mem_repo().with_default_language("es");
        assert_eq!(repo.interface_text("search", None), "Buscar");
        assert_eq!(repo.interface_text("search", Some("en")), "Search");
    }

    #[test]
    fn test_filesystem_language_migration() {
        let mut env = TestEnv::new();
        let filename = env
            .repo
            .create(
                "Docker Commands",
                vec!["docker".into()],
                vec![item("docker ps", "List containers")],
                Some("en"),
            )
            .unwrap();
        assert!(env.records_dir.join("docker-commands.json").exists());
        assert_eq!(env.repo.list_by_language("en").len(), 1);

        assert_eq!(env.repo.migrate_language("en", "es"), 1);
        assert!(env.repo.list_by_language("en").is_empty());
        assert_eq!(env.repo.get(&filename).unwrap().language, "es");
    }

    #[test]
    fn test_filesystem_catalog_changes_persist() {
        let mut env = TestEnv::new();
        env.repo.add_language("de", "Deutsch", Some("🇩🇪"), None).unwrap();

        let reopened = Repository::open(&env.records_dir, &env.catalog_path, None).unwrap();
        assert!(reopened.catalog().is_supported("de"));
        assert_eq!(reopened.catalog().codes(), vec!["de", "en", "es", "fr"]);
    }
}
