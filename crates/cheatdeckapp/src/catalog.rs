//! # Language Catalog
//!
//! One JSON document describes which language codes cheatsheets may use, how
//! each language is displayed, and the localized interface strings for it:
//!
//! ```json
//! {
//!   "default_language": "en",
//!   "supported_languages": {
//!     "en": { "name": "English", "flag": "🇺🇸", "interface": { "search": "Search" } },
//!     "es": { "name": "Español", "flag": "🇪🇸", "interface": { "search": "Buscar" } }
//!   }
//! }
//! ```
//!
//! ## Lifecycle
//!
//! The catalog is loaded once (see [`LanguageCatalog::load`]) and kept in
//! memory. Loading never fails: a missing or unparseable file logs a warning
//! and falls back to a small built-in catalog. [`LanguageCatalog::reload`]
//! re-reads the file after external edits. The document is written back only
//! when it is mutated (add/remove a language, update interface strings).
//!
//! Entries are decoded leniently: an entry that is not an object is skipped, a
//! missing `name` becomes the code, and non-string interface values are
//! ignored. The raw JSON is kept next to the decoded view and is what gets
//! written back, so fields this crate does not understand survive an edit.
//!
//! A file that exists but cannot be read or parsed makes the catalog read-only:
//! the built-in fallback serves lookups, and every mutation fails with
//! [`CheatdeckError::CatalogUnreadable`] instead of replacing the user's file.
//!
//! ## Text Lookup
//!
//! [`LanguageCatalog::interface_text`] resolves a key in the requested
//! language, then in the default language, and finally returns the key itself.
//! A missing translation is never an error.

use crate::error::{CheatdeckError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Used when the document does not name a default language.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Interface key for the "unsupported language" validation message.
pub const UNSUPPORTED_LANGUAGE_KEY: &str = "error_language_unsupported";

/// Display metadata and interface strings of one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(default)]
    pub interface: BTreeMap<String, String>,
}

impl LanguageInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flag: None,
            interface: BTreeMap::new(),
        }
    }
}

/// The catalog document as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    pub supported_languages: BTreeMap<String, LanguageInfo>,
}

impl CatalogDocument {
    /// The catalog used when the real one cannot be loaded.
    pub fn builtin() -> Self {
        let mut es = LanguageInfo::new("Español");
        es.flag = Some("🇪🇸".to_string());
        es.interface.insert(
            UNSUPPORTED_LANGUAGE_KEY.to_string(),
            "Idioma no soportado. Idiomas disponibles".to_string(),
        );

        let mut en = LanguageInfo::new("English");
        en.flag = Some("🇺🇸".to_string());
        en.interface.insert(
            UNSUPPORTED_LANGUAGE_KEY.to_string(),
            "Language not supported. Available languages".to_string(),
        );

        let mut supported_languages = BTreeMap::new();
        supported_languages.insert("es".to_string(), es);
        supported_languages.insert("en".to_string(), en);

        Self {
            default_language: Some("es".to_string()),
            supported_languages,
        }
    }
}

/// The loaded catalog plus where it came from.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    path: Option<PathBuf>,
    document: CatalogDocument,
    /// On-disk shape, written back by mutations.
    raw: Value,
    /// Set when an existing file could not be loaded; blocks mutations.
    load_error: Option<String>,
}

/// Result of reading a catalog file.
struct Loaded {
    document: CatalogDocument,
    raw: Value,
    load_error: Option<String>,
}

impl LanguageCatalog {
    /// Loads the catalog from `path`, falling back to [`CatalogDocument::builtin`].
    ///
    /// A missing file still accepts mutations, so adding a language creates
    /// it. A file that exists but is unreadable leaves the catalog read-only.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = read_catalog(&path);
        Self {
            path: Some(path),
            document: loaded.document,
            raw: loaded.raw,
            load_error: loaded.load_error,
        }
    }

    /// An in-memory catalog. Mutations are never written anywhere.
    pub fn from_document(document: CatalogDocument) -> Self {
        let raw = serde_json::to_value(&document).unwrap_or_default();
        Self {
            path: None,
            document,
            raw,
            load_error: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn document(&self) -> &CatalogDocument {
        &self.document
    }

    /// Why the backing file was rejected, if it was. Mutations fail while set.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Re-reads the backing file, swapping the in-memory document.
    pub fn reload(&mut self) {
        if let Some(path) = &self.path {
            let loaded = read_catalog(path);
            self.document = loaded.document;
            self.raw = loaded.raw;
            self.load_error = loaded.load_error;
        }
    }

    pub fn default_language(&self) -> &str {
        self.document
            .default_language
            .as_deref()
            .unwrap_or(FALLBACK_LANGUAGE)
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.document.supported_languages.contains_key(code)
    }

    /// Supported codes in sorted order.
    pub fn codes(&self) -> Vec<&str> {
        self.document
            .supported_languages
            .keys()
            .map(String::as_str)
            .collect()
    }

    /// Code → display name.
    pub fn supported_languages(&self) -> BTreeMap<String, String> {
        self.document
            .supported_languages
            .iter()
            .map(|(code, info)| (code.clone(), info.name.clone()))
            .collect()
    }

    pub fn info(&self, code: &str) -> Option<&LanguageInfo> {
        self.document.supported_languages.get(code)
    }

    /// Localized text for `key` in `code` (default language when `None`).
    pub fn interface_text(&self, key: &str, code: Option<&str>) -> String {
        let default = self.default_language();
        let code = code.unwrap_or(default);

        self.lookup(code, key)
            .or_else(|| self.lookup(default, key))
            .unwrap_or(key)
            .to_string()
    }

    /// [`Self::interface_text`] with positional `{}` / `{N}` placeholders filled.
    ///
    /// A template that cannot be formatted (bad placeholder, too few args) is
    /// returned unformatted.
    pub fn format_text(&self, key: &str, args: &[&str], code: Option<&str>) -> String {
        let text = self.interface_text(key, code);
        format_positional(&text, args).unwrap_or(text)
    }

    fn lookup(&self, code: &str, key: &str) -> Option<&str> {
        self.document
            .supported_languages
            .get(code)
            .and_then(|info| info.interface.get(key))
            .map(String::as_str)
    }

    /// Inserts or replaces a language and persists the catalog.
    pub fn add_language(
        &mut self,
        code: &str,
        name: &str,
        flag: Option<&str>,
        interface: Option<BTreeMap<String, String>>,
    ) -> Result<()> {
        self.ensure_writable()?;
        let info = LanguageInfo {
            name: name.to_string(),
            flag: flag.map(str::to_string),
            interface: interface.unwrap_or_default(),
        };
        let entry = serde_json::to_value(&info).map_err(CheatdeckError::Serialization)?;
        if let Some(languages) = self.raw_languages_mut() {
            languages.insert(code.to_string(), entry);
        }
        self.document
            .supported_languages
            .insert(code.to_string(), info);
        self.persist()
    }

    /// Removes a language. The default language can never be removed.
    pub fn remove_language(&mut self, code: &str) -> Result<()> {
        self.ensure_writable()?;
        if code == self.default_language() {
            return Err(CheatdeckError::DefaultLanguage(code.to_string()));
        }
        if self.document.supported_languages.remove(code).is_none() {
            return Err(CheatdeckError::UnknownLanguage(code.to_string()));
        }
        if let Some(languages) = self.raw_languages_mut() {
            languages.remove(code);
        }
        self.persist()
    }

    /// Merges `updates` into a language's interface strings and persists.
    pub fn update_interface<I>(&mut self, code: &str, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.ensure_writable()?;
        if !self.is_supported(code) {
            return Err(CheatdeckError::UnknownLanguage(code.to_string()));
        }
        let updates: Vec<(String, String)> = updates.into_iter().collect();

        if let Some(entry) = self
            .raw_languages_mut()
            .and_then(|languages| languages.get_mut(code))
        {
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let strings = &mut entry["interface"];
            if !strings.is_object() {
                *strings = Value::Object(Map::new());
            }
            if let Some(strings) = strings.as_object_mut() {
                for (key, text) in &updates {
                    strings.insert(key.clone(), Value::String(text.clone()));
                }
            }
        }
        if let Some(info) = self.document.supported_languages.get_mut(code) {
            info.interface.extend(updates);
        }
        self.persist()
    }

    /// Structural problems of the catalog as loaded. Empty means valid.
    ///
    /// Checks the raw document, not the leniently decoded view, and reports
    /// a rejected file first.
    pub fn validate_structure(&self) -> Vec<String> {
        let mut errors: Vec<String> = self.load_error.iter().cloned().collect();
        errors.extend(check_structure(&self.raw));
        errors
    }

    /// Runs [`check_structure`] on the raw JSON of a catalog file.
    pub fn validate_file(path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path).map_err(CheatdeckError::Io)?;
        let value: Value = serde_json::from_str(&content).map_err(CheatdeckError::Serialization)?;
        Ok(check_structure(&value))
    }

    fn ensure_writable(&self) -> Result<()> {
        match (&self.load_error, &self.path) {
            (Some(_), Some(path)) => Err(CheatdeckError::CatalogUnreadable(
                path.display().to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// The raw `supported_languages` map, created if absent.
    fn raw_languages_mut(&mut self) -> Option<&mut Map<String, Value>> {
        if !self.raw.is_object() {
            self.raw = Value::Object(Map::new());
        }
        let languages = &mut self.raw["supported_languages"];
        if !languages.is_object() {
            *languages = Value::Object(Map::new());
        }
        languages.as_object_mut()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content =
            serde_json::to_string_pretty(&self.raw).map_err(CheatdeckError::Serialization)?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(CheatdeckError::Io)?;
        }

        // Atomic write
        let tmp_file = dir.join(format!(".languages-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(CheatdeckError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, path) {
            let _ = fs::remove_file(&tmp_file);
            tracing::warn!(path = %path.display(), error = %e, "failed to save language catalog");
            return Err(CheatdeckError::Io(e));
        }
        Ok(())
    }
}

fn read_catalog(path: &Path) -> Loaded {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                path = %path.display(),
                "language catalog not found, using built-in defaults"
            );
            return Loaded::builtin(None);
        }
        Err(e) => return Loaded::rejected(path, e.to_string()),
    };

    let value: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => return Loaded::rejected(path, e.to_string()),
    };

    match decode_document(&value) {
        Ok(document) => Loaded {
            document,
            raw: value,
            load_error: None,
        },
        Err(reason) => Loaded::rejected(path, reason),
    }
}

impl Loaded {
    fn builtin(load_error: Option<String>) -> Self {
        let document = CatalogDocument::builtin();
        let raw = serde_json::to_value(&document).unwrap_or_default();
        Self {
            document,
            raw,
            load_error,
        }
    }

    fn rejected(path: &Path, reason: String) -> Self {
        tracing::warn!(
            path = %path.display(),
            error = %reason,
            "failed to load language catalog, using built-in defaults read-only"
        );
        Self::builtin(Some(format!(
            "Catalog {} could not be loaded: {}",
            path.display(),
            reason
        )))
    }
}

/// Decodes what can be used from a parsed catalog. Only a root or
/// `supported_languages` that is not an object rejects the whole file.
fn decode_document(value: &Value) -> std::result::Result<CatalogDocument, String> {
    let root = value
        .as_object()
        .ok_or_else(|| "Configuration must be a JSON object".to_string())?;
    let supported = match root.get("supported_languages") {
        Some(Value::Object(supported)) => supported,
        Some(_) => return Err("'supported_languages' must be an object".to_string()),
        None => return Err("Missing 'supported_languages' key".to_string()),
    };

    let supported_languages = supported
        .iter()
        .filter_map(|(code, entry)| decode_language(code, entry).map(|info| (code.clone(), info)))
        .collect();

    Ok(CatalogDocument {
        default_language: root
            .get("default_language")
            .and_then(Value::as_str)
            .map(str::to_string),
        supported_languages,
    })
}

fn decode_language(code: &str, entry: &Value) -> Option<LanguageInfo> {
    let Some(fields) = entry.as_object() else {
        tracing::warn!(language = code, "catalog entry is not an object, skipping");
        return None;
    };

    let name = match fields.get("name").and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => {
            tracing::warn!(language = code, "catalog entry has no usable name, using its code");
            code.to_string()
        }
    };

    let interface = match fields.get("interface") {
        None => BTreeMap::new(),
        Some(Value::Object(strings)) => strings
            .iter()
            .filter_map(|(key, text)| match text.as_str() {
                Some(text) => Some((key.clone(), text.to_string())),
                None => {
                    tracing::warn!(language = code, key = %key, "ignoring non-string interface text");
                    None
                }
            })
            .collect(),
        Some(_) => {
            tracing::warn!(language = code, "catalog 'interface' is not an object, ignoring");
            BTreeMap::new()
        }
    };

    Some(LanguageInfo {
        name,
        flag: fields.get("flag").and_then(Value::as_str).map(str::to_string),
        interface,
    })
}

/// Structural validation of a raw catalog document.
pub fn check_structure(value: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = value.as_object() else {
        errors.push("Configuration must be a JSON object".to_string());
        return errors;
    };

    match root.get("supported_languages") {
        None => errors.push("Missing 'supported_languages' key".to_string()),
        Some(Value::Object(supported)) => {
            for (code, info) in supported {
                let Some(info) = info.as_object() else {
                    errors.push(format!("Language '{}': must be an object", code));
                    continue;
                };
                if !info.contains_key("name") {
                    errors.push(format!("Language '{}': missing 'name' field", code));
                }
                if let Some(interface) = info.get("interface") {
                    if !interface.is_object() {
                        errors.push(format!("Language '{}': 'interface' must be an object", code));
                    }
                }
            }
        }
        Some(_) => errors.push("'supported_languages' must be an object".to_string()),
    }

    if let Some(default) = root.get("default_language").and_then(Value::as_str) {
        let known = root
            .get("supported_languages")
            .and_then(Value::as_object)
            .is_some_and(|supported| supported.contains_key(default));
        if !default.is_empty() && !known {
            errors.push(format!(
                "Default language '{}' is not in supported_languages",
                default
            ));
        }
    }

    errors
}

fn format_positional(template: &str, args: &[&str]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_auto = 0;

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => field.push(ch),
                        None => return None,
                    }
                }
                let idx = if field.is_empty() {
                    next_auto += 1;
                    next_auto - 1
                } else {
                    field.parse::<usize>().ok()?
                };
                out.push_str(args.get(idx)?);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return None,
            _ => out.push(c),
        }
    }
    Some(out)
}
