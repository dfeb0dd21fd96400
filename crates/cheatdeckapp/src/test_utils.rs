use crate::catalog::{CatalogDocument, LanguageCatalog};
use crate::model::CheatItem;
use crate::repository::Repository;
use crate::store::{FsBackend, MemBackend};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

/// Three languages, `en` default, `fr` without flag or strings.
pub fn sample_catalog() -> CatalogDocument {
    serde_json::from_value(json!({
        "default_language": "en",
        "supported_languages": {
            "en": {"name": "English", "flag": "🇺🇸", "interface": {
                "search": "Search",
                "error_language_unsupported": "Language not supported. Available languages"
            }},
            "es": {"name": "Español", "flag": "🇪🇸", "interface": {
                "search": "Buscar",
                "error_language_unsupported": "Idioma no soportado. Idiomas disponibles"
            }},
            "fr": {"name": "Français"}
        }
    }))
    .expect("sample catalog is valid")
}

pub fn mem_repo() -> Repository<MemBackend> {
    Repository::new(
        MemBackend::new(),
        LanguageCatalog::from_document(sample_catalog()),
    )
}

pub fn item(code: &str, description: &str) -> CheatItem {
    CheatItem::new(code, description)
}

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub repo: Repository<FsBackend>,
    pub records_dir: PathBuf,
    pub catalog_path: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let records_dir = temp_dir.path().join("cheatsheets");
        let catalog_path = temp_dir.path().join("languages.json");
        std::fs::write(
            &catalog_path,
            serde_json::to_string_pretty(&sample_catalog()).expect("serialize catalog"),
        )
        .expect("write catalog");

        let repo = Repository::open(&records_dir, &catalog_path, None).expect("open repository");
        Self {
            _temp_dir: temp_dir,
            repo,
            records_dir,
            catalog_path,
        }
    }
}
