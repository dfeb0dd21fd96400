//! # Configuration
//!
//! Cheatdeck configuration is managed by [`confique`], which handles layered
//! loading from a TOML file and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `CHEATDECK_DATA_PATH`, `CHEATDECK_LANGUAGES_FILE`, etc.
//! 2. **Config file**: `config.toml` in the OS-appropriate config directory
//!    (via the `directories` crate), or an explicit path.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_path` | `<data dir>/cheatsheets` | Directory with one JSON file per cheatsheet |
//! | `languages_file` | `<data dir>/languages.json` | Language catalog document |
//! | `default_language` | catalog's | Overrides the catalog's default language |
//! | `current_language` | catalog default | Language the interface starts in |
//! | `current_tag` | `all` | Tag filter the interface starts with |

use crate::error::{CheatdeckError, Result};
use crate::repository::Repository;
use crate::store::FsBackend;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";

/// Configuration for cheatdeck, stored in `config.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding one JSON file per cheatsheet.
    #[config(env = "CHEATDECK_DATA_PATH")]
    pub data_path: Option<PathBuf>,

    /// Path of the language catalog document.
    #[config(env = "CHEATDECK_LANGUAGES_FILE")]
    pub languages_file: Option<PathBuf>,

    /// Overrides the catalog's default language.
    #[config(env = "CHEATDECK_DEFAULT_LANGUAGE")]
    pub default_language: Option<String>,

    /// Language the interface starts in.
    #[config(env = "CHEATDECK_LANGUAGE")]
    pub current_language: Option<String>,

    /// Tag filter the interface starts with.
    #[config(default = "all")]
    pub current_tag: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            languages_file: None,
            default_language: None,
            current_language: None,
            current_tag: "all".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "cheatdeck")
}

/// Where data lives when nothing is configured.
pub fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".cheatdeck"))
}

/// The config file read when no explicit path is given.
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

impl AppConfig {
    /// Loads env > `config_file` (or the default location) > defaults.
    /// A missing file is not an error.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = config_file
            .map(Path::to_path_buf)
            .or_else(default_config_file);

        let mut builder = Self::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        builder
            .load()
            .map_err(|e| CheatdeckError::Config(e.to_string()))
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| default_data_dir().join("cheatsheets"))
    }

    pub fn languages_file(&self) -> PathBuf {
        self.languages_file
            .clone()
            .unwrap_or_else(|| default_data_dir().join("languages.json"))
    }

    /// Opens the repository this configuration points at.
    pub fn open_repository(&self) -> Result<Repository<FsBackend>> {
        Repository::open(
            self.data_path(),
            self.languages_file(),
            self.default_language.as_deref(),
        )
    }
}
