//! # Cheatdeck
//!
//! A file-backed store of cheatsheets: titled collections of
//! (code, description, example) items, tagged and written in one of the
//! languages of a [`catalog::LanguageCatalog`].
//!
//! This crate is UI agnostic. It never prints, never exits, and returns plain
//! Rust values; the `cheatdeck` binary is one client of it.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs + search, tags, validation,     │
//! │  migrate, seed)                                             │
//! │  - CRUD, derived tag/language indexes, migrations           │
//! └─────────────────────────────────────────────────────────────┘
//!             │                                  │
//!             ▼                                  ▼
//! ┌───────────────────────────┐    ┌────────────────────────────┐
//! │  Store (store/*)          │    │  Catalog (catalog.rs)      │
//! │  - one JSON file / sheet  │    │  - supported languages     │
//! │  - fs or in-memory        │    │  - interface strings       │
//! └───────────────────────────┘    └────────────────────────────┘
//! ```
//!
//! [`selection::LanguageSelection`] tracks which language an interface is
//! currently showing and notifies subscribers when it changes.
//!
//! ## Example
//!
//! ```no_run
//! use cheatdeckapp::{CheatItem, Repository};
//!
//! let mut repo = Repository::open("cheatsheets", "languages.json", None)?;
//! let filename = repo.create(
//!     "Docker Commands",
//!     vec!["docker".to_string()],
//!     vec![CheatItem::new("docker ps", "List containers")],
//!     Some("en"),
//! )?;
//! assert_eq!(repo.get(&filename)?.title, "Docker Commands");
//! # Ok::<(), cheatdeckapp::CheatdeckError>(())
//! ```
//!
//! ## Testing
//!
//! Repository logic is tested against [`store::MemBackend`]; the filesystem
//! backend gets its own tests over a temp directory.

pub mod catalog;
pub mod config;
pub mod error;
pub mod migrate;
pub mod model;
pub mod repository;
pub mod search;
pub mod seed;
pub mod selection;
pub mod store;
pub mod tags;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

pub use catalog::{CatalogDocument, LanguageCatalog, LanguageInfo};
pub use config::AppConfig;
pub use error::{CheatdeckError, Result};
pub use model::{CheatItem, Cheatsheet};
pub use repository::{LanguageStats, Repository, ALL_TAGS};
pub use selection::LanguageSelection;
pub use tags::TagUsage;
