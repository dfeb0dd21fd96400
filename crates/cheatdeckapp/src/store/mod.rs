//! # Storage Layer
//!
//! Cheatsheets are stored one document per file: `<slug>.json` inside a single
//! records directory. There is no index file; every query re-reads the
//! directory and derives what it needs (tags, languages) on the fly.
//!
//! ## Backends
//!
//! Raw I/O sits behind [`SheetBackend`] so the repository logic can be tested
//! without a filesystem:
//!
//! - [`fs_backend::FsBackend`]: the real directory. Writes go to a temp file and
//!   are renamed into place, so readers never see a half-written record.
//! - [`mem_backend::MemBackend`]: a map in memory, for unit tests.
//!
//! Backends deal in slugs and raw strings only. Parsing, defaulting and
//! sorting belong to [`crate::repository`].
//!
//! Every slug handed to a backend is checked with [`check_slug`] first: it must
//! name a file directly inside the records directory.
//!
//! ## Storage Format
//!
//! ```text
//! cheatsheets/
//! ├── docker-commands.json
//! ├── docker-commands-1.json     # same title created twice
//! └── git-commands.json
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::SheetBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;

use crate::error::{CheatdeckError, Result};

/// Extension of record files.
pub const SHEET_EXT: &str = "json";

/// Rejects slugs that are empty, hidden or that would leave the records
/// directory (`../x`, `a/b`, `a\\b`).
pub fn check_slug(slug: &str) -> Result<()> {
    let escapes = slug
        .chars()
        .any(|c| c == '/' || c == '\\' || std::path::is_separator(c));
    if slug.trim().is_empty() || slug.starts_with('.') || escapes {
        return Err(CheatdeckError::InvalidName(slug.to_string()));
    }
    Ok(())
}
