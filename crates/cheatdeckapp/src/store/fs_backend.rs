use super::backend::SheetBackend;
use super::{check_slug, SHEET_EXT};
use crate::error::{CheatdeckError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory-of-JSON-files backend.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Opens the records directory, creating it if it does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn sheet_filename(slug: &str) -> String {
        format!("{}.{}", slug, SHEET_EXT)
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(CheatdeckError::Io)?;
    }
    Ok(())
}

impl SheetBackend for FsBackend {
    fn read(&self, slug: &str) -> Result<Option<String>> {
        check_slug(slug)?;
        match fs::read_to_string(self.path_for(slug)) {
            Ok(content) => Ok(Some(content)),
            // Gone between listing and reading counts as missing
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CheatdeckError::Io(e)),
        }
    }

    fn write(&self, slug: &str, content: &str) -> Result<()> {
        check_slug(slug)?;
        ensure_dir(&self.root)?;

        let target_path = self.path_for(slug);

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", slug, Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(CheatdeckError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &target_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(CheatdeckError::Io(e));
        }

        tracing::debug!(path = %target_path.display(), "wrote cheatsheet");
        Ok(())
    }

    fn remove(&self, slug: &str) -> Result<bool> {
        check_slug(slug)?;
        match fs::remove_file(self.path_for(slug)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CheatdeckError::Io(e)),
        }
    }

    fn exists(&self, slug: &str) -> bool {
        check_slug(slug).is_ok() && self.path_for(slug).exists()
    }

    fn list_slugs(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut slugs = Vec::new();
        let entries = fs::read_dir(&self.root).map_err(CheatdeckError::Io)?;

        for entry in entries {
            let entry = entry.map_err(CheatdeckError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(SHEET_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    slugs.push(stem.to_string());
                }
            }
        }
        Ok(slugs)
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.root.join(Self::sheet_filename(slug))
    }
}
