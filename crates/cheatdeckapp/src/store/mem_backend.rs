use super::backend::SheetBackend;
use super::{check_slug, SHEET_EXT};
use crate::error::{CheatdeckError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the repository is
/// single-threaded and the `SheetBackend` trait takes `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    sheets: RefCell<BTreeMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to plant raw text, bypassing the repository.
    pub fn insert_raw(&self, slug: &str, content: &str) {
        self.sheets
            .borrow_mut()
            .insert(slug.to_string(), content.to_string());
    }

    pub fn len(&self) -> usize {
        self.sheets.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.borrow().is_empty()
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CheatdeckError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated write error",
            )));
        }
        Ok(())
    }
}

impl SheetBackend for MemBackend {
    fn read(&self, slug: &str) -> Result<Option<String>> {
        check_slug(slug)?;
        Ok(self.sheets.borrow().get(slug).cloned())
    }

    fn write(&self, slug: &str, content: &str) -> Result<()> {
        check_slug(slug)?;
        self.check_write()?;
        self.insert_raw(slug, content);
        Ok(())
    }

    fn remove(&self, slug: &str) -> Result<bool> {
        check_slug(slug)?;
        self.check_write()?;
        Ok(self.sheets.borrow_mut().remove(slug).is_some())
    }

    fn exists(&self, slug: &str) -> bool {
        check_slug(slug).is_ok() && self.sheets.borrow().contains_key(slug)
    }

    fn list_slugs(&self) -> Result<Vec<String>> {
        Ok(self.sheets.borrow().keys().cloned().collect())
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        PathBuf::from(format!("mem://{}.{}", slug, SHEET_EXT))
    }
}
