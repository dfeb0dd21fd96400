use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw record I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`crate::repository::Repository`] handles the "what" (parsing, defaults,
/// indexes).
pub trait SheetBackend {
    /// Read the raw JSON text for a record.
    /// Returns Ok(None) if the record does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, slug: &str) -> Result<Option<String>>;

    /// Write (create or replace) the raw JSON text for a record.
    fn write(&self, slug: &str, content: &str) -> Result<()>;

    /// Remove a record. Returns Ok(false) if there was nothing to remove.
    fn remove(&self, slug: &str) -> Result<bool>;

    /// Check whether a record with this slug exists.
    fn exists(&self, slug: &str) -> bool;

    /// List every record slug, in no particular order.
    fn list_slugs(&self) -> Result<Vec<String>>;

    /// The "file path" of a record. Virtual for in-memory backends.
    fn path_for(&self, slug: &str) -> PathBuf;
}
