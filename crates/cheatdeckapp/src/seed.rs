//! Starter content for a fresh collection.

use crate::error::Result;
use crate::model::{CheatItem, RecordDate, SheetDocument};
use crate::repository::Repository;
use crate::store::SheetBackend;
use chrono::NaiveDate;

fn examples() -> Vec<(&'static str, SheetDocument)> {
    let date = NaiveDate::from_ymd_opt(2025, 9, 24).map(RecordDate::from);
    let sheet = |title: &str, tags: &[&str], items: Vec<CheatItem>| SheetDocument {
        title: title.to_string(),
        language: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        items,
        created: date.clone(),
        updated: date.clone(),
    };

    vec![
        (
            "example-1",
            sheet(
                "Git Commands",
                &["git", "version-control", "terminal"],
                vec![
                    CheatItem::new("git status", "View repository status")
                        .with_example("git status --short"),
                    CheatItem::new("git add .", "Add all changes to staging")
                        .with_example("git add . && git status"),
                    CheatItem::new("git commit -m", "Make commit with message")
                        .with_example("git commit -m \"Initial commit\""),
                ],
            ),
        ),
        (
            "example-2",
            sheet(
                "Linux Commands",
                &["linux", "terminal", "bash"],
                vec![
                    CheatItem::new("ls", "List files and directories").with_example("ls -la"),
                    CheatItem::new("find", "Search for files and directories")
                        .with_example("find . -name \"*.py\""),
                    CheatItem::new("grep", "Search for text in files")
                        .with_example("grep -r \"function\" ."),
                ],
            ),
        ),
    ]
}

impl<B: SheetBackend> Repository<B> {
    /// Writes the starter cheatsheets when the collection is empty.
    ///
    /// Returns how many were written (0 for a non-empty collection).
    pub fn seed_examples(&mut self) -> Result<usize> {
        if !self.backend().list_slugs()?.is_empty() {
            return Ok(0);
        }

        let examples = examples();
        for (filename, document) in &examples {
            self.write_document(filename, document)?;
        }
        tracing::info!(count = examples.len(), "seeded example cheatsheets");
        Ok(examples.len())
    }
}
