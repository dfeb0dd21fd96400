//! The user-facing "current language" selection.
//!
//! This is separate from the catalog: the catalog says which languages exist,
//! the selection says which one the interface is showing right now. A
//! presentation layer owns one [`LanguageSelection`] and subscribes handlers
//! that refresh its texts on change.
//!
//! The selection only ever holds a code that the catalog supported at the
//! time it was set; unsupported codes are rejected and the previous value is
//! kept.

use crate::catalog::LanguageCatalog;

/// Handle returned by [`LanguageSelection::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&str)>;

pub struct LanguageSelection {
    current: String,
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
}

impl LanguageSelection {
    /// Starts at `preferred` when supported, otherwise at the catalog default.
    pub fn new(catalog: &LanguageCatalog, preferred: Option<&str>) -> Self {
        let current = preferred
            .filter(|code| catalog.is_supported(code))
            .unwrap_or_else(|| catalog.default_language())
            .to_string();
        Self {
            current,
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Switches language and notifies subscribers in registration order.
    /// Returns false (and changes nothing) for unsupported codes.
    pub fn set(&mut self, catalog: &LanguageCatalog, code: &str) -> bool {
        if !catalog.is_supported(code) {
            return false;
        }
        self.current = code.to_string();
        self.notify();
        true
    }

    /// After a catalog reload, falls back to the default if the current code
    /// disappeared. Returns whether the selection changed.
    pub fn revalidate(&mut self, catalog: &LanguageCatalog) -> bool {
        if catalog.is_supported(&self.current) {
            return false;
        }
        let fallback = catalog.default_language().to_string();
        self.set(catalog, &fallback)
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&str) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    fn notify(&mut self) {
        let current = self.current.clone();
        for (_, handler) in self.handlers.iter_mut() {
            handler(&current);
        }
    }
}
