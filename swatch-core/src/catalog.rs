//! Named stylesheet sources.
//!
//! Components can name the stylesheet they want (`stylesheet_name`) instead of
//! holding one. The catalog maps those names to [StylesheetSource]s; names are
//! compared with [is_variant], the first registered match wins.

use std::sync::Arc;

use swatch_theme::error::{StyleError, StyleResult};
use swatch_theme::name::is_variant;
use swatch_theme::source::StylesheetSource;
use swatch_theme::stylesheet::Stylesheet;

/// Registered stylesheet sources.
#[derive(Debug, Clone, Default)]
pub struct StylesheetCatalog {
    sources: Vec<Arc<dyn StylesheetSource>>,
}

impl StylesheetCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source. A source whose name matches one already registered is dropped.
    pub fn register(&mut self, source: impl StylesheetSource + 'static) -> bool {
        self.register_shared(Arc::new(source))
    }

    /// Register a shared source.
    pub fn register_shared(&mut self, source: Arc<dyn StylesheetSource>) -> bool {
        if self.source(source.name()).is_some() {
            log::debug!("Dropping duplicate stylesheet source '{}'", source.name());
            return false;
        }
        self.sources.push(source);
        true
    }

    /// Builder form of [StylesheetCatalog::register].
    pub fn with(mut self, source: impl StylesheetSource + 'static) -> Self {
        self.register(source);
        self
    }

    /// Find the source registered under `name`.
    pub fn source(&self, name: &str) -> Option<&Arc<dyn StylesheetSource>> {
        let name = name.trim();
        self.sources
            .iter()
            .find(|source| is_variant(name, source.name()))
    }

    /// Load the stylesheet registered under `name`.
    pub fn load(&self, name: &str) -> StyleResult<Arc<Stylesheet>> {
        self.source(name)
            .ok_or_else(|| StyleError::not_found(name))?
            .load()
    }

    /// Load the stylesheet registered under `name`, logging failures.
    pub fn get(&self, name: &str) -> Option<Arc<Stylesheet>> {
        match self.load(name) {
            Ok(sheet) => Some(sheet),
            Err(StyleError::StylesheetNotFound { .. }) => None,
            Err(e) => {
                log::warn!("Failed to load stylesheet '{}': {}", name, e);
                None
            },
        }
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|source| source.name())
    }

    /// Whether no source is registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
