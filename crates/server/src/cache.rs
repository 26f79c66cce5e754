//! Lookup caches owned by a [`ToolServer`](crate::ToolServer).

use std::collections::HashMap;

use antdoc_core::{ComponentDetail, ComponentSummary};

/// In-memory catalog and per-URL detail cache.
///
/// Lives as long as the server that owns it. Entries are replaced only when a
/// call asks for `force`; a forced catalog refresh clears the whole cache.
#[derive(Debug, Default)]
pub struct LookupCache {
    catalog: Option<Vec<ComponentSummary>>,
    details: HashMap<String, ComponentDetail>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> Option<&[ComponentSummary]> {
        self.catalog.as_deref()
    }

    pub fn set_catalog(&mut self, catalog: Vec<ComponentSummary>) {
        self.catalog = Some(catalog);
    }

    /// First catalog entry whose name matches case-insensitively.
    pub fn find(&self, name: &str) -> Option<&ComponentSummary> {
        self.catalog.as_deref()?.iter().find(|summary| summary.matches_name(name))
    }

    pub fn detail(&self, url: &str) -> Option<&ComponentDetail> {
        self.details.get(url)
    }

    pub fn insert_detail(&mut self, url: impl Into<String>, detail: ComponentDetail) {
        self.details.insert(url.into(), detail);
    }

    pub fn detail_count(&self) -> usize {
        self.details.len()
    }

    pub fn clear(&mut self) {
        self.catalog = None;
        self.details.clear();
    }
}
