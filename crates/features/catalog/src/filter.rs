//! Category + free-text filter over the catalog.
//!
//! An entry is visible when both predicates hold:
//! * no category is active, or the entry shares at least one category with the active set;
//! * the query is empty, or its lowercase form is a substring of the lowercase title or
//!   description.
//!
//! The engine keeps no cache: every call recomputes from the catalog.

use crate::entry::CatalogEntry;
use castellan_kernel::prelude::{CategorySet, FilterCategory};
use serde::{Deserialize, Serialize};

/// Filters `entries` preserving their order.
pub fn filter<'a>(entries: &'a [CatalogEntry], active: CategorySet, query: &str) -> Vec<&'a CatalogEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| (active.is_empty() || entry.intersects(active)) && entry.matches_lowercase(&needle))
        .collect()
}

/// Filter inputs owned by one browsing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    active_categories: CategorySet,
    search_query: String,
}

impl FilterState {
    #[must_use]
    pub fn new(active_categories: CategorySet, search_query: impl Into<String>) -> Self {
        Self { active_categories, search_query: search_query.into() }
    }

    pub const fn active_categories(&self) -> CategorySet {
        self.active_categories
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Adds the category if absent, removes it if present.
    pub fn toggle(&mut self, category: FilterCategory) {
        self.active_categories.toggle_category(category);
    }

    /// Clears the active categories. The search query is left as is.
    pub fn reset(&mut self) {
        self.active_categories = CategorySet::empty();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.search_query.clear();
    }

    /// Whether neither predicate restricts the catalog.
    pub fn is_unrestricted(&self) -> bool {
        self.active_categories.is_empty() && self.search_query.is_empty()
    }

    pub fn apply<'a>(&self, entries: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        filter(entries, self.active_categories, &self.search_query)
    }
}
