//! Standard component lookup and search
//!
//! Lookups never fail: an unknown category or name yields an empty result or
//! `None`.

use serde::Serialize;

use crate::reference::{Component, ComponentCategory, ReferenceTables};

/// A component together with the category it was found in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogMatch<'a> {
    pub category: ComponentCategory,
    #[serde(flatten)]
    pub component: &'a Component,
}

/// Read-only view over the standard component tables
#[derive(Debug, Clone, Copy)]
pub struct ComponentCatalog<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> ComponentCatalog<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Case-insensitive substring search on component names.
    ///
    /// With a category only that category is searched; an unrecognized
    /// category matches nothing.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<CatalogMatch<'a>> {
        let needle = query.to_lowercase();
        let scope: Vec<ComponentCategory> = match category {
            Some(name) => match name.parse() {
                Ok(category) => vec![category],
                Err(_) => return Vec::new(),
            },
            None => self.categories(),
        };

        let matches: Vec<_> = scope
            .into_iter()
            .flat_map(|category| {
                self.in_category(category)
                    .iter()
                    .filter(|c| c.name.to_lowercase().contains(&needle))
                    .map(move |component| CatalogMatch { category, component })
            })
            .collect();

        tracing::trace!(query, hits = matches.len(), "component search");
        matches
    }

    /// Exact (case-insensitive) name lookup within a category
    pub fn get(&self, category: &str, name: &str) -> Option<&'a Component> {
        let category: ComponentCategory = category.parse().ok()?;
        self.in_category(category)
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Category names in catalog order
    pub fn categories(&self) -> Vec<ComponentCategory> {
        self.tables.components().keys().copied().collect()
    }

    /// All components in a category, empty when the category is unknown
    pub fn list(&self, category: &str) -> &'a [Component] {
        match category.parse() {
            Ok(category) => self.in_category(category),
            Err(_) => &[],
        }
    }

    fn in_category(&self, category: ComponentCategory) -> &'a [Component] {
        self.tables
            .components()
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
