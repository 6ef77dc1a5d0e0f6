//! Per-facet option universes: the full set from the uploaded dataset and
//! the current set narrowed to the last result set.

use std::collections::BTreeMap;

use crate::facet::Facet;


#[derive(Debug, Clone, Default, PartialEq)]
struct FacetOptions {
    full: Vec<String>,
    current: Vec<String>,
    /// Set once `current` diverges from `full` through a search.
    narrowed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetOptionStore {
    facets: BTreeMap<Facet, FacetOptions>,
}

impl FacetOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full universe. `current` follows unless a search has
    /// narrowed it since the last upload.
    pub fn set_full(&mut self, facet: Facet, values: Vec<String>) {
        let options = self.facets.entry(facet).or_default();
        if !options.narrowed {
            options.current = values.clone();
        }
        options.full = values;
    }

    pub fn set_current(&mut self, facet: Facet, values: Vec<String>) {
        let options = self.facets.entry(facet).or_default();
        options.current = values;
        options.narrowed = true;
    }

    pub fn full(&self, facet: Facet) -> &[String] {
        self.facets.get(&facet).map(|o| o.full.as_slice()).unwrap_or(&[])
    }

    pub fn current(&self, facet: Facet) -> &[String] {
        self.facets.get(&facet).map(|o| o.current.as_slice()).unwrap_or(&[])
    }

    pub fn reset_current_to_full(&mut self, facet: Facet) {
        if let Some(options) = self.facets.get_mut(&facet) {
            options.current = options.full.clone();
            options.narrowed = false;
        }
    }

    pub fn clear_all(&mut self) {
        self.facets.clear();
    }
}
