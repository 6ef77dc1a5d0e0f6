//! Shared search query models and helpers.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::facet::Facet;


/// Body of `/search` and `/export`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchQuery {
    pub keywords: String,
    pub filters: BTreeMap<Facet, BTreeSet<String>>,
}

impl SearchQuery {
    /// Trims the keywords and fills in every facet key, empty when unselected.
    pub fn new(keywords: &str, mut selections: BTreeMap<Facet, BTreeSet<String>>) -> Self {
        let filters = Facet::ALL
            .into_iter()
            .map(|facet| (facet, selections.remove(&facet).unwrap_or_default()))
            .collect();
        Self { keywords: keywords.trim().to_string(), filters }
    }

    pub fn has_filters(&self) -> bool {
        self.filters.values().any(|values| !values.is_empty())
    }

    /// Empty keywords are only allowed together with at least one filter.
    pub fn is_sendable(&self) -> bool {
        !self.keywords.trim().is_empty() || self.has_filters()
    }

    pub fn selected(&self, facet: Facet) -> impl Iterator<Item = &String> {
        self.filters.get(&facet).into_iter().flatten()
    }
}
