//! Derives the current option universe of every facet from a result set.

use std::collections::{BTreeMap, BTreeSet};

use crate::{facet::Facet, search_result::ResultRow};


/// Option shown for rows with no sales status.
pub const BLANK_LABEL: &str = "(blank)";

/// Distinct trimmed non-empty values per facet, sorted ordinally. Sales
/// status also gets [`BLANK_LABEL`] when any row lacks one. An empty result
/// set yields an empty universe for every facet.
pub fn project(results: &[ResultRow]) -> BTreeMap<Facet, Vec<String>> {
    let mut sets: BTreeMap<Facet, BTreeSet<String>> =
        Facet::ALL.into_iter().map(|facet| (facet, BTreeSet::new())).collect();

    for row in results {
        for facet in Facet::ALL {
            let value = facet.row_value(row).map(str::trim).filter(|v| !v.is_empty());
            match (value, facet) {
                (Some(value), _) => {
                    sets.entry(facet).or_default().insert(value.to_string());
                }
                (None, Facet::SalesStatus) => {
                    sets.entry(facet).or_default().insert(BLANK_LABEL.to_string());
                }
                (None, _) => {}
            }
        }
    }

    sets.into_iter()
        .map(|(facet, values)| (facet, values.into_iter().collect()))
        .collect()
}
