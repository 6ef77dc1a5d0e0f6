//! Checkbox lists rendered for each facet, and the selection reads and
//! writes performed against them.
//!
//! The rendered controls are the record of what is checked; the tracker
//! keeps no separate selection set of its own.

use std::collections::{BTreeMap, BTreeSet};

use crate::facet::Facet;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCheckbox {
    pub value: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetCheckboxList {
    controls: Vec<FacetCheckbox>,
}

impl FacetCheckboxList {
    pub fn controls(&self) -> &[FacetCheckbox] {
        &self.controls
    }

    /// Rebuilds the controls from `options`, keeping values that were
    /// checked before and are still rendered.
    fn populate(&mut self, options: &[String]) {
        let previously_checked = self.checked_values();
        self.controls = options
            .iter()
            .map(|value| FacetCheckbox {
                checked: previously_checked.contains(value),
                value: value.clone(),
            })
            .collect();
    }

    fn checked_values(&self) -> BTreeSet<String> {
        self.controls
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.value.clone())
            .collect()
    }
}


#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelectionTracker {
    lists: BTreeMap<Facet, FacetCheckboxList>,
}

impl FacetSelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, facet: Facet) -> Option<&FacetCheckboxList> {
        self.lists.get(&facet)
    }

    pub fn read_selection(&self, facet: Facet) -> BTreeSet<String> {
        self.lists.get(&facet).map(|l| l.checked_values()).unwrap_or_default()
    }

    pub fn rendered_values(&self, facet: Facet) -> BTreeSet<String> {
        self.lists
            .get(&facet)
            .map(|l| l.controls.iter().map(|c| c.value.clone()).collect())
            .unwrap_or_default()
    }

    /// Checks exactly the rendered controls whose value is selected.
    pub fn apply_selection(&mut self, facet: Facet, selected: &BTreeSet<String>) {
        if let Some(list) = self.lists.get_mut(&facet) {
            for control in list.controls.iter_mut() {
                control.checked = selected.contains(&control.value);
            }
        }
    }

    pub fn clear_selection(&mut self, facet: Facet) {
        if let Some(list) = self.lists.get_mut(&facet) {
            for control in list.controls.iter_mut() {
                control.checked = false;
            }
        }
    }

    pub fn repopulate(&mut self, facet: Facet, options: &[String]) {
        self.lists.entry(facet).or_default().populate(options);
    }

    /// Flips one rendered control. Returns the new state, or `None` when the
    /// value is not rendered.
    pub fn toggle(&mut self, facet: Facet, value: &str) -> Option<bool> {
        let control = self
            .lists
            .get_mut(&facet)?
            .controls
            .iter_mut()
            .find(|c| c.value == value)?;
        control.checked = !control.checked;
        Some(control.checked)
    }
}
