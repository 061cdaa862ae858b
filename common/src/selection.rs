//! Projects held aside for side-by-side comparison.
//!
//! Membership is keyed by `intervention_name`. Two records sharing a name are one
//! comparison unit.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::project::ProjectRecord;

/// Minimum selection size before the compare bar shows up.
pub const COMPARE_MIN_SELECTED: usize = 2;

/// Visibility of the compare bar, derived after each selection mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareBar {
    pub visible: bool,
    pub selected: usize,
}

impl CompareBar {
    pub fn label(&self) -> String {
        format!("{} projects selected", self.selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the id if absent, removes it otherwise.
    pub fn toggle(&mut self, id: &str) -> CompareBar {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
        tracing::debug!(id, selected = self.ids.len(), "comparison selection toggled");
        self.compare_bar()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) -> CompareBar {
        self.ids.clear();
        self.compare_bar()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn compare_bar(&self) -> CompareBar {
        CompareBar {
            visible: self.ids.len() >= COMPARE_MIN_SELECTED,
            selected: self.ids.len(),
        }
    }

    /// Selected records in dataset order. Every record whose name is selected is returned.
    pub fn materialize<'a>(&self, dataset: &'a [ProjectRecord]) -> Vec<&'a ProjectRecord> {
        if self.ids.is_empty() {
            return Vec::new();
        }
        dataset
            .iter()
            .filter(|r| r.id().is_some_and(|id| self.ids.contains(id)))
            .collect()
    }
}
