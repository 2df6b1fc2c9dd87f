//! Label registry.

use crate::types::Label;
use std::collections::HashSet;

/// Label names known to exist in the target repository.
///
/// Seeded from the snapshot and extended after every creation, so a label
/// shared by several issues is created once per run. Names match exactly.
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    known: HashSet<String>,
}

impl LabelRegistry {
    /// Seeds the registry from the target snapshot.
    pub fn from_snapshot(labels: &[Label]) -> Self {
        Self {
            known: labels.iter().map(|label| label.name.clone()).collect(),
        }
    }

    /// Returns true if a label with exactly this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Records a label as existing. Returns false if it was already known.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.known.insert(name.into())
    }

    /// Returns the number of known labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Returns true if no labels are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
