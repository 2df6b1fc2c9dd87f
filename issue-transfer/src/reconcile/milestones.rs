//! Milestone registry.

use crate::types::TargetMilestone;
use std::collections::{HashMap, HashSet};

/// Milestone numbers in the target repository, keyed by exact title.
///
/// Seeded from the snapshot and extended after every creation. Dry runs mark
/// titles as planned instead, since a planned milestone has no number yet.
#[derive(Debug, Clone, Default)]
pub struct MilestoneRegistry {
    numbers: HashMap<String, u64>,
    planned: HashSet<String>,
}

impl MilestoneRegistry {
    /// Seeds the registry from the target snapshot.
    pub fn from_snapshot(milestones: &[TargetMilestone]) -> Self {
        Self {
            numbers: milestones
                .iter()
                .map(|milestone| (milestone.title.clone(), milestone.number))
                .collect(),
            planned: HashSet::new(),
        }
    }

    /// Returns the number of the milestone with this exact title.
    #[must_use]
    pub fn number(&self, title: &str) -> Option<u64> {
        self.numbers.get(title).copied()
    }

    /// Records a created milestone.
    pub fn insert(&mut self, title: impl Into<String>, number: u64) {
        let title = title.into();
        self.planned.remove(&title);
        self.numbers.insert(title, number);
    }

    /// Marks a title as planned for creation. Returns false if it already
    /// exists or was planned before.
    pub fn plan(&mut self, title: &str) -> bool {
        if self.numbers.contains_key(title) {
            return false;
        }
        self.planned.insert(title.to_string())
    }

    /// Returns the number of milestones with a known number.
    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Returns true if no milestone numbers are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}
