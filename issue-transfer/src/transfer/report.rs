//! Per-issue transfer reports.

use crate::reconcile::MilestonePlan;
use serde::Serialize;

/// Result of a completed issue transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueReport {
    /// Issue number in the source repository.
    pub source_number: u64,

    /// Issue number in the target repository.
    pub target_number: u64,

    /// URL of the transferred issue.
    pub url: String,

    /// Labels assigned to the transferred issue.
    pub labels: Vec<String>,

    /// Labels created in the target repository for this issue.
    pub labels_created: Vec<String>,

    /// Milestone number assigned, if any.
    pub milestone: Option<u64>,

    /// Whether the milestone was created for this issue.
    pub milestone_created: bool,

    /// Whether an update call was issued.
    pub updated: bool,
}

/// What a dry run would do for one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePlan {
    /// Issue number in the source repository.
    pub source_number: u64,

    /// Issue title.
    pub title: String,

    /// Labels that would be assigned.
    pub labels: Vec<String>,

    /// Labels that would be created.
    pub labels_to_create: Vec<String>,

    /// Milestone handling, if the issue has one.
    pub milestone: Option<MilestonePlan>,
}

impl IssuePlan {
    /// Returns true if the plan creates a milestone.
    #[must_use]
    pub fn creates_milestone(&self) -> bool {
        matches!(self.milestone, Some(MilestonePlan::Create { .. }))
    }
}
