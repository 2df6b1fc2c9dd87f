//! Core types for issue transfer.
//!
//! This module contains the data structures shared across the crate:
//! - [`Issue`], [`Label`] and [`Milestone`] - Source repository data
//! - [`TargetRepository`] and [`TargetMilestone`] - Target repository snapshot
//! - [`TransferredIssue`] and [`IssueUpdate`] - Artifacts of a transfer
//! - [`CreatedLabel`] and [`CreatedMilestone`] - Results of reconciliation calls

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An open issue read from the source repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// GraphQL node id.
    pub id: String,

    /// Issue number in the source repository.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Issue body (markdown).
    pub body: String,

    /// Labels attached to the issue, in the order GitHub returns them.
    pub labels: Vec<Label>,

    /// Milestone the issue belongs to, if any.
    pub milestone: Option<Milestone>,
}

impl Issue {
    /// Returns true if the issue carries labels or a milestone.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        !self.labels.is_empty() || self.milestone.is_some()
    }
}

/// A label as it exists in a repository. Names are unique per repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,

    /// Hex color without the leading `#`.
    pub color: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Open/closed state of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    /// Milestone is open.
    Open,
    /// Milestone is closed.
    Closed,
}

impl MilestoneState {
    /// Parses a state case-insensitively (GraphQL reports `OPEN`/`CLOSED`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Returns the lowercase state as the REST API expects it.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A milestone referenced by a source issue. Titles are unique per repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    /// Milestone title.
    pub title: String,

    /// Milestone description, empty when the source has none.
    pub description: String,

    /// Due date, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<DateTime<Utc>>,

    /// Milestone state.
    pub state: MilestoneState,
}

/// A milestone that exists in the target repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMilestone {
    /// Milestone number used by the REST API.
    pub number: u64,

    /// Milestone title.
    pub title: String,
}

/// Point-in-time snapshot of the target repository.
#[derive(Debug, Clone, Default)]
pub struct TargetRepository {
    /// GraphQL node id of the repository.
    pub id: String,

    /// Labels that existed when the snapshot was taken.
    pub labels: Vec<Label>,

    /// Milestones that existed when the snapshot was taken.
    pub milestones: Vec<TargetMilestone>,
}

/// An issue after it has been moved into the target repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransferredIssue {
    /// GraphQL node id.
    pub id: String,

    /// Issue number in the target repository.
    pub number: u64,

    /// Browsable URL of the issue.
    pub url: String,
}

/// A label created in the target repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLabel {
    /// Label name.
    pub name: String,

    /// Browsable URL.
    pub url: String,
}

/// A milestone created in the target repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedMilestone {
    /// Milestone number.
    pub number: u64,

    /// Milestone title.
    pub title: String,

    /// Browsable URL.
    #[serde(rename = "html_url")]
    pub url: String,
}

/// Labels and milestone assigned to a transferred issue in a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueUpdate {
    /// Issue number in the target repository.
    #[serde(skip)]
    pub issue_number: u64,

    /// Label names to assign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,

    /// Milestone number to assign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

impl IssueUpdate {
    /// Builds an update, returning `None` if there is nothing to assign.
    #[must_use]
    pub fn new(issue_number: u64, labels: Vec<String>, milestone: Option<u64>) -> Option<Self> {
        let labels = (!labels.is_empty()).then_some(labels);
        if labels.is_none() && milestone.is_none() {
            return None;
        }
        Some(Self {
            issue_number,
            labels,
            milestone,
        })
    }
}
