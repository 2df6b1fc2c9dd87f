//! Repository host abstraction.
//!
//! [`IssueHost`] is the set of API calls a migration needs. [`GitHubHost`]
//! implements it against GitHub with octocrab; tests substitute an in-memory
//! implementation.

mod error;
mod github;
pub(crate) mod graphql;

pub use error::ApiError;
pub use github::GitHubHost;

use crate::config::RepoCoordinate;
use crate::types::{
    CreatedLabel, CreatedMilestone, Issue, IssueUpdate, Label, Milestone, TargetRepository,
    TransferredIssue,
};
use async_trait::async_trait;

/// API calls issued during a migration.
#[async_trait]
pub trait IssueHost: Send + Sync {
    /// Fetches all open issues of the source repository, oldest first.
    async fn fetch_source_issues(&self, repository: &RepoCoordinate)
        -> Result<Vec<Issue>, ApiError>;

    /// Fetches the id, labels and milestones of the target repository.
    async fn fetch_target_repository(
        &self,
        repository: &RepoCoordinate,
    ) -> Result<TargetRepository, ApiError>;

    /// Moves an issue into the repository with the given node id.
    async fn transfer_issue(
        &self,
        target_repository_id: &str,
        issue_id: &str,
    ) -> Result<TransferredIssue, ApiError>;

    /// Creates a label in a repository.
    async fn create_label(
        &self,
        repository: &RepoCoordinate,
        label: &Label,
    ) -> Result<CreatedLabel, ApiError>;

    /// Creates a milestone in a repository.
    async fn create_milestone(
        &self,
        repository: &RepoCoordinate,
        milestone: &Milestone,
    ) -> Result<CreatedMilestone, ApiError>;

    /// Assigns labels and/or a milestone to an issue.
    async fn update_issue(
        &self,
        repository: &RepoCoordinate,
        update: &IssueUpdate,
    ) -> Result<(), ApiError>;
}
