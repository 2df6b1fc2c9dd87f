//! GitHub implementation of [`IssueHost`].

use super::graphql::{
    GraphQlResponse, PageInfo, SourceData, TargetData, TransferData, SOURCE_ISSUES_QUERY,
    TARGET_REPOSITORY_QUERY, TRANSFER_ISSUE_MUTATION,
};
use super::{ApiError, IssueHost};
use crate::config::RepoCoordinate;
use crate::rate_limit::ensure_core_rate_limit;
use crate::types::{
    CreatedLabel, CreatedMilestone, Issue, IssueUpdate, Label, Milestone, TargetMilestone,
    TargetRepository, TransferredIssue,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::json;
use tracing::{debug, info};

/// Authenticated GitHub client.
#[derive(Clone)]
pub struct GitHubHost {
    octocrab: Octocrab,
}

impl GitHubHost {
    /// Builds a client authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(token: &str) -> Result<Self, octocrab::Error> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .build()?;
        Ok(Self { octocrab })
    }

    /// Wraps an already configured octocrab instance.
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    async fn graphql<T>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let payload = json!({ "query": query, "variables": variables });
        Ok(self.octocrab.graphql(&payload).await?)
    }
}

impl std::fmt::Debug for GitHubHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubHost").finish_non_exhaustive()
    }
}

#[async_trait]
impl IssueHost for GitHubHost {
    async fn fetch_source_issues(
        &self,
        repository: &RepoCoordinate,
    ) -> Result<Vec<Issue>, ApiError> {
        let mut issues = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            debug!(repo = %repository, cursor = ?cursor, "Fetching source issues page");
            let response: GraphQlResponse<SourceData> = self
                .graphql(
                    SOURCE_ISSUES_QUERY,
                    json!({
                        "owner": repository.owner,
                        "repo": repository.name,
                        "cursor": cursor,
                    }),
                )
                .await?;

            let page = response
                .into_data("source issues")?
                .repository
                .ok_or_else(|| ApiError::RepositoryNotFound {
                    repository: repository.full_name(),
                })?
                .issues;

            issues.extend(page.nodes.into_iter().map(Issue::from));

            match page.page_info.end_cursor {
                Some(next) if page.page_info.has_next_page => cursor = Some(next),
                _ => break,
            }
        }

        info!(repo = %repository, count = issues.len(), "Fetched source issues");
        Ok(issues)
    }

    async fn fetch_target_repository(
        &self,
        repository: &RepoCoordinate,
    ) -> Result<TargetRepository, ApiError> {
        let mut snapshot = TargetRepository::default();
        let mut labels = Pager::default();
        let mut milestones = Pager::default();

        loop {
            debug!(repo = %repository, "Fetching target repository page");
            let response: GraphQlResponse<TargetData> = self
                .graphql(
                    TARGET_REPOSITORY_QUERY,
                    json!({
                        "owner": repository.owner,
                        "repo": repository.name,
                        "labelsCursor": labels.cursor,
                        "milestonesCursor": milestones.cursor,
                    }),
                )
                .await?;

            let node = response
                .into_data("target repository")?
                .repository
                .ok_or_else(|| ApiError::RepositoryNotFound {
                    repository: repository.full_name(),
                })?;
            snapshot.id = node.id;

            let label_page = node.labels.unwrap_or_default();
            if !labels.done {
                snapshot
                    .labels
                    .extend(label_page.nodes.into_iter().map(Label::from));
                labels.advance(label_page.page_info);
            }

            let milestone_page = node.milestones.unwrap_or_default();
            if !milestones.done {
                snapshot
                    .milestones
                    .extend(milestone_page.nodes.into_iter().map(TargetMilestone::from));
                milestones.advance(milestone_page.page_info);
            }

            if labels.done && milestones.done {
                break;
            }
        }

        info!(
            repo = %repository,
            labels = snapshot.labels.len(),
            milestones = snapshot.milestones.len(),
            "Fetched target repository"
        );
        Ok(snapshot)
    }

    async fn transfer_issue(
        &self,
        target_repository_id: &str,
        issue_id: &str,
    ) -> Result<TransferredIssue, ApiError> {
        let response: GraphQlResponse<TransferData> = self
            .graphql(
                TRANSFER_ISSUE_MUTATION,
                json!({
                    "repositoryId": target_repository_id,
                    "issueId": issue_id,
                }),
            )
            .await?;

        response
            .into_data("transfer result")?
            .transfer_issue
            .and_then(|payload| payload.issue)
            .ok_or_else(|| ApiError::MissingData {
                what: "transferred issue".to_string(),
            })
    }

    async fn create_label(
        &self,
        repository: &RepoCoordinate,
        label: &Label,
    ) -> Result<CreatedLabel, ApiError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let created = self
            .octocrab
            .issues(&repository.owner, &repository.name)
            .create_label(
                &label.name,
                &label.color,
                label.description.as_deref().unwrap_or_default(),
            )
            .await?;

        Ok(CreatedLabel {
            name: created.name,
            url: format!("https://github.com/{}/issues/labels", repository.full_name()),
        })
    }

    async fn create_milestone(
        &self,
        repository: &RepoCoordinate,
        milestone: &Milestone,
    ) -> Result<CreatedMilestone, ApiError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let route = format!(
            "/repos/{}/{}/milestones",
            repository.owner, repository.name
        );
        let created: CreatedMilestone = self.octocrab.post(route, Some(milestone)).await?;
        Ok(created)
    }

    async fn update_issue(
        &self,
        repository: &RepoCoordinate,
        update: &IssueUpdate,
    ) -> Result<(), ApiError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let route = format!(
            "/repos/{}/{}/issues/{}",
            repository.owner, repository.name, update.issue_number
        );
        let _issue: serde_json::Value = self.octocrab.patch(route, Some(update)).await?;
        Ok(())
    }
}

/// Cursor state of one paginated connection.
#[derive(Debug, Default)]
struct Pager {
    cursor: Option<String>,
    done: bool,
}

impl Pager {
    fn advance(&mut self, page_info: PageInfo) {
        match page_info.end_cursor {
            Some(next) if page_info.has_next_page => self.cursor = Some(next),
            _ => self.done = true,
        }
    }
}
