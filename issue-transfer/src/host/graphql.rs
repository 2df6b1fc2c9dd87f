//! GraphQL documents and response shapes.
//!
//! Reads and the transfer mutation go through GraphQL because the REST API
//! has no equivalent for `transferIssue`.

use super::ApiError;
use crate::types::{Issue, Label, Milestone, MilestoneState, TargetMilestone, TransferredIssue};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Open issues of a repository with their labels and milestone, oldest first.
pub(crate) const SOURCE_ISSUES_QUERY: &str = r#"
query ($owner: String!, $repo: String!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    issues(first: 100, after: $cursor, states: OPEN, orderBy: {field: CREATED_AT, direction: ASC}) {
      pageInfo { hasNextPage endCursor }
      nodes {
        id
        number
        title
        body
        labels(first: 100) { nodes { name color description } }
        milestone { title description dueOn state }
      }
    }
  }
}
"#;

/// Repository id plus labels and milestones, paginated independently.
pub(crate) const TARGET_REPOSITORY_QUERY: &str = r#"
query ($owner: String!, $repo: String!, $labelsCursor: String, $milestonesCursor: String) {
  repository(owner: $owner, name: $repo) {
    id
    labels(first: 100, after: $labelsCursor) {
      pageInfo { hasNextPage endCursor }
      nodes { name color description }
    }
    milestones(first: 100, after: $milestonesCursor, states: [OPEN, CLOSED]) {
      pageInfo { hasNextPage endCursor }
      nodes { number title }
    }
  }
}
"#;

/// Moves an issue into another repository.
pub(crate) const TRANSFER_ISSUE_MUTATION: &str = r#"
mutation ($repositoryId: ID!, $issueId: ID!) {
  transferIssue(input: {repositoryId: $repositoryId, issueId: $issueId}) {
    issue { id number url }
  }
}
"#;

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    /// Unwraps the payload, turning reported errors into [`ApiError::GraphQl`].
    pub(crate) fn into_data(self, what: &str) -> Result<T, ApiError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::GraphQl {
                message: messages.join(", "),
            });
        }
        self.data.ok_or_else(|| ApiError::MissingData {
            what: what.to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub(crate) has_next_page: bool,
    pub(crate) end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection<T> {
    #[serde(default)]
    pub(crate) page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub(crate) nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            page_info: PageInfo::default(),
            nodes: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SourceData {
    pub(crate) repository: Option<SourceRepository>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SourceRepository {
    pub(crate) issues: Connection<IssueNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueNode {
    id: String,
    number: u64,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    labels: Option<Connection<LabelNode>>,
    #[serde(default)]
    milestone: Option<MilestoneNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelNode {
    name: String,
    color: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneNode {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    due_on: Option<DateTime<Utc>>,
    state: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TargetData {
    pub(crate) repository: Option<TargetRepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TargetRepositoryNode {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) labels: Option<Connection<LabelNode>>,
    #[serde(default)]
    pub(crate) milestones: Option<Connection<TargetMilestoneNode>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TargetMilestoneNode {
    number: u64,
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransferData {
    pub(crate) transfer_issue: Option<TransferPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransferPayload {
    pub(crate) issue: Option<TransferredIssue>,
}

impl From<LabelNode> for Label {
    fn from(node: LabelNode) -> Self {
        Label {
            name: node.name,
            color: node.color,
            description: node.description,
        }
    }
}

impl From<MilestoneNode> for Milestone {
    /// Lowercases the state and substitutes an empty description.
    fn from(node: MilestoneNode) -> Self {
        Milestone {
            title: node.title,
            description: node.description.unwrap_or_default(),
            due_on: node.due_on,
            state: MilestoneState::parse(&node.state).unwrap_or(MilestoneState::Open),
        }
    }
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        Issue {
            id: node.id,
            number: node.number,
            title: node.title,
            body: node.body,
            labels: node
                .labels
                .unwrap_or_default()
                .nodes
                .into_iter()
                .map(Label::from)
                .collect(),
            milestone: node.milestone.map(Milestone::from),
        }
    }
}

impl From<TargetMilestoneNode> for TargetMilestone {
    fn from(node: TargetMilestoneNode) -> Self {
        TargetMilestone {
            number: node.number,
            title: node.title,
        }
    }
}
