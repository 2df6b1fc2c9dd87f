//! Host API error types.

use thiserror::Error;

/// Errors that can occur while talking to the repository host.
#[derive(Debug, Error)]
pub enum ApiError {
    /// GitHub answered with an error status.
    #[error("GitHub API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Transport or client-side failure.
    #[error("GitHub API error: {0}")]
    GitHubError(octocrab::Error),

    /// The GraphQL endpoint answered with errors.
    #[error("GraphQL errors: {message}")]
    GraphQl { message: String },

    /// The repository does not exist or is not visible to the token.
    #[error("Repository {repository} not found or not accessible")]
    RepositoryNotFound { repository: String },

    /// A response lacked a field the request depends on.
    #[error("Response missing {what}")]
    MissingData { what: String },
}

impl From<octocrab::Error> for ApiError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self::Status {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            },
            other => Self::GitHubError(other),
        }
    }
}

impl ApiError {
    /// Returns true if repeating the request may succeed.
    ///
    /// Transport failures, server errors and rate limiting are retryable.
    /// Client errors (bad request, auth, not found, validation) are not.
    /// GitHub reports an exhausted rate limit as a 403, told apart by its message.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status: 403, message } => {
                message.to_lowercase().contains("rate limit")
            }
            Self::Status { status, .. } => {
                !matches!(*status, 400 | 401 | 404 | 410 | 422 | 451)
            }
            Self::GitHubError(octocrab::Error::Hyper { .. })
            | Self::GitHubError(octocrab::Error::Service { .. }) => true,
            _ => false,
        }
    }
}
