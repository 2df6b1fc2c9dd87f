//! Runner error types.

/// Errors that abort a run before or while reading repository data.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Reading the source or target repository failed.
    #[error("Failed to read repository data: {0}")]
    Fetch(#[from] crate::host::ApiError),
}
