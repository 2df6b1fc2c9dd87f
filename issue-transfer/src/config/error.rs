//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading the migration configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value is absent or empty.
    #[error("{name} is not set")]
    MissingValue { name: &'static str },

    /// A repository coordinate could not be parsed.
    #[error("Invalid repository '{value}' in {name}: {source}")]
    InvalidRepository {
        name: &'static str,
        value: String,
        source: ParseRepoError,
    },

    /// Source and target point at the same repository.
    #[error("Source and target repository are both '{repository}'")]
    SameRepository { repository: String },
}

/// Errors that can occur while parsing a repository coordinate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseRepoError {
    /// The value looked like a URL but could not be parsed as one.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An SSH remote without the `host:path` separator.
    #[error("expected git@host:owner/name")]
    MissingSshPath,

    /// The path did not have exactly two non-empty segments.
    #[error("expected owner/name")]
    InvalidPath,
}
