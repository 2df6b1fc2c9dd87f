//! Configuration loading.
//!
//! This module resolves the credential and the source/target repository
//! coordinates. Loading is all-or-nothing: the first missing value aborts
//! before any network call is made.

mod error;
mod repository;

pub use error::{ConfigError, ParseRepoError};
pub use repository::RepoCoordinate;

use tracing::debug;

/// Environment variable holding the GitHub access token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Environment variable holding the source repository coordinate.
pub const SOURCE_REPO_VAR: &str = "SOURCE_REPO";

/// Environment variable holding the target repository coordinate.
pub const TARGET_REPO_VAR: &str = "TARGET_REPO";

/// Validated credential and repository coordinates for a migration run.
#[derive(Clone)]
pub struct MigrationConfig {
    token: String,
    source: RepoCoordinate,
    target: RepoCoordinate,
}

impl MigrationConfig {
    /// Builds a configuration from raw values, checked in the order
    /// token, source, target.
    ///
    /// Absent values and values that are empty after trimming count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] naming the first missing value,
    /// [`ConfigError::InvalidRepository`] for an unparsable coordinate, or
    /// [`ConfigError::SameRepository`] when source and target coincide.
    pub fn from_values(
        token: Option<&str>,
        source: Option<&str>,
        target: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let token = require(TOKEN_VAR, token)?;
        let source = require(SOURCE_REPO_VAR, source)?;
        let target = require(TARGET_REPO_VAR, target)?;

        let source = parse_repository(SOURCE_REPO_VAR, source)?;
        let target = parse_repository(TARGET_REPO_VAR, target)?;

        if source == target {
            return Err(ConfigError::SameRepository {
                repository: source.full_name(),
            });
        }

        debug!(source = %source, target = %target, "Configuration loaded");
        Ok(Self {
            token: token.to_string(),
            source,
            target,
        })
    }

    /// Builds a configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`MigrationConfig::from_values`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(TOKEN_VAR).ok();
        let source = std::env::var(SOURCE_REPO_VAR).ok();
        let target = std::env::var(TARGET_REPO_VAR).ok();
        Self::from_values(token.as_deref(), source.as_deref(), target.as_deref())
    }

    /// Returns the GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the repository issues are read from.
    pub fn source(&self) -> &RepoCoordinate {
        &self.source
    }

    /// Returns the repository issues are transferred into.
    pub fn target(&self) -> &RepoCoordinate {
        &self.target
    }
}

impl std::fmt::Debug for MigrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationConfig")
            .field("source", &self.source)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

fn require<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, ConfigError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingValue { name }),
    }
}

fn parse_repository(name: &'static str, value: &str) -> Result<RepoCoordinate, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::InvalidRepository {
            name,
            value: value.to_string(),
            source,
        })
}
