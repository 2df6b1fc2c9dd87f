//! Repository coordinates.

use super::ParseRepoError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A GitHub repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoCoordinate {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepoCoordinate {
    /// Creates a coordinate from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Returns the repository in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoCoordinate {
    type Err = ParseRepoError;

    /// Parses `owner/name`, `https://github.com/owner/name` or
    /// `git@github.com:owner/name.git`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        let path = if value.starts_with("https://") || value.starts_with("http://") {
            let url = url::Url::parse(value)?;
            url.path().trim_matches('/').to_string()
        } else if let Some(rest) = value.strip_prefix("git@") {
            rest.split_once(':')
                .map(|(_, path)| path.to_string())
                .ok_or(ParseRepoError::MissingSshPath)?
        } else {
            value.to_string()
        };

        let path = path.trim_end_matches(".git");
        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            }
            _ => Err(ParseRepoError::InvalidPath),
        }
    }
}
