//! Identity wrappers for repositories, pull requests, and tokens.

use std::fmt;

use super::error::BackportError;

/// The owner and name of the repository the action runs against.
///
/// Derived once per run from the execution context and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryIdentifier {
    owner: String,
    repo: String,
}

impl RepositoryIdentifier {
    /// Builds an identifier from owner and repository names.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::Context`] when either part is blank.
    pub fn new(owner: &str, repo: &str) -> Result<Self, BackportError> {
        let owner_value = owner.trim();
        let repo_value = repo.trim();
        if owner_value.is_empty() || repo_value.is_empty() {
            return Err(BackportError::Context {
                message: format!("repository must be owner/name, got '{owner}/{repo}'"),
            });
        }
        Ok(Self {
            owner: owner_value.to_owned(),
            repo: repo_value.to_owned(),
        })
    }

    /// Parses the `owner/repo` form used by `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::Context`] when the value is not exactly two
    /// non-empty segments separated by `/`.
    pub fn parse(slug: &str) -> Result<Self, BackportError> {
        let mut parts = slug.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) => Self::new(owner, repo),
            _ => Err(BackportError::Context {
                message: format!("repository must be owner/name, got '{slug}'"),
            }),
        }
    }

    /// Repository owner login.
    #[must_use]
    pub const fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// Repository name.
    #[must_use]
    pub const fn repo(&self) -> &str {
        self.repo.as_str()
    }

    pub(crate) fn pulls_path(&self) -> String {
        format!("/repos/{}/{}/pulls", self.owner, self.repo)
    }

    pub(crate) fn pull_request_path(&self, number: PullRequestNumber) -> String {
        format!("{}/{number}", self.pulls_path())
    }

    pub(crate) fn merge_path(&self, number: PullRequestNumber) -> String {
        format!("{}/merge", self.pull_request_path(number))
    }
}

impl fmt::Display for RepositoryIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Pull request (or issue) number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a pull request number, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::Context`] when the value is zero.
    pub fn new(value: u64) -> Result<Self, BackportError> {
        if value == 0 {
            return Err(BackportError::Context {
                message: "pull request number must be a positive integer".to_owned(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, BackportError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BackportError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PersonalAccessToken(<redacted>)")
    }
}
