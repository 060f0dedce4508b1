//! Execution context supplied by the GitHub Actions runner.
//!
//! The runner describes the triggering event through environment variables
//! and a JSON payload file. [`ActionContext`] captures those values once so
//! the gateway and the backport flow read them from an explicit value rather
//! than from process-wide state.

use std::env;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;
use url::Url;

use super::error::BackportError;
use super::identity::{PullRequestNumber, RepositoryIdentifier};

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";
const API_URL_VAR: &str = "GITHUB_API_URL";

/// Snapshot of the repository, event payload, and API endpoint for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionContext {
    repo: RepositoryIdentifier,
    payload: Value,
    api_url: Url,
}

impl ActionContext {
    /// Creates a context for the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::InvalidUrl`] if the default API URL fails to
    /// parse.
    pub fn new(repo: RepositoryIdentifier, payload: Value) -> Result<Self, BackportError> {
        let api_url = parse_api_url(DEFAULT_API_URL)?;
        Ok(Self {
            repo,
            payload,
            api_url,
        })
    }

    /// Replaces the API endpoint, e.g. for GitHub Enterprise Server.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::InvalidUrl`] when `api_url` is not a URL.
    pub fn with_api_url(self, api_url: &str) -> Result<Self, BackportError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            ..self
        })
    }

    /// Reads the context from the runner's environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::Context`] when `GITHUB_REPOSITORY` is unset or
    /// malformed, or when the event payload is not valid JSON.
    pub fn from_env() -> Result<Self, BackportError> {
        let repository = env::var(REPOSITORY_VAR).map_err(|_| BackportError::Context {
            message: format!("{REPOSITORY_VAR} is not set"),
        })?;
        let event_path = env::var(EVENT_PATH_VAR).ok();
        let api_url = env::var(API_URL_VAR).ok();

        Self::from_parts(
            &repository,
            event_path.as_deref().map(Utf8Path::new),
            api_url.as_deref(),
        )
    }

    /// Builds a context from raw runner values.
    ///
    /// A missing or unreadable event file yields an empty payload, matching
    /// the runner toolkit; a file that exists but is not JSON is an error.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::Context`] for a malformed repository slug or
    /// payload, and [`BackportError::InvalidUrl`] for a malformed API URL.
    pub fn from_parts(
        repository: &str,
        event_path: Option<&Utf8Path>,
        api_url: Option<&str>,
    ) -> Result<Self, BackportError> {
        let repo = RepositoryIdentifier::parse(repository)?;
        let payload = match event_path {
            Some(path) => read_payload(path)?,
            None => Value::Object(serde_json::Map::new()),
        };
        let context = Self::new(repo, payload)?;
        match api_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => context.with_api_url(url),
            None => Ok(context),
        }
    }

    /// The repository the run belongs to.
    #[must_use]
    pub const fn repo(&self) -> &RepositoryIdentifier {
        &self.repo
    }

    /// The raw triggering-event payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// The REST API endpoint for this run.
    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// The issue number of the triggering event.
    ///
    /// Looks at `issue`, then `pull_request`, then the top-level `number`.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::Context`] when the payload carries none.
    pub fn issue_number(&self) -> Result<PullRequestNumber, BackportError> {
        ["issue", "pull_request"]
            .into_iter()
            .find_map(|key| self.payload.get(key).and_then(number_field))
            .or_else(|| number_field(&self.payload))
            .ok_or_else(|| BackportError::Context {
                message: "event payload does not reference an issue".to_owned(),
            })
            .and_then(PullRequestNumber::new)
    }

    /// The pull request number of the triggering event.
    ///
    /// Uses the embedded `pull_request` object when present. Otherwise falls
    /// back to the issue number, since comment-triggered events surface the
    /// pull request only as an issue.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::Context`] when neither is available.
    pub fn pull_number(&self) -> Result<PullRequestNumber, BackportError> {
        match self.payload.get("pull_request").and_then(number_field) {
            Some(number) => PullRequestNumber::new(number),
            None => self.issue_number(),
        }
    }
}

fn number_field(value: &Value) -> Option<u64> {
    value.get("number").and_then(Value::as_u64)
}

fn parse_api_url(raw: &str) -> Result<Url, BackportError> {
    Url::parse(raw).map_err(|error| BackportError::InvalidUrl(format!("{raw}: {error}")))
}

fn read_payload(path: &Utf8Path) -> Result<Value, BackportError> {
    let Some(file_name) = path.file_name() else {
        return Err(BackportError::Context {
            message: format!("event path '{path}' has no file name"),
        });
    };
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };

    let contents = Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name));
    let raw = match contents {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!("event payload '{path}' could not be read: {error}");
            return Ok(Value::Object(serde_json::Map::new()));
        }
    };

    serde_json::from_str(&raw).map_err(|error| BackportError::Context {
        message: format!("event payload '{path}' is not valid JSON: {error}"),
    })
}
