//! Error types shared by the platform adapter and the backport flow.

use http::StatusCode;
use thiserror::Error;

/// Errors surfaced while reading inputs, talking to GitHub, or preparing
/// backport branches.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackportError {
    /// A required action input was not supplied.
    #[error("input required and not supplied: {name}")]
    MissingInput {
        /// Name of the missing input (e.g. `github_token`).
        name: String,
    },

    /// A pattern input could not be compiled.
    #[error("input {name} is not a valid regular expression: {message}")]
    InvalidPattern {
        /// Name of the offending input.
        name: String,
        /// Compiler diagnostic from the regex engine.
        message: String,
    },

    /// The authentication token was blank.
    #[error("personal access token is required")]
    MissingToken,

    /// A URL (API base or route) could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The GitHub Actions execution context is missing or malformed.
    #[error("execution context error: {message}")]
    Context {
        /// What was missing or malformed.
        message: String,
    },

    /// The token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// Status GitHub answered with (401 or 403).
        status: StatusCode,
        /// GitHub error message returned with the response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Status GitHub answered with, when one was received.
        status: Option<StatusCode>,
        /// Response detail describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The merge-status check answered with neither 204 nor 404.
    #[error("unexpected response status: {status}")]
    UnexpectedStatus {
        /// The numeric status code that was received.
        status: u16,
    },

    /// A local git operation failed.
    #[error("git error: {message}")]
    Git {
        /// Error detail from git.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A pull request template failed to parse or render.
    #[error("pull request template error: {message}")]
    Template {
        /// Input name and engine diagnostic.
        message: String,
    },

    /// One or more target branches could not be backported.
    #[error("backport failed for {failed} target branch(es)")]
    BackportFailed {
        /// Number of targets that failed.
        failed: usize,
    },
}

impl BackportError {
    /// Returns the HTTP status carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Authentication { status, .. } => Some(*status),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Reports whether GitHub answered this call with 404 Not Found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<git2::Error> for BackportError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}
