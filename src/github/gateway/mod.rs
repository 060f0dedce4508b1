//! Gateway for the GitHub calls the backport flow depends on.
//!
//! Callers and tests depend on the [`PlatformGateway`] trait only; the
//! Octocrab implementation in this module handles the real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod rest;

pub use rest::OctocrabGateway;

use async_trait::async_trait;
use serde_json::Value;

use crate::github::error::BackportError;
use crate::github::identity::{PullRequestNumber, RepositoryIdentifier};
use crate::github::models::{
    CommentRequest, CreatedComment, CreatedPullRequest, PullRequest, PullRequestRequest,
    RequestReviewersResponse, ReviewRequest,
};

/// Narrow, purpose-named view of the GitHub REST API.
///
/// The synchronous accessors expose the execution context the gateway was
/// built with; the asynchronous operations each issue exactly one request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformGateway: Send + Sync {
    /// The repository of the current run.
    fn repo(&self) -> RepositoryIdentifier;

    /// The raw triggering-event payload.
    fn payload(&self) -> Value;

    /// The pull request that triggered the run.
    ///
    /// Prefers the payload's embedded pull request and falls back to the
    /// issue number.
    fn pull_number(&self) -> Result<PullRequestNumber, BackportError>;

    /// Posts a comment on an issue or pull request.
    async fn create_comment(&self, comment: &CommentRequest)
    -> Result<CreatedComment, BackportError>;

    /// Fetches a pull request of the current repository.
    async fn pull_request(&self, number: PullRequestNumber) -> Result<PullRequest, BackportError>;

    /// Reports whether the given pull request has been merged.
    async fn is_merged(&self, pull: &PullRequest) -> Result<bool, BackportError>;

    /// Opens a pull request.
    async fn create_pull_request(
        &self,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest, BackportError>;

    /// Requests reviews from the given logins.
    async fn request_reviewers(
        &self,
        request: &ReviewRequest,
    ) -> Result<RequestReviewersResponse, BackportError>;
}
