//! GitHub platform adapter for the backport action.
//!
//! This module hides Octocrab behind a narrow gateway so the backport flow
//! and its tests depend only on purpose-named operations: reading the
//! execution context, fetching pull requests, checking merge status, and
//! creating comments, pull requests, and review requests. Errors are mapped
//! into [`BackportError`] variants that keep GitHub's status code.

pub mod context;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod merge_status;
pub mod models;

pub use context::{ActionContext, DEFAULT_API_URL};
pub use error::BackportError;
pub use gateway::{OctocrabGateway, PlatformGateway};
pub use identity::{PersonalAccessToken, PullRequestNumber, RepositoryIdentifier};
pub use merge_status::{MergeStatus, interpret_merge_check};
pub use models::{
    BranchRef, CommentRequest, CreatedComment, CreatedPullRequest, PullRequest,
    PullRequestRequest, RequestReviewersResponse, ReviewRequest,
};

#[cfg(test)]
pub use gateway::MockPlatformGateway;

#[cfg(test)]
mod tests;
