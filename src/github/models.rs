//! Request and response shapes exchanged with the GitHub REST API.
//!
//! Request types are built fresh for every call and carry the owner and
//! repository they target. Types prefixed with `Api` are internal
//! deserialisation targets that convert into the public domain types.

use http::StatusCode;
use serde::{Deserialize, Serialize};

use super::error::BackportError;
use super::identity::PullRequestNumber;

/// A git ref on either side of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchRef {
    /// Branch name, e.g. `main`.
    pub ref_name: String,
    /// Commit the ref pointed at when the pull request was read.
    pub sha: String,
}

/// A pull request as GitHub reported it at fetch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number.
    pub number: PullRequestNumber,
    /// Title of the pull request.
    pub title: String,
    /// Description, if any.
    pub body: Option<String>,
    /// State (e.g. open, closed).
    pub state: Option<String>,
    /// Whether GitHub reports the pull request as merged.
    pub merged: bool,
    /// Commit created by the merge (or squash/rebase result).
    pub merge_commit_sha: Option<String>,
    /// Source branch.
    pub head: BranchRef,
    /// Branch the pull request was merged into.
    pub base: BranchRef,
    /// Author login if present.
    pub author: Option<String>,
    /// Names of the labels applied to the pull request.
    pub labels: Vec<String>,
    /// Logins of reviewers currently requested.
    pub requested_reviewers: Vec<String>,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
}

/// Input for creating an issue or pull request comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Issue (or pull request) to comment on.
    pub issue_number: PullRequestNumber,
    /// Markdown body of the comment.
    pub body: String,
}

impl CommentRequest {
    pub(crate) fn path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}/comments",
            self.owner, self.repo, self.issue_number
        )
    }

    pub(crate) fn payload(&self) -> ApiCommentBody<'_> {
        ApiCommentBody { body: &self.body }
    }
}

/// Input for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRequest {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Title of the new pull request.
    pub title: String,
    /// Description of the new pull request.
    pub body: String,
    /// Branch containing the changes.
    pub head: String,
    /// Branch the changes should land on.
    pub base: String,
    /// Whether maintainers may push to the head branch.
    pub maintainer_can_modify: bool,
}

impl PullRequestRequest {
    pub(crate) fn path(&self) -> String {
        format!("/repos/{}/{}/pulls", self.owner, self.repo)
    }

    pub(crate) fn payload(&self) -> ApiPullRequestBody<'_> {
        ApiPullRequestBody {
            title: &self.title,
            body: &self.body,
            head: &self.head,
            base: &self.base,
            maintainer_can_modify: self.maintainer_can_modify,
        }
    }
}

/// Input for requesting reviewers on a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request receiving the reviewers.
    pub pull_number: PullRequestNumber,
    /// Logins to request.
    pub reviewers: Vec<String>,
}

impl ReviewRequest {
    pub(crate) fn path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}/requested_reviewers",
            self.owner, self.repo, self.pull_number
        )
    }

    pub(crate) fn payload(&self) -> ApiReviewersBody<'_> {
        ApiReviewersBody {
            reviewers: &self.reviewers,
        }
    }
}

/// Subset of the comment-creation response the caller needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedComment {
    /// HTTP status GitHub answered with.
    pub status: StatusCode,
    /// Comment identifier.
    pub id: u64,
    /// HTML URL of the comment.
    pub html_url: Option<String>,
}

/// Subset of the pull-request creation response the caller needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// HTTP status GitHub answered with.
    pub status: StatusCode,
    /// Number of the pull request.
    pub number: PullRequestNumber,
    /// Reviewers GitHub reports as requested, e.g. from `CODEOWNERS`.
    pub requested_reviewers: Vec<String>,
}

/// Requesting reviewers answers with the updated pull request.
pub type RequestReviewersResponse = CreatedPullRequest;

#[derive(Debug, Serialize)]
pub(crate) struct ApiCommentBody<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiPullRequestBody<'a> {
    title: &'a str,
    body: &'a str,
    head: &'a str,
    base: &'a str,
    maintainer_can_modify: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiReviewersBody<'a> {
    reviewers: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) merged: Option<bool>,
    pub(crate) merge_commit_sha: Option<String>,
    pub(crate) head: Option<ApiBranchRef>,
    pub(crate) base: Option<ApiBranchRef>,
    pub(crate) user: Option<ApiUser>,
    #[serde(default)]
    pub(crate) labels: Vec<ApiLabel>,
    #[serde(default)]
    pub(crate) requested_reviewers: Vec<ApiUser>,
    pub(crate) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiBranchRef {
    #[serde(rename = "ref")]
    pub(crate) ref_name: String,
    pub(crate) sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLabel {
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiComment {
    pub(crate) id: u64,
    pub(crate) html_url: Option<String>,
}

impl From<ApiBranchRef> for BranchRef {
    fn from(value: ApiBranchRef) -> Self {
        Self {
            ref_name: value.ref_name,
            sha: value.sha,
        }
    }
}

fn logins(users: Vec<ApiUser>) -> Vec<String> {
    users.into_iter().filter_map(|user| user.login).collect()
}

impl TryFrom<ApiPullRequest> for PullRequest {
    type Error = BackportError;

    fn try_from(value: ApiPullRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            number: PullRequestNumber::new(value.number)?,
            title: value.title.unwrap_or_default(),
            body: value.body,
            state: value.state,
            merged: value.merged.unwrap_or(false),
            merge_commit_sha: value.merge_commit_sha,
            head: value.head.map(BranchRef::from).unwrap_or_default(),
            base: value.base.map(BranchRef::from).unwrap_or_default(),
            author: value.user.and_then(|user| user.login),
            labels: value.labels.into_iter().map(|label| label.name).collect(),
            requested_reviewers: logins(value.requested_reviewers),
            html_url: value.html_url,
        })
    }
}

impl CreatedPullRequest {
    pub(crate) fn from_api(status: StatusCode, api: ApiPullRequest) -> Result<Self, BackportError> {
        Ok(Self {
            status,
            number: PullRequestNumber::new(api.number)?,
            requested_reviewers: logins(api.requested_reviewers),
        })
    }
}

impl CreatedComment {
    pub(crate) fn from_api(status: StatusCode, api: ApiComment) -> Self {
        Self {
            status,
            id: api.id,
            html_url: api.html_url,
        }
    }
}
