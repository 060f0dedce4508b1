//! Interpretation of the "is this pull request merged?" endpoint.
//!
//! GitHub answers `GET /repos/{owner}/{repo}/pulls/{number}/merge` with
//! 204 when the pull request is merged and 404 when it is not. Depending on
//! the client path, the 404 arrives either as a response or as a rejected
//! call; both mean "not merged".

use http::StatusCode;

use super::error::BackportError;

/// Outcome of a merge-status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStatus {
    /// GitHub answered 204 No Content.
    Merged,
    /// GitHub answered (or failed with) 404 Not Found.
    NotMerged,
}

impl MergeStatus {
    /// Maps a response status onto a merge status.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::UnexpectedStatus`] for anything other than
    /// 204 or 404.
    pub fn from_status(status: StatusCode) -> Result<Self, BackportError> {
        match status {
            StatusCode::NO_CONTENT => Ok(Self::Merged),
            StatusCode::NOT_FOUND => Ok(Self::NotMerged),
            other => Err(BackportError::UnexpectedStatus {
                status: other.as_u16(),
            }),
        }
    }

    /// Whether the pull request is merged.
    #[must_use]
    pub const fn is_merged(self) -> bool {
        matches!(self, Self::Merged)
    }
}

/// Folds both signalling paths of the merge check into one answer.
///
/// A resolved call is mapped through [`MergeStatus::from_status`]. A rejected
/// call carrying 404 is "not merged"; any other rejection is returned as is.
///
/// # Errors
///
/// Returns [`BackportError::UnexpectedStatus`] for unexpected statuses and
/// the original error for rejections other than 404.
pub fn interpret_merge_check(
    outcome: Result<StatusCode, BackportError>,
) -> Result<MergeStatus, BackportError> {
    match outcome {
        Ok(status) => MergeStatus::from_status(status),
        Err(error) if error.is_not_found() => Ok(MergeStatus::NotMerged),
        Err(error) => Err(error),
    }
}
