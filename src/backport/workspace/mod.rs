//! Local repository operations behind the backport flow.
//!
//! The orchestrator only needs one thing from the checkout: a branch holding
//! the merged change on top of the target branch, pushed to the remote. The
//! [`BranchWorkspace`] trait keeps that step swappable in tests.

use std::fmt::Debug;

use camino::Utf8PathBuf;
use git2::{Cred, FetchOptions, Oid, PushOptions, RemoteCallbacks, Repository, Signature};

use crate::github::error::BackportError;
use crate::github::identity::PersonalAccessToken;

const REMOTE: &str = "origin";
const TOKEN_USER: &str = "x-access-token";
const BOT_NAME: &str = "github-actions[bot]";
const BOT_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";

/// Describes the branch to prepare for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRequest {
    /// Branch the backport lands on.
    pub target: String,
    /// Branch the original pull request was merged into.
    pub source_base: String,
    /// Commit to cherry-pick.
    pub commit: String,
    /// Name of the branch to create and push.
    pub head: String,
}

/// Prepares and publishes backport branches.
#[cfg_attr(test, mockall::automock)]
pub trait BranchWorkspace: Send + Sync {
    /// Creates `request.head` from the remote target branch with
    /// `request.commit` applied, then pushes it.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::Git`] when fetching, cherry-picking, or
    /// pushing fails, including when the cherry-pick conflicts.
    fn prepare_branch(&self, request: &BranchRequest) -> Result<(), BackportError>;
}

/// git2-backed workspace authenticating with the action token.
pub struct Git2Workspace {
    path: Utf8PathBuf,
    token: PersonalAccessToken,
}

impl Debug for Git2Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Workspace")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Git2Workspace {
    /// Creates a workspace for the checkout at `path`.
    #[must_use]
    pub const fn new(path: Utf8PathBuf, token: PersonalAccessToken) -> Self {
        Self { path, token }
    }

    fn callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|_url, _username, _allowed| {
            Cred::userpass_plaintext(TOKEN_USER, self.token.value())
        });
        callbacks.push_update_reference(|refname, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "remote rejected {refname}: {message}"
            ))),
            None => Ok(()),
        });
        callbacks
    }
}

fn tracking_refspec(branch: &str) -> String {
    format!("+refs/heads/{branch}:refs/remotes/{REMOTE}/{branch}")
}

impl BranchWorkspace for Git2Workspace {
    fn prepare_branch(&self, request: &BranchRequest) -> Result<(), BackportError> {
        tracing::info!(
            "Preparing {} from {REMOTE}/{} with {}",
            request.head,
            request.target,
            request.commit
        );
        let repo = Repository::open(self.path.as_std_path())?;
        let mut remote = repo.find_remote(REMOTE)?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(self.callbacks());
        remote.fetch(
            &[
                tracking_refspec(&request.target),
                tracking_refspec(&request.source_base),
            ],
            Some(&mut fetch_options),
            None,
        )?;

        let base = repo
            .find_reference(&format!("refs/remotes/{REMOTE}/{}", request.target))?
            .peel_to_commit()?;
        let picked = repo.find_commit(Oid::from_str(&request.commit)?)?;
        let mainline = u32::from(picked.parent_count() > 1);

        let mut index = repo.cherrypick_commit(&picked, &base, mainline, None)?;
        if index.has_conflicts() {
            return Err(BackportError::Git {
                message: format!(
                    "cherry-pick of {} onto {} has conflicts",
                    request.commit, request.target
                ),
            });
        }
        let tree = repo.find_tree(index.write_tree_to(&repo)?)?;

        let committer = repo
            .signature()
            .or_else(|_| Signature::now(BOT_NAME, BOT_EMAIL))?;
        let message = format!(
            "{}\n\n(cherry picked from commit {})",
            picked.message().unwrap_or_default().trim_end(),
            request.commit
        );
        let commit = repo.commit(
            None,
            &picked.author(),
            &committer,
            &message,
            &tree,
            &[&base],
        )?;
        repo.reference(
            &format!("refs/heads/{}", request.head),
            commit,
            true,
            "backport",
        )?;

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(self.callbacks());
        let refspec = format!("+refs/heads/{0}:refs/heads/{0}", request.head);
        remote.push(&[refspec.as_str()], Some(&mut push_options))?;
        Ok(())
    }
}
