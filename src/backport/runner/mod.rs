//! The backport flow over the platform gateway and a branch workspace.

use async_trait::async_trait;

use crate::github::error::BackportError;
use crate::github::gateway::PlatformGateway;
use crate::github::identity::PullRequestNumber;
use crate::github::models::{
    CommentRequest, CreatedPullRequest, PullRequest, PullRequestRequest, ReviewRequest,
};

use super::Orchestrator;
use super::settings::BackportSettings;
use super::targets::resolve_targets;
use super::template::{TemplateValues, backport_branch_name, render};
use super::workspace::{BranchRequest, BranchWorkspace};

/// Comment posted when the triggering pull request is still open.
pub const NOT_MERGED_MESSAGE: &str = "Only merged pull requests can be backported.";

/// Backports the triggering pull request to every resolved target.
#[derive(Debug)]
pub struct Backport<G, W> {
    gateway: G,
    workspace: W,
    settings: BackportSettings,
}

impl<G, W> Backport<G, W>
where
    G: PlatformGateway,
    W: BranchWorkspace,
{
    /// Creates an orchestrator from its collaborators.
    #[must_use]
    pub const fn new(gateway: G, workspace: W, settings: BackportSettings) -> Self {
        Self {
            gateway,
            workspace,
            settings,
        }
    }

    async fn comment(&self, number: PullRequestNumber, body: String) -> Result<(), BackportError> {
        let repo = self.gateway.repo();
        let request = CommentRequest {
            owner: repo.owner().to_owned(),
            repo: repo.repo().to_owned(),
            issue_number: number,
            body,
        };
        self.gateway.create_comment(&request).await.map(|_| ())
    }

    async fn backport_to(
        &self,
        pull: &PullRequest,
        commit: &str,
        target: &str,
    ) -> Result<CreatedPullRequest, BackportError> {
        let values = TemplateValues {
            pull_number: pull.number,
            pull_title: &pull.title,
            target_branch: target,
        };
        let title = render(&self.settings.pull.title, &values)?;
        let body = render(&self.settings.pull.description, &values)?;

        let head = backport_branch_name(pull.number, target);
        self.workspace.prepare_branch(&BranchRequest {
            target: target.to_owned(),
            source_base: pull.base.ref_name.clone(),
            commit: commit.to_owned(),
            head: head.clone(),
        })?;
        let repo = self.gateway.repo();
        let created = self
            .gateway
            .create_pull_request(&PullRequestRequest {
                owner: repo.owner().to_owned(),
                repo: repo.repo().to_owned(),
                title,
                body,
                head,
                base: target.to_owned(),
                maintainer_can_modify: true,
            })
            .await?;

        if let Some(author) = pull.author.as_deref() {
            if created.requested_reviewers.iter().any(|login| login == author) {
                tracing::debug!("{author} is already requested on #{}", created.number);
            } else {
                let request = ReviewRequest {
                    owner: repo.owner().to_owned(),
                    repo: repo.repo().to_owned(),
                    pull_number: created.number,
                    reviewers: vec![author.to_owned()],
                };
                // A refused review request leaves the backport in place.
                if let Err(error) = self.gateway.request_reviewers(&request).await {
                    tracing::warn!("Could not request review from {author}: {error}");
                }
            }
        }
        Ok(created)
    }

    /// Runs the backport for the pull request of the current event.
    ///
    /// # Errors
    ///
    /// Returns the first gateway error raised before targets are processed,
    /// any error raised while commenting, or
    /// [`BackportError::BackportFailed`] when at least one target failed.
    pub async fn run(&self) -> Result<(), BackportError> {
        let number = self.gateway.pull_number()?;
        let pull = self.gateway.pull_request(number).await?;

        if !self.gateway.is_merged(&pull).await? {
            tracing::info!("Pull request #{number} is not merged");
            return self.comment(number, NOT_MERGED_MESSAGE.to_owned()).await;
        }

        let targets = resolve_targets(&pull.labels, &self.settings);
        if targets.is_empty() {
            tracing::info!("No backport targets for #{number}");
            return Ok(());
        }

        let commit = pull
            .merge_commit_sha
            .clone()
            .ok_or_else(|| BackportError::Context {
                message: format!("pull request #{number} has no merge commit"),
            })?;

        let mut failed = 0_usize;
        for target in &targets {
            match self.backport_to(&pull, &commit, target).await {
                Ok(created) => {
                    tracing::info!("Backported #{number} to {target} as #{}", created.number);
                    self.comment(
                        number,
                        format!("Backport to `{target}` created: #{}", created.number),
                    )
                    .await?;
                }
                Err(error) => {
                    tracing::error!("Backport of #{number} to {target} failed: {error}");
                    failed += 1;
                    self.comment(
                        number,
                        format!("Backport to `{target}` failed: {error}"),
                    )
                    .await?;
                }
            }
        }

        if failed == 0 {
            Ok(())
        } else {
            Err(BackportError::BackportFailed { failed })
        }
    }
}

#[async_trait]
impl<G, W> Orchestrator for Backport<G, W>
where
    G: PlatformGateway,
    W: BranchWorkspace,
{
    async fn run(&self) -> Result<(), BackportError> {
        Self::run(self).await
    }
}
