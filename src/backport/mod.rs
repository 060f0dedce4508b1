//! Backport orchestration.
//!
//! [`Backport`] drives one run: it reads the triggering pull request through
//! a [`PlatformGateway`](crate::github::PlatformGateway), resolves target
//! branches from labels and settings, prepares each branch through a
//! [`BranchWorkspace`], and reports back on the original pull request.

mod runner;
mod settings;
mod targets;
mod template;
mod workspace;

use async_trait::async_trait;

use crate::github::error::BackportError;

pub use runner::{Backport, NOT_MERGED_MESSAGE};
pub use settings::{BackportSettings, LabelSettings, PullTemplates};
pub use targets::resolve_targets;
pub use template::{TemplateValues, backport_branch_name, render, validate_template};
pub use workspace::{BranchRequest, BranchWorkspace, Git2Workspace};

#[cfg(test)]
pub use workspace::MockBranchWorkspace;

/// Runs one backport job.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Performs the backport for the current execution context.
    ///
    /// # Errors
    ///
    /// Returns the first unrecoverable [`BackportError`], or
    /// [`BackportError::BackportFailed`] when any target failed.
    async fn run(&self) -> Result<(), BackportError>;
}
