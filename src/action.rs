//! Wiring for one action run.

use crate::backport::{Backport, Git2Workspace, Orchestrator};
use crate::config::BackportConfig;
use crate::github::context::ActionContext;
use crate::github::error::BackportError;
use crate::github::gateway::OctocrabGateway;

/// Builds the gateway, workspace, and orchestrator from `config` and the
/// runner environment, then runs the backport.
///
/// Required inputs, patterns, and templates are validated before any request
/// is made.
///
/// # Errors
///
/// Returns [`BackportError::MissingInput`], [`BackportError::InvalidPattern`],
/// or [`BackportError::Template`] for bad inputs, a context error when
/// the runner environment is incomplete, and otherwise whatever the
/// orchestrator reports.
pub async fn run(config: &BackportConfig) -> Result<(), BackportError> {
    let token = config.resolve_token()?;
    let settings = config.settings()?;

    let context = ActionContext::from_env()?;
    tracing::debug!("Running for {} against {}", context.repo(), context.api_url());
    let gateway = OctocrabGateway::for_token(&token, context)?;
    let workspace = Git2Workspace::new(settings.pwd.clone(), token);

    run_with(&Backport::new(gateway, workspace, settings)).await
}

/// Runs any orchestrator to completion.
///
/// # Errors
///
/// Propagates the orchestrator's error.
pub async fn run_with(orchestrator: &dyn Orchestrator) -> Result<(), BackportError> {
    orchestrator.run().await
}
