//! Backport action entrypoint.

use std::process::ExitCode;

use backport::telemetry::init_tracing;
use backport::{BackportConfig, BackportError, action};
use ortho_config::OrthoConfig;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(Level::INFO);
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BackportError> {
    let config = load_config()?;
    action::run(&config).await
}

/// Loads the action inputs from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`BackportError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<BackportConfig, BackportError> {
    BackportConfig::load().map_err(|error| BackportError::Configuration {
        message: error.to_string(),
    })
}
