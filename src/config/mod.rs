//! Action inputs loaded from CLI, environment, and files.
//!
//! GitHub Actions exposes each `with:` input as an `INPUT_<NAME>` environment
//! variable, so the configuration uses the `INPUT` prefix and the runner's
//! values arrive through ortho-config's environment layer.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in defaults for patterns and templates
//! 2. **Configuration file** – `.backport.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `INPUT_GITHUB_TOKEN`, `INPUT_LABEL_PATTERN`,
//!    and so on; `GITHUB_TOKEN` is a fallback for the token
//! 4. **Command-line arguments** – `--github-token`, `--label-pattern`, ...
//!
//! # Configuration File
//!
//! ```toml
//! github_workspace = "/home/runner/work/repo/repo"
//! label_pattern = "^backport ([^ ]+)$"
//! backport_branches = "release-1\nrelease-2"
//! pull_title = "[Backport ${target_branch}] ${pull_title}"
//! ```

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::backport::{BackportSettings, LabelSettings, PullTemplates, validate_template};
use crate::github::error::BackportError;
use crate::github::identity::PersonalAccessToken;

/// Default pattern selecting labels such as `backport release-1`.
pub const DEFAULT_LABEL_PATTERN: &str = "^backport ([^ ]+)$";

/// Default title template for backport pull requests.
pub const DEFAULT_PULL_TITLE: &str = "[Backport ${target_branch}] ${pull_title}";

/// Default description template for backport pull requests.
pub const DEFAULT_PULL_DESCRIPTION: &str = "Backport of #${pull_number} to `${target_branch}`.";

/// Action inputs supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `INPUT_GITHUB_TOKEN`, `GITHUB_TOKEN`, or `--github-token`: API token
/// - `INPUT_GITHUB_WORKSPACE` or `--github-workspace`: checkout directory
/// - `INPUT_LABEL_PATTERN` or `--label-pattern`: backport label regex
/// - `INPUT_BRANCH_PATTERN` or `--branch-pattern`: target branch regex
/// - `INPUT_BACKPORT_BRANCHES` or `--backport-branches`: newline list
/// - `INPUT_PULL_DESCRIPTION` / `INPUT_PULL_TITLE`: pull request templates
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "INPUT",
    discovery(
        dotfile_name = ".backport.toml",
        config_file_name = "backport.toml",
        app_name = "backport"
    )
)]
pub struct BackportConfig {
    /// Token used for every GitHub API call and for pushing branches.
    #[ortho_config(cli_short = 't')]
    pub github_token: Option<String>,

    /// Directory holding the checked-out repository.
    #[ortho_config(cli_short = 'w')]
    pub github_workspace: Option<String>,

    /// Regular expression selecting backport labels. The first capture
    /// group, or the whole match, names the target branch.
    #[ortho_config(cli_short = 'l')]
    pub label_pattern: Option<String>,

    /// Regular expression every target branch must match.
    #[ortho_config(cli_short = 'b')]
    pub branch_pattern: Option<String>,

    /// Newline-delimited list of branches to always backport to.
    #[ortho_config()]
    pub backport_branches: Option<String>,

    /// Template for the body of each backport pull request.
    #[ortho_config()]
    pub pull_description: Option<String>,

    /// Template for the title of each backport pull request.
    #[ortho_config()]
    pub pull_title: Option<String>,
}

impl Default for BackportConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            github_workspace: None,
            label_pattern: Some(DEFAULT_LABEL_PATTERN.to_owned()),
            branch_pattern: Some(String::new()),
            backport_branches: None,
            pull_description: Some(DEFAULT_PULL_DESCRIPTION.to_owned()),
            pull_title: Some(DEFAULT_PULL_TITLE.to_owned()),
        }
    }
}

impl BackportConfig {
    /// Resolves the token from the inputs or the `GITHUB_TOKEN` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::MissingInput`] naming `github_token` when no
    /// source provides a non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, BackportError> {
        self.github_token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or_else(|| missing("github_token"))
            .and_then(|value| {
                PersonalAccessToken::new(value).map_err(|_| missing("github_token"))
            })
    }

    /// Returns the workspace directory or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::MissingInput`] naming `github_workspace`.
    pub fn require_workspace(&self) -> Result<Utf8PathBuf, BackportError> {
        self.github_workspace
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(Utf8PathBuf::from)
            .ok_or_else(|| missing("github_workspace"))
    }

    /// Compiles the label pattern. A blank input uses the default.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::InvalidPattern`] when the pattern is invalid.
    pub fn label_pattern(&self) -> Result<Regex, BackportError> {
        compile_pattern(
            "label_pattern",
            Some(or_default(self.label_pattern.as_deref(), DEFAULT_LABEL_PATTERN)),
        )
    }

    /// Compiles the branch pattern.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::InvalidPattern`] when the pattern is invalid.
    pub fn branch_pattern(&self) -> Result<Regex, BackportError> {
        compile_pattern("branch_pattern", self.branch_pattern.as_deref())
    }

    /// The title template. A blank input uses the default.
    #[must_use]
    pub fn pull_title(&self) -> &str {
        or_default(self.pull_title.as_deref(), DEFAULT_PULL_TITLE)
    }

    /// The description template. A blank input uses the default.
    #[must_use]
    pub fn pull_description(&self) -> &str {
        or_default(self.pull_description.as_deref(), DEFAULT_PULL_DESCRIPTION)
    }

    /// The explicit target branches, one per line.
    #[must_use]
    pub fn backport_branches(&self) -> Vec<String> {
        parse_branch_list(self.backport_branches.as_deref().unwrap_or_default())
    }

    /// Builds the orchestrator settings from the inputs.
    ///
    /// Required inputs are checked first so a missing value fails before
    /// any pattern is compiled or any request is sent. Both templates are
    /// rendered once with sample values.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError::MissingInput`],
    /// [`BackportError::InvalidPattern`], or [`BackportError::Template`].
    pub fn settings(&self) -> Result<BackportSettings, BackportError> {
        let pwd = self.require_workspace()?;
        validate_template("pull_title", self.pull_title())?;
        validate_template("pull_description", self.pull_description())?;
        Ok(BackportSettings {
            pwd,
            labels: LabelSettings {
                pattern: self.label_pattern()?,
            },
            backport_branches: self.backport_branches(),
            branch_pattern: self.branch_pattern()?,
            pull: PullTemplates {
                description: self.pull_description().to_owned(),
                title: self.pull_title().to_owned(),
            },
        })
    }
}

/// Splits a newline-delimited list, discarding empty entries.
#[must_use]
pub fn parse_branch_list(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn compile_pattern(name: &str, source: Option<&str>) -> Result<Regex, BackportError> {
    Regex::new(source.unwrap_or_default()).map_err(|error| BackportError::InvalidPattern {
        name: name.to_owned(),
        message: error.to_string(),
    })
}

/// GitHub Actions passes a declared but unset input as an empty string.
fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.filter(|raw| !raw.trim().is_empty()).unwrap_or(default)
}

fn missing(name: &str) -> BackportError {
    BackportError::MissingInput {
        name: name.to_owned(),
    }
}

#[cfg(test)]
mod tests;
