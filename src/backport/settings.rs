//! Settings the backport orchestrator is constructed with.

use camino::Utf8PathBuf;
use regex::Regex;

/// Label selection rules.
#[derive(Debug, Clone)]
pub struct LabelSettings {
    /// Labels matching this pattern request a backport. The first capture
    /// group, or the whole match when there is none, names the target.
    pub pattern: Regex,
}

/// Templates for the generated pull requests.
///
/// Both support the `${pull_number}`, `${pull_title}`, and
/// `${target_branch}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullTemplates {
    /// Body template.
    pub description: String,
    /// Title template.
    pub title: String,
}

/// Everything the orchestrator needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct BackportSettings {
    /// Checkout of the repository the branches are prepared in.
    pub pwd: Utf8PathBuf,
    /// Label selection rules.
    pub labels: LabelSettings,
    /// Branches to backport to regardless of labels.
    pub backport_branches: Vec<String>,
    /// Pattern every target branch must match.
    pub branch_pattern: Regex,
    /// Pull request templates.
    pub pull: PullTemplates,
}
