//! Target branch resolution.

use regex::Regex;

use super::settings::BackportSettings;

/// Collects the branches a pull request should be backported to.
///
/// Label-derived targets come first, in label order, followed by the
/// explicit branch list. Duplicates and empty names are dropped, and every
/// target must match the branch pattern.
#[must_use]
pub fn resolve_targets(labels: &[String], settings: &BackportSettings) -> Vec<String> {
    let from_labels = labels
        .iter()
        .filter_map(|label| target_from_label(&settings.labels.pattern, label));
    let explicit = settings.backport_branches.iter().cloned();

    let mut targets: Vec<String> = Vec::new();
    for candidate in from_labels.chain(explicit) {
        if candidate.is_empty() || targets.contains(&candidate) {
            continue;
        }
        if !settings.branch_pattern.is_match(&candidate) {
            tracing::info!("Skipping target '{candidate}': does not match branch pattern");
            continue;
        }
        targets.push(candidate);
    }
    targets
}

fn target_from_label(pattern: &Regex, label: &str) -> Option<String> {
    let captures = pattern.captures(label)?;
    captures
        .get(1)
        .or_else(|| captures.get(0))
        .map(|found| found.as_str().trim().to_owned())
}
