//! Unit tests for input loading, precedence, and parsing.

use std::ffi::OsString;

use ortho_config::{MergeComposer, OrthoConfig};
use rstest::rstest;
use serde_json::{Value, json};
use tempfile::TempDir;

use super::{
    BackportConfig, DEFAULT_LABEL_PATTERN, DEFAULT_PULL_DESCRIPTION, DEFAULT_PULL_TITLE,
    parse_branch_list,
};
use crate::github::error::BackportError;

/// Applies a configuration layer to the composer based on the layer type.
fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"label_pattern": "default"})), ("file", json!({"label_pattern": "file"}))],
    "label_pattern",
    "file",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"github_token": "file-token"})), ("environment", json!({"github_token": "env-token"}))],
    "github_token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"label_pattern": "env"})), ("cli", json!({"label_pattern": "cli"}))],
    "label_pattern",
    "cli",
    "CLI should override environment"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }

    let config =
        BackportConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    let actual = match field {
        "label_pattern" => config.label_pattern.as_deref(),
        "github_token" => config.github_token.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn defaults_supply_patterns_and_templates() {
    let config = BackportConfig::default();

    assert_eq!(config.label_pattern.as_deref(), Some(DEFAULT_LABEL_PATTERN));
    assert!(config.github_token.is_none(), "token has no default");
    assert!(config.github_workspace.is_none(), "workspace has no default");
    assert!(config.backport_branches().is_empty(), "no explicit branches");
}

#[rstest]
#[case::blank_lines("a\n\nb\n", vec!["a", "b"])]
#[case::windows_line_endings("release-1\r\nrelease-2\r\n", vec!["release-1", "release-2"])]
#[case::empty("", vec![])]
#[case::single("stable", vec!["stable"])]
fn parses_branch_lists(#[case] raw: &str, #[case] expected: Vec<&str>) {
    assert_eq!(parse_branch_list(raw), expected);
}

#[rstest]
fn resolve_token_prefers_input() {
    let config = BackportConfig {
        github_token: Some("input-token".to_owned()),
        ..Default::default()
    };

    let token = config.resolve_token().expect("token should resolve");

    assert_eq!(token.value(), "input-token");
}

#[rstest]
fn resolve_token_falls_back_to_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
    let config = BackportConfig::default();

    let token = config.resolve_token().expect("token should resolve");

    assert_eq!(token.value(), "legacy-token");
}

#[rstest]
#[case::unset(None)]
#[case::blank(Some("   "))]
fn resolve_token_names_missing_input(#[case] value: Option<&str>) {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let config = BackportConfig {
        github_token: value.map(ToOwned::to_owned),
        ..Default::default()
    };

    let result = config.resolve_token();

    assert_eq!(
        result.err(),
        Some(BackportError::MissingInput {
            name: "github_token".to_owned()
        })
    );
}

#[rstest]
fn require_workspace_names_missing_input() {
    let config = BackportConfig::default();

    assert_eq!(
        config.require_workspace().err(),
        Some(BackportError::MissingInput {
            name: "github_workspace".to_owned()
        })
    );
}

#[rstest]
fn invalid_pattern_is_reported_with_input_name() {
    let config = BackportConfig {
        branch_pattern: Some("release-(".to_owned()),
        ..Default::default()
    };

    match config.branch_pattern() {
        Err(BackportError::InvalidPattern { name, .. }) => assert_eq!(name, "branch_pattern"),
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}

#[rstest]
fn settings_expose_orchestrator_shape() {
    let config = BackportConfig {
        github_workspace: Some("/tmp/checkout".to_owned()),
        label_pattern: Some("^backport-to-(.+)$".to_owned()),
        branch_pattern: Some("^release-".to_owned()),
        backport_branches: Some("release-1\n\nrelease-2\n".to_owned()),
        pull_description: Some("body".to_owned()),
        pull_title: Some("title".to_owned()),
        ..Default::default()
    };

    let settings = config.settings().expect("settings should build");

    assert_eq!(settings.pwd.as_str(), "/tmp/checkout");
    assert!(settings.labels.pattern.is_match("backport-to-release-1"));
    assert!(settings.branch_pattern.is_match("release-3"));
    assert_eq!(settings.backport_branches, vec!["release-1", "release-2"]);
    assert_eq!(settings.pull.description, "body");
    assert_eq!(settings.pull.title, "title");
}

#[rstest]
fn settings_fail_on_missing_workspace_before_patterns() {
    let config = BackportConfig {
        label_pattern: Some("(".to_owned()),
        ..Default::default()
    };

    assert_eq!(
        config.settings().err(),
        Some(BackportError::MissingInput {
            name: "github_workspace".to_owned()
        })
    );
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  ")]
fn blank_inputs_fall_back_to_defaults(#[case] blank: &str) {
    let config = BackportConfig {
        github_workspace: Some("/tmp/checkout".to_owned()),
        label_pattern: Some(blank.to_owned()),
        pull_description: Some(blank.to_owned()),
        pull_title: Some(blank.to_owned()),
        ..Default::default()
    };

    let settings = config.settings().expect("settings should build");

    assert_eq!(settings.labels.pattern.as_str(), DEFAULT_LABEL_PATTERN);
    assert_eq!(settings.pull.title, DEFAULT_PULL_TITLE);
    assert_eq!(settings.pull.description, DEFAULT_PULL_DESCRIPTION);
}

#[rstest]
fn blank_environment_inputs_keep_defaults() {
    let home = TempDir::new().expect("temp home should be created");
    let home_path = home.path().to_str().expect("temp path should be UTF-8");
    let _guard = env_lock::lock_env([
        ("INPUT_LABEL_PATTERN", Some("")),
        ("INPUT_PULL_DESCRIPTION", Some("")),
        ("INPUT_PULL_TITLE", Some("")),
        ("INPUT_GITHUB_WORKSPACE", Some("/tmp/checkout")),
        ("HOME", Some(home_path)),
        ("XDG_CONFIG_HOME", Some(home_path)),
    ]);

    let config = BackportConfig::load_from_iter(vec![OsString::from("backport")])
        .expect("config should load");
    let settings = config.settings().expect("settings should build");

    assert!(settings.labels.pattern.is_match("backport release-1"));
    assert_eq!(config.pull_title(), DEFAULT_PULL_TITLE);
    assert_eq!(config.pull_description(), DEFAULT_PULL_DESCRIPTION);
}

#[rstest]
#[case::title("pull_title", BackportConfig {
    pull_title: Some("${issue_refs}".to_owned()),
    ..BackportConfig::default()
})]
#[case::description("pull_description", BackportConfig {
    pull_description: Some("Backport of ${pull_number".to_owned()),
    ..BackportConfig::default()
})]
fn settings_reject_broken_templates(#[case] input: &str, #[case] inputs: BackportConfig) {
    let config = BackportConfig {
        github_workspace: Some("/tmp/checkout".to_owned()),
        ..inputs
    };

    match config.settings() {
        Err(BackportError::Template { message }) => {
            assert!(message.starts_with(input), "{message}");
        }
        other => panic!("expected Template error, got {other:?}"),
    }
}
