//! Tests for [`ActionContext`] construction and number resolution.

use std::io::Write;

use camino::Utf8Path;
use rstest::rstest;
use serde_json::{Value, json};

use crate::github::{ActionContext, BackportError, PullRequestNumber, RepositoryIdentifier};

fn context_with(payload: Value) -> ActionContext {
    let repo = RepositoryIdentifier::new("octo", "repo").expect("repository should be valid");
    ActionContext::new(repo, payload).expect("context should build")
}

fn number(value: u64) -> PullRequestNumber {
    PullRequestNumber::new(value).expect("number should be valid")
}

#[rstest]
fn pull_number_prefers_embedded_pull_request() {
    let context = context_with(json!({
        "pull_request": { "number": 12 },
        "issue": { "number": 99 }
    }));

    assert_eq!(context.pull_number().expect("pull number"), number(12));
}

#[rstest]
fn pull_number_falls_back_to_issue_number() {
    let context = context_with(json!({
        "action": "created",
        "issue": { "number": 7, "pull_request": { "url": "https://api.github.com/..." } },
        "comment": { "body": "/backport" }
    }));

    assert_eq!(context.pull_number().expect("pull number"), number(7));
}

#[rstest]
fn issue_number_uses_top_level_number_last() {
    let context = context_with(json!({ "number": 3 }));

    assert_eq!(context.issue_number().expect("issue number"), number(3));
}

#[rstest]
fn pull_number_fails_without_any_number() {
    let context = context_with(json!({ "ref": "refs/heads/main" }));

    let result = context.pull_number();

    assert!(
        matches!(result, Err(BackportError::Context { .. })),
        "expected Context error, got {result:?}"
    );
}

#[rstest]
fn repository_identifier_is_stable() {
    let context = context_with(json!({}));

    assert_eq!(context.repo(), context.repo());
    assert_eq!(context.repo().owner(), "octo");
    assert_eq!(context.repo().repo(), "repo");
}

#[rstest]
fn defaults_to_public_api() {
    let context = context_with(json!({}));

    assert_eq!(context.api_url().as_str(), "https://api.github.com/");
}

#[rstest]
fn from_parts_reads_event_payload_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
    write!(file, r#"{{ "pull_request": {{ "number": 31 }} }}"#).expect("payload should write");
    let event_path = Utf8Path::from_path(file.path()).expect("temp path should be UTF-8");

    let context = ActionContext::from_parts(
        "octo/repo",
        Some(event_path),
        Some("https://ghe.example.com/api/v3"),
    )
    .expect("context should load");

    assert_eq!(context.pull_number().expect("pull number"), number(31));
    assert_eq!(
        context.api_url().as_str(),
        "https://ghe.example.com/api/v3"
    );
}

#[rstest]
fn from_parts_tolerates_missing_event_file() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let missing = dir.path().join("event.json");
    let event_path = Utf8Path::from_path(&missing).expect("temp path should be UTF-8");

    let context = ActionContext::from_parts("octo/repo", Some(event_path), None)
        .expect("context should load");

    assert_eq!(context.payload(), &json!({}));
}

#[rstest]
fn from_parts_rejects_malformed_payload() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
    write!(file, "not json").expect("payload should write");
    let event_path = Utf8Path::from_path(file.path()).expect("temp path should be UTF-8");

    let result = ActionContext::from_parts("octo/repo", Some(event_path), None);

    assert!(
        matches!(result, Err(BackportError::Context { .. })),
        "expected Context error, got {result:?}"
    );
}

#[rstest]
#[case::missing_slash("octo")]
#[case::extra_segment("octo/repo/extra")]
#[case::blank_owner("/repo")]
fn from_parts_rejects_malformed_repository(#[case] slug: &str) {
    let result = ActionContext::from_parts(slug, None, None);

    assert!(
        matches!(result, Err(BackportError::Context { .. })),
        "expected Context error for {slug}, got {result:?}"
    );
}
