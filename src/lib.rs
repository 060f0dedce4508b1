//! GitHub backport action library.
//!
//! The library wraps Octocrab behind a narrow gateway that reads the
//! triggering event, fetches pull requests, checks merge status, opens pull
//! requests, requests reviewers, and posts comments. The backport module
//! drives those calls together with a git2 workspace to cherry-pick merged
//! changes onto release branches.

pub mod action;
pub mod backport;
pub mod config;
pub mod github;
pub mod telemetry;

pub use backport::{Backport, BackportSettings, BranchWorkspace, Git2Workspace, Orchestrator};
pub use config::BackportConfig;
pub use github::{
    ActionContext, BackportError, OctocrabGateway, PersonalAccessToken, PlatformGateway,
    PullRequestNumber, RepositoryIdentifier,
};
