//! Octocrab implementation of the platform gateway.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::Octocrab;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::github::context::ActionContext;
use crate::github::error::BackportError;
use crate::github::identity::{PersonalAccessToken, PullRequestNumber, RepositoryIdentifier};
use crate::github::merge_status::interpret_merge_check;
use crate::github::models::{
    ApiComment, ApiPullRequest, CommentRequest, CreatedComment, CreatedPullRequest, PullRequest,
    PullRequestRequest, RequestReviewersResponse, ReviewRequest,
};

use super::PlatformGateway;
use super::client::{build_octocrab_client, parse_route};
use super::error_mapping::{map_http_error, map_octocrab_error};
use super::http_utils::extract_github_message;

/// Octocrab-backed gateway bound to one token and one execution context.
pub struct OctocrabGateway {
    client: Octocrab,
    context: ActionContext,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client and a context.
    #[must_use]
    pub const fn new(client: Octocrab, context: ActionContext) -> Self {
        Self { client, context }
    }

    /// Builds an authenticated client against the context's API endpoint.
    ///
    /// # Errors
    ///
    /// Returns `BackportError::InvalidUrl` when the API URL cannot be used as
    /// a base URI or `BackportError::Api` when Octocrab fails to construct a
    /// client.
    pub fn for_token(
        token: &PersonalAccessToken,
        context: ActionContext,
    ) -> Result<Self, BackportError> {
        let client = build_octocrab_client(token, context.api_url())?;
        Ok(Self::new(client, context))
    }

    async fn post_json<Body, Response>(
        &self,
        operation: &str,
        route: &str,
        body: &Body,
    ) -> Result<(StatusCode, Response), BackportError>
    where
        Body: Serialize + Sync + ?Sized,
        Response: DeserializeOwned,
    {
        let uri = parse_route(route)?;
        let response = self
            .client
            ._post(uri, Some(body))
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        let status = response.status();
        let text = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| BackportError::Api {
                status: Some(status),
                message: format!("{operation} response decode failed: {error}"),
            })?;

        if !status.is_success() {
            return Err(map_http_error(
                operation,
                status,
                extract_github_message(&text),
            ));
        }

        let parsed = serde_json::from_str(&text).map_err(|error| BackportError::Api {
            status: Some(status),
            message: format!("{operation} response deserialisation failed: {error}"),
        })?;
        Ok((status, parsed))
    }

    async fn merge_check_status(
        &self,
        number: PullRequestNumber,
    ) -> Result<StatusCode, BackportError> {
        let uri = parse_route(&self.context.repo().merge_path(number))?;
        self.client
            ._get(uri)
            .await
            .map(|response| response.status())
            .map_err(|error| map_octocrab_error("merge status", &error))
    }
}

#[async_trait]
impl PlatformGateway for OctocrabGateway {
    fn repo(&self) -> RepositoryIdentifier {
        self.context.repo().clone()
    }

    fn payload(&self) -> Value {
        self.context.payload().clone()
    }

    fn pull_number(&self) -> Result<PullRequestNumber, BackportError> {
        self.context.pull_number()
    }

    async fn create_comment(
        &self,
        comment: &CommentRequest,
    ) -> Result<CreatedComment, BackportError> {
        tracing::info!("Create comment: {}", comment.body);
        let (status, api) = self
            .post_json::<_, ApiComment>("create comment", &comment.path(), &comment.payload())
            .await?;
        Ok(CreatedComment::from_api(status, api))
    }

    async fn pull_request(&self, number: PullRequestNumber) -> Result<PullRequest, BackportError> {
        tracing::info!("Retrieve pull request data for #{number}");
        let api = self
            .client
            .get::<ApiPullRequest, _, _>(
                self.context.repo().pull_request_path(number),
                None::<&()>,
            )
            .await
            .map_err(|error| map_octocrab_error("pull request", &error))?;
        PullRequest::try_from(api)
    }

    async fn is_merged(&self, pull: &PullRequest) -> Result<bool, BackportError> {
        tracing::info!("Check whether pull request {} is merged", pull.number);
        let outcome = self.merge_check_status(pull.number).await;
        interpret_merge_check(outcome).map(|status| status.is_merged())
    }

    async fn create_pull_request(
        &self,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest, BackportError> {
        tracing::info!("Create PR: {}", request.body);
        let (status, api) = self
            .post_json::<_, ApiPullRequest>(
                "create pull request",
                &request.path(),
                &request.payload(),
            )
            .await?;
        CreatedPullRequest::from_api(status, api)
    }

    async fn request_reviewers(
        &self,
        request: &ReviewRequest,
    ) -> Result<RequestReviewersResponse, BackportError> {
        tracing::info!("Request reviewers: {}", request.reviewers.join(","));
        let (status, api) = self
            .post_json::<_, ApiPullRequest>(
                "request reviewers",
                &request.path(),
                &request.payload(),
            )
            .await?;
        CreatedPullRequest::from_api(status, api)
    }
}
