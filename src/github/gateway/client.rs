//! Octocrab client construction for the gateway.

use http::Uri;
use octocrab::Octocrab;
use url::Url;

use crate::github::error::BackportError;
use crate::github::identity::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `BackportError::InvalidUrl` when the base URI cannot be parsed or
/// `BackportError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &Url,
) -> Result<Octocrab, BackportError> {
    let base_uri: Uri = api_base
        .as_str()
        .parse::<Uri>()
        .map_err(|error| BackportError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| BackportError::Api {
            status: None,
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Parses a REST route into a URI relative to the client's base.
pub(super) fn parse_route(route: &str) -> Result<Uri, BackportError> {
    route
        .parse::<Uri>()
        .map_err(|error| BackportError::InvalidUrl(format!("{route}: {error}")))
}
