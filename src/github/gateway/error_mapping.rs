//! Error mapping helpers for the Octocrab gateway.

use http::StatusCode;

use crate::github::error::BackportError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Maps an Octocrab failure, keeping the HTTP status when GitHub sent one.
pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> BackportError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(operation, source.status_code, Some(source.message.clone()));
    }

    if is_network_error(error) {
        return BackportError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    BackportError::Api {
        status: None,
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-success raw response onto an error.
pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> BackportError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        BackportError::Authentication {
            status,
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else {
        BackportError::Api {
            status: Some(status),
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}
