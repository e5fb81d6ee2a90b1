//! Unified error types for the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Unified error type for the gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Requested page id is not in the registry.
    #[error("Page not found")]
    PageNotFound(String),

    /// Requested river key is not configured under the page.
    #[error("river {river} not found on page {page}")]
    RiverNotFound {
        /// Page id that was searched.
        page: String,
        /// Missing river key.
        river: String,
    },

    /// Static registry data violates an invariant.
    #[error("invalid registry: {0}")]
    Registry(String),

    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Template lookup or rendering error.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl GatewayError {
    /// HTTP status used when this error reaches a handler boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::PageNotFound(_) | Self::RiverNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Failure of a single upstream river fetch.
///
/// Never fails the surrounding request; the display text becomes the
/// river's `error` field.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Upstream answered with a non-200 status.
    #[error("API returned {0}")]
    Status(u16),

    /// Timeout, DNS, connection or protocol failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered 200 with a body that is not JSON.
    #[error("invalid JSON from upstream: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Transport(e) if e.is_timeout() => "timeout",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_matches_wire_format() {
        assert_eq!(FetchError::Status(503).to_string(), "API returned 503");
        assert_eq!(FetchError::Status(404).kind(), "status");
    }

    #[test]
    fn page_not_found_maps_to_404() {
        let err = GatewayError::PageNotFound("nope".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Page not found");
    }

    #[test]
    fn registry_error_maps_to_500() {
        let err = GatewayError::Registry("duplicate page".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn config_error_converts_and_maps_to_500() {
        let err = crate::Config::from_vars(vec![("PORT".to_string(), "not-a-port".to_string())])
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn decode_error_is_labelled() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = FetchError::from(json_err);
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().starts_with("invalid JSON from upstream"));
    }
}
