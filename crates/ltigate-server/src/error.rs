//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ltigate_core::SignError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No launch session exists for this request.
    #[error("No launch session")]
    SessionNotFound,

    /// The stored launch context lacks a parameter this flow requires.
    #[error("Missing launch parameter: {0}")]
    MissingParameter(&'static str),

    /// Signing the content-item return failed.
    #[error(transparent)]
    Sign(#[from] SignError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::SessionNotFound => (
                StatusCode::NOT_FOUND,
                json!({"error": "No launch session"}),
            ),
            Self::MissingParameter(name) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Missing launch parameter", "parameter": name}),
            ),
            // A trust/configuration failure, distinct from bad input
            Self::Sign(SignError::UnknownConsumer(key)) => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Unknown consumer key", "consumer_key": key}),
            ),
            Self::Sign(err) => {
                tracing::error!(error = %err, "content-item signing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Signing failed"}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_not_found_is_404() {
        let response = ServerError::SessionNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_consumer_is_401() {
        let response =
            ServerError::Sign(SignError::UnknownConsumer("key".to_owned())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_missing_parameter_is_400() {
        let response = ServerError::MissingParameter("oauth_consumer_key").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
