//! Gateway error types.
//!
//! Every failure to complete a relay ends up here and is rendered as the
//! gateway's own JSON error, `{"message": "..."}`. Upstream answers, whatever
//! their status, are never errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Message returned when a general forward fails.
pub const FORWARD_FAILURE_MESSAGE: &str = "Proxy internal error";

/// Message returned when the auth relay fails.
pub const AUTH_FAILURE_MESSAGE: &str = "Proxy error";

/// Errors that stop a request from being relayed.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No upstream base URL was resolved at startup.
    #[error("no upstream base URL configured")]
    NoUpstream,

    /// The upstream could not be reached, timed out, or dropped the exchange.
    #[error("upstream request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Inbound body exceeded the configured limit.
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Inbound body could not be read.
    #[error("failed to read request body: {0}")]
    InboundBody(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True when the upstream call ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Upstream { source, .. } if source.is_timeout())
    }

    /// Render with a caller-facing message; the cause itself is only logged.
    pub fn into_response_with(self, message: &str) -> Response {
        let status = self.status();
        let message = match self {
            GatewayError::BodyTooLarge { .. } => "Request body too large",
            _ => message,
        };
        error_response(status, message)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.into_response_with(FORWARD_FAILURE_MESSAGE)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

/// JSON error body in the gateway's shape.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { message })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_upstream_is_500_json() {
        let response = GatewayError::NoUpstream.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_json(response).await, serde_json::json!({"message": "Proxy internal error"}));
    }

    #[tokio::test]
    async fn oversize_body_is_413_with_fixed_message() {
        let response = GatewayError::BodyTooLarge { limit: 10 }.into_response_with(AUTH_FAILURE_MESSAGE);
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["message"], "Request body too large");
    }

    #[tokio::test]
    async fn auth_message_used_for_auth_failures() {
        let response = GatewayError::InboundBody("reset".into()).into_response_with(AUTH_FAILURE_MESSAGE);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, serde_json::json!({"message": "Proxy error"}));
    }
}
