//! Relayed response model.
//!
//! # Responsibilities
//! - Hold the upstream answer after header sanitization
//! - Convert it into an axum response without touching the body
//!
//! # Design Decisions
//! - Bodies are fully buffered: a relay either completes or becomes a 500,
//!   never a truncated response
//! - Status codes pass through untouched, 3xx and 5xx included

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

/// The gateway's answer to a successfully relayed request.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
