//! Inbound request capture.
//!
//! # Responsibilities
//! - Take apart the axum request into the gateway's request-scoped model
//! - Buffer the body (bounded) only for methods that carry one
//! - Derive a request ID for log correlation
//!
//! # Design Decisions
//! - Path and query are kept as raw strings from the request line
//! - GET/HEAD bodies are never read, let alone forwarded
//! - The request ID is only logged; it is not added to any relayed headers

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request};
use uuid::Uuid;

use crate::error::GatewayError;
use crate::security::limits::read_body;

/// Header a caller may use to supply its own correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// A request as received by the gateway.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl InboundRequest {
    /// Capture an axum request, reading at most `body_limit` bytes of body.
    pub async fn from_request(request: Request<Body>, body_limit: usize) -> Result<Self, GatewayError> {
        let (parts, body) = request.into_parts();
        let body = if is_bodyless(&parts.method) {
            None
        } else {
            Some(read_body(body, body_limit).await?)
        };

        Ok(Self {
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            method: parts.method,
            headers: parts.headers,
            body,
        })
    }

    /// Correlation ID: the caller's `x-request-id`, or a fresh UUID.
    pub fn request_id(&self) -> String {
        request_id(&self.headers)
    }
}

/// GET and HEAD never carry a body through the gateway.
pub fn is_bodyless(method: &Method) -> bool {
    method == Method::GET || method == Method::HEAD
}

pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
