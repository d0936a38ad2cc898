//! Login relay.
//!
//! A narrow forwarder: one local POST route, one fixed upstream path. Only
//! the content type travels with the text body, and only the content type
//! comes back with the upstream's answer.

use axum::body::Bytes;
use axum::http::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;

use crate::error::GatewayError;
use crate::http::response::GatewayResponse;
use crate::routing::UpstreamBase;

const FALLBACK_RESPONSE_TYPE: HeaderValue = HeaderValue::from_static("text/plain");

#[derive(Debug, Clone)]
pub struct AuthRelay {
    client: Client,
    upstream: Option<UpstreamBase>,
    target_path: String,
    default_content_type: HeaderValue,
}

impl AuthRelay {
    pub fn new(
        client: Client,
        upstream: Option<UpstreamBase>,
        target_path: impl Into<String>,
        default_content_type: HeaderValue,
    ) -> Self {
        Self {
            client,
            upstream,
            target_path: target_path.into(),
            default_content_type,
        }
    }

    /// Build the login request without sending it.
    pub fn build_outbound(&self, headers: &HeaderMap, body: &[u8]) -> Result<reqwest::Request, GatewayError> {
        let base = self.upstream.as_ref().ok_or(GatewayError::NoUpstream)?;
        let url = base.fixed(&self.target_path).url();

        let content_type = headers
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| self.default_content_type.clone());
        let text = String::from_utf8_lossy(body).into_owned();

        self.client
            .post(&url)
            .header(header::CONTENT_TYPE, content_type)
            .body(text)
            .build()
            .map_err(|source| GatewayError::Upstream { url, source })
    }

    /// Post the caller's body to the login endpoint and relay the answer.
    pub async fn relay(&self, headers: &HeaderMap, body: Bytes) -> Result<GatewayResponse, GatewayError> {
        let request = self.build_outbound(headers, &body)?;
        let url = request.url().to_string();

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| GatewayError::Upstream { url: url.clone(), source })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or(FALLBACK_RESPONSE_TYPE);
        // Raw bytes, so the body still matches the charset its content type declares.
        let body = response
            .bytes()
            .await
            .map_err(|source| GatewayError::Upstream { url, source })?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, content_type);
        Ok(GatewayResponse {
            status,
            headers,
            body,
        })
    }
}
