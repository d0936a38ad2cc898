//! General request forwarding.
//!
//! # Responsibilities
//! - Build the outbound request: target URL, sanitized headers, body policy
//! - Issue it once against the upstream
//! - Buffer and sanitize the upstream answer
//!
//! # Design Decisions
//! - Method-agnostic and payload-agnostic: bodies are opaque bytes
//! - Any upstream status is a successful relay
//! - A missing upstream fails before any network activity

use reqwest::Client;

use crate::error::GatewayError;
use crate::http::request::{is_bodyless, InboundRequest};
use crate::http::response::GatewayResponse;
use crate::routing::{TargetDescriptor, UpstreamBase};
use crate::security::headers::{outbound_request_headers, relayed_response_headers};

/// Relays arbitrary requests under a local prefix to the upstream.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    upstream: Option<UpstreamBase>,
    prefix: String,
}

impl Forwarder {
    pub fn new(client: Client, upstream: Option<UpstreamBase>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            upstream,
            prefix: prefix.into(),
        }
    }

    /// Compute where `inbound` should go.
    pub fn target(&self, inbound: &InboundRequest) -> Result<TargetDescriptor, GatewayError> {
        let base = self.upstream.as_ref().ok_or(GatewayError::NoUpstream)?;
        Ok(TargetDescriptor::rewrite(
            base,
            &self.prefix,
            &inbound.path,
            inbound.query.as_deref(),
        ))
    }

    /// Build the outbound request without sending it.
    pub fn build_outbound(&self, inbound: InboundRequest) -> Result<reqwest::Request, GatewayError> {
        let url = self.target(&inbound)?.url();

        let mut builder = self
            .client
            .request(inbound.method.clone(), &url)
            .headers(outbound_request_headers(&inbound.headers));
        if let Some(body) = inbound.body.filter(|_| !is_bodyless(&inbound.method)) {
            builder = builder.body(body);
        }

        builder
            .build()
            .map_err(|source| GatewayError::Upstream { url, source })
    }

    /// Relay `inbound` and return the upstream's answer.
    pub async fn forward(&self, inbound: InboundRequest) -> Result<GatewayResponse, GatewayError> {
        let request = self.build_outbound(inbound)?;
        let url = request.url().to_string();
        tracing::debug!(method = %request.method(), url = %url, "Forwarding upstream");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| GatewayError::Upstream { url: url.clone(), source })?;

        let status = response.status();
        let headers = relayed_response_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|source| GatewayError::Upstream { url, source })?;

        Ok(GatewayResponse { status, headers, body })
    }
}
