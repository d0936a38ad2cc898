//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding and auth relay handlers
//! - Wire up middleware (tracing)
//! - Bind server to listener, stop on shutdown signal
//! - Turn relay outcomes into responses, logs and metrics

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, AUTH_FAILURE_MESSAGE};
use crate::http::auth::AuthRelay;
use crate::http::forward::Forwarder;
use crate::http::request::{request_id, InboundRequest};
use crate::http::response::GatewayResponse;
use crate::observability::metrics;
use crate::resilience::upstream_client;
use crate::routing::UpstreamBase;
use crate::security::limits::read_body;

const FORWARD_ROUTE: &str = "forward";
const AUTH_ROUTE: &str = "auth";

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid routes.auth_default_content_type: {0}")]
    ContentType(#[from] axum::http::header::InvalidHeaderValue),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub auth: Arc<AuthRelay>,
    pub body_limit: usize,
}

/// HTTP server for the forwarding gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    upstream: Option<UpstreamBase>,
}

impl HttpServer {
    /// Create a new HTTP server. `upstream` is the resolved base URL; `None`
    /// makes every relay fail with the gateway's own error.
    pub fn new(config: GatewayConfig, upstream: Option<UpstreamBase>) -> Result<Self, ServerError> {
        let client = upstream_client(&config.timeouts)?;
        let default_content_type = HeaderValue::from_str(&config.routes.auth_default_content_type)?;

        let state = AppState {
            forwarder: Arc::new(Forwarder::new(
                client.clone(),
                upstream.clone(),
                config.routes.prefix.clone(),
            )),
            auth: Arc::new(AuthRelay::new(
                client,
                upstream.clone(),
                config.routes.auth_target.clone(),
                default_content_type,
            )),
            body_limit: config.limits.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            upstream,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.routes.auth_route(), post(auth_handler))
            .route(
                &config.routes.forward_route(),
                get(forward_handler)
                    .post(forward_handler)
                    .put(forward_handler)
                    .patch(forward_handler)
                    .delete(forward_handler),
            )
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The routed service, for driving the gateway without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.routes.prefix,
            upstream = %self.upstream.as_ref().map_or("<none>", UpstreamBase::as_str),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Relay any supported method under the prefix to the upstream.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers());

    tracing::debug!(request_id = %request_id, method = %method, path = %path, "Proxying request");

    let response = match forward(&state, request).await {
        Ok(relayed) => {
            tracing::debug!(request_id = %request_id, status = %relayed.status, "Upstream answered");
            relayed.into_response()
        }
        Err(e) => {
            log_failure(&request_id, &path, &e);
            metrics::record_upstream_error(FORWARD_ROUTE);
            e.into_response()
        }
    };

    metrics::record_request(FORWARD_ROUTE, method.as_str(), response.status().as_u16(), start);
    response
}

async fn forward(state: &AppState, request: Request<Body>) -> Result<GatewayResponse, GatewayError> {
    let inbound = InboundRequest::from_request(request, state.body_limit).await?;
    state.forwarder.forward(inbound).await
}

/// Relay a login attempt to the fixed upstream endpoint.
async fn auth_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(request.headers());
    let path = request.uri().path().to_string();

    let (parts, body) = request.into_parts();
    let result = match read_body(body, state.body_limit).await {
        Ok(bytes) => state.auth.relay(&parts.headers, bytes).await,
        Err(e) => Err(e),
    };

    let response = match result {
        Ok(relayed) => relayed.into_response(),
        Err(e) => {
            log_failure(&request_id, &path, &e);
            metrics::record_upstream_error(AUTH_ROUTE);
            e.into_response_with(AUTH_FAILURE_MESSAGE)
        }
    };

    metrics::record_request(AUTH_ROUTE, "POST", response.status().as_u16(), start);
    response
}

fn log_failure(request_id: &str, path: &str, error: &GatewayError) {
    match error {
        GatewayError::BodyTooLarge { .. } => {
            tracing::warn!(request_id = %request_id, path = %path, error = %error, "Rejected request body");
        }
        _ => {
            tracing::error!(
                request_id = %request_id,
                path = %path,
                timeout = error.is_timeout(),
                error = %error,
                "Proxy error"
            );
        }
    }
}
