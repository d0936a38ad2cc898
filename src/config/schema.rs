//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where forwarded requests go.
    pub upstream: UpstreamConfig,

    /// Local route layout.
    pub routes: RoutesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream API configuration.
///
/// The base URL is resolved once at startup, see
/// [`resolve_upstream`](crate::config::loader::resolve_upstream).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API (e.g., "https://api.example.com").
    pub base_url: Option<String>,

    /// Last-resort base URL used when nothing else is configured.
    pub fallback_url: Option<String>,

    /// Environment variable consulted before `base_url`.
    pub env_var: String,

    /// Refuse to start when no base URL can be resolved.
    pub required: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            fallback_url: None,
            env_var: "GATEWAY_UPSTREAM_URL".to_string(),
            required: true,
        }
    }
}

/// Local route layout for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path prefix stripped from every forwarded request.
    pub prefix: String,

    /// Auth relay route, relative to `prefix`.
    pub auth_path: String,

    /// Fixed upstream path the auth relay posts to.
    pub auth_target: String,

    /// Content type sent upstream when the caller supplies none.
    pub auth_default_content_type: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            prefix: "/proxy".to_string(),
            auth_path: "/auth".to_string(),
            auth_target: "/api/v1/plasmida/auth/login".to_string(),
            auth_default_content_type: "application/json".to_string(),
        }
    }
}

impl RoutesConfig {
    /// Full local path of the auth relay route.
    pub fn auth_route(&self) -> String {
        format!("{}{}", self.prefix, self.auth_path)
    }

    /// Wildcard route pattern for general forwarding.
    pub fn forward_route(&self) -> String {
        format!("{}/{{*rest}}", self.prefix)
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time for the upstream exchange, body included, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 25 * 1024 * 1024, // 25MB, fits document uploads
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
