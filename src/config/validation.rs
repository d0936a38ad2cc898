//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Validate addresses and upstream URLs
//! - Validate route shapes (prefix and paths)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::routing::target::UpstreamBase;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid upstream URL in {field}: {reason}")]
    InvalidUpstream { field: &'static str, reason: String },

    #[error("{field} must start with '/' (got '{value}')")]
    PathNotAbsolute { field: &'static str, value: String },

    #[error("routes.prefix must not end with '/' (got '{0}')")]
    TrailingSlashPrefix(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for (field, url) in [
        ("upstream.base_url", &config.upstream.base_url),
        ("upstream.fallback_url", &config.upstream.fallback_url),
    ] {
        if let Some(url) = url {
            if let Err(e) = UpstreamBase::parse(url) {
                errors.push(ValidationError::InvalidUpstream {
                    field,
                    reason: e.to_string(),
                });
            }
        }
    }

    let routes = &config.routes;
    for (field, value) in [
        ("routes.prefix", &routes.prefix),
        ("routes.auth_path", &routes.auth_path),
        ("routes.auth_target", &routes.auth_target),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::PathNotAbsolute {
                field,
                value: value.clone(),
            });
        }
    }
    if routes.prefix.ends_with('/') {
        errors.push(ValidationError::TrailingSlashPrefix(routes.prefix.clone()));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.upstream_secs"));
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero("limits.max_body_size"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
