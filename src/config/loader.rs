//! Configuration loading from disk and upstream resolution.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::target::{TargetError, UpstreamBase};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("invalid upstream URL from {source_name}: {error}")]
    Upstream {
        source_name: String,
        error: TargetError,
    },

    #[error("no upstream base URL configured (set {0}, upstream.base_url or upstream.fallback_url)")]
    MissingUpstream(String),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the upstream base URL.
///
/// Order: explicit override, the environment variable named by
/// `upstream.env_var`, `upstream.base_url`, `upstream.fallback_url`.
/// Empty values are skipped. Returns `Ok(None)` only when nothing is
/// configured and `upstream.required` is false.
pub fn resolve_upstream<F>(
    config: &GatewayConfig,
    cli_override: Option<&str>,
    env: F,
) -> Result<Option<UpstreamBase>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let upstream = &config.upstream;
    let candidates = [
        ("--upstream".to_string(), cli_override.map(str::to_string)),
        (upstream.env_var.clone(), env(&upstream.env_var)),
        ("upstream.base_url".to_string(), upstream.base_url.clone()),
        ("upstream.fallback_url".to_string(), upstream.fallback_url.clone()),
    ];

    for (source_name, value) in candidates {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        let base = UpstreamBase::parse(value.trim())
            .map_err(|error| ConfigError::Upstream { source_name: source_name.clone(), error })?;
        tracing::debug!(source = %source_name, upstream = %base, "Upstream resolved");
        return Ok(Some(base));
    }

    if upstream.required {
        return Err(ConfigError::MissingUpstream(upstream.env_var.clone()));
    }
    tracing::warn!("No upstream configured; forwarded requests will fail");
    Ok(None)
}
