//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!
//! CLI flag / environment / config file
//!     → loader.rs resolve_upstream()
//!     → UpstreamBase injected into the forwarder at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_upstream, ConfigError};
pub use schema::{
    GatewayConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, RoutesConfig,
    TimeoutConfig, UpstreamConfig,
};
