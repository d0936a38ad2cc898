//! Forwarding gateway library.
//!
//! Relays browser requests under a local prefix to a configured upstream
//! API, with hop-by-hop header hygiene, verbatim bodies and a JSON error
//! for relays that cannot be completed.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod security;

pub use config::schema::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::UpstreamBase;
