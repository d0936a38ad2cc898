//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers produce:
//!     → logging.rs (structured log events, request ID in fields)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
