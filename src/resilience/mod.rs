//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (connect/total deadline, no redirects)
//!     → On failure: single 500 JSON error, cause logged
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No automatic retries or redirects; the caller decides what to re-request

pub mod timeouts;

pub use timeouts::upstream_client;
