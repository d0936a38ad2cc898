//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → axum router ({prefix}/{*rest} or {prefix}/auth)
//!     → target.rs (strip prefix, join with upstream base)
//!     → Return: TargetDescriptor for the outbound call
//! ```
//!
//! # Design Decisions
//! - Upstream base validated at startup, immutable at runtime
//! - Unsupported methods never reach the forwarder (405 from axum)
//! - Deterministic: same input always yields the same target URL

pub mod target;

pub use target::{strip_prefix, TargetDescriptor, TargetError, UpstreamBase};
