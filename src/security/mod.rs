//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (bounded body read)
//!     → headers.rs (strip hop-by-hop, drop Host)
//!     → Pass to forwarder
//!
//! Upstream response:
//!     → headers.rs (strip hop-by-hop)
//!     → Pass to client
//! ```
//!
//! # Design Decisions
//! - No trust in connection-level headers from either side
//! - Authentication headers are relayed, never interpreted

pub mod headers;
pub mod limits;
