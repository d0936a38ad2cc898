//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route dispatch)
//!     → request.rs (capture method/path/query/headers, bounded body read)
//!     → forward.rs or auth.rs (build outbound request, call upstream)
//!     → response.rs (sanitized upstream answer)
//!     → Send to client
//! ```

pub mod auth;
pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use auth::AuthRelay;
pub use forward::Forwarder;
pub use request::{InboundRequest, X_REQUEST_ID};
pub use response::GatewayResponse;
pub use server::{AppState, HttpServer, ServerError};
