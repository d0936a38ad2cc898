//! Request size limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size while buffering the body
//!
//! # Design Decisions
//! - Limit enforced during the read, not after (no unbounded buffering)
//! - Oversize bodies return 413 Payload Too Large, other read failures 500

use axum::body::{Body, Bytes};
use http_body_util::{BodyExt, LengthLimitError, Limited};

use crate::error::GatewayError;

/// Buffer an inbound body, failing once it exceeds `limit` bytes.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, GatewayError> {
    let collected = Limited::new(body, limit).collect().await.map_err(|e| {
        if e.downcast_ref::<LengthLimitError>().is_some() {
            GatewayError::BodyTooLarge { limit }
        } else {
            GatewayError::InboundBody(e.to_string())
        }
    })?;
    Ok(collected.to_bytes())
}
