//! Header sanitization at the gateway boundary.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers from forwarded requests and relayed responses
//! - Drop the inbound `Host` so the client derives it from the target URL
//! - Leave every other header (auth, cookies, content type) untouched
//!
//! # Design Decisions
//! - `HeaderMap` keys are normalized names, so lookups are case-insensitive
//!   while values and repeated entries are carried over as received
//! - The same hop-by-hop list applies in both directions

use axum::http::header::{self, HeaderMap, HeaderName};

/// Headers that only make sense for a single connection.
pub const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Returns true if `name` is on the hop-by-hop list, in any letter case.
pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP
        .iter()
        .any(|h| h.as_str().eq_ignore_ascii_case(name))
}

/// Headers for the outbound request: inbound minus hop-by-hop minus `host`.
///
/// `content-length` is also left out: the outbound body is buffered, and the
/// client computes the length from the bytes it actually sends.
pub fn outbound_request_headers(inbound: &HeaderMap) -> HeaderMap {
    filter(inbound, |name| {
        name == header::HOST || name == header::CONTENT_LENGTH
    })
}

/// Headers for the relayed response: upstream minus hop-by-hop.
pub fn relayed_response_headers(upstream: &HeaderMap) -> HeaderMap {
    filter(upstream, |_| false)
}

fn filter(source: &HeaderMap, also_drop: impl Fn(&HeaderName) -> bool) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(source.len());
    for (name, value) in source {
        if is_hop_by_hop(name.as_str()) || also_drop(name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}
