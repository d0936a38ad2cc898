//! Timeout enforcement for upstream calls.
//!
//! # Responsibilities
//! - Build the shared upstream client with connect and total deadlines
//! - Disable redirect following so 3xx answers reach the caller
//!
//! # Design Decisions
//! - Every upstream call has a deadline; expiry is a relay failure (500)
//! - No retries: a failed call is reported once
//! - Dropping the request future aborts the call, so a caller that
//!   disconnects cancels its upstream exchange

use std::time::Duration;

use reqwest::{redirect, Client};

use crate::config::TimeoutConfig;

/// Build the upstream HTTP client from timeout settings.
pub fn upstream_client(config: &TimeoutConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_secs))
        .timeout(Duration::from_secs(config.upstream_secs))
        .redirect(redirect::Policy::none())
        .no_proxy()
        .build()
}
