//! Target URL construction.
//!
//! # Responsibilities
//! - Validate the upstream base URL once, at startup
//! - Strip the local gateway prefix from inbound paths
//! - Join base, forward path and query into the outbound URL
//!
//! # Design Decisions
//! - Path and query are copied verbatim; existing percent-encoding survives
//! - The prefix is removed at most once, and only as a leading segment
//! - An empty query produces no `?`

use std::fmt;

use thiserror::Error;
use url::Url;

/// Errors produced while validating an upstream base URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("'{url}' is not a valid URL: {reason}")]
    Malformed { url: String, reason: String },

    #[error("'{0}' must use http or https")]
    UnsupportedScheme(String),
}

/// Validated upstream base URL, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBase(String);

impl UpstreamBase {
    /// Parse and normalize a base URL.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let url = Url::parse(raw).map_err(|e| TargetError::Malformed {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(TargetError::UnsupportedScheme(raw.to_string()));
        }
        Ok(Self(raw.trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a target whose path is fixed rather than derived from the inbound path.
    pub fn fixed(&self, path: &str) -> TargetDescriptor {
        TargetDescriptor {
            base: self.clone(),
            forward_path: path.to_string(),
            query: None,
        }
    }
}

impl fmt::Display for UpstreamBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a single forwarded request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub base: UpstreamBase,
    pub forward_path: String,
    pub query: Option<String>,
}

impl TargetDescriptor {
    /// Derive the target for an inbound path under `prefix`.
    pub fn rewrite(base: &UpstreamBase, prefix: &str, path: &str, query: Option<&str>) -> Self {
        Self {
            base: base.clone(),
            forward_path: strip_prefix(prefix, path).to_string(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        }
    }

    /// Full outbound URL: base + forward path + optional query.
    pub fn url(&self) -> String {
        let mut url = String::with_capacity(
            self.base.0.len() + self.forward_path.len() + self.query.as_ref().map_or(0, |q| q.len() + 1),
        );
        url.push_str(&self.base.0);
        url.push_str(&self.forward_path);
        if let Some(query) = &self.query {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

/// Remove `prefix` from the start of `path`, once.
///
/// The prefix only matches on a segment boundary: `/proxy` is stripped from
/// `/proxy/a` and `/proxy`, but `/proxyish/a` is returned unchanged.
pub fn strip_prefix<'a>(prefix: &str, path: &'a str) -> &'a str {
    match path.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> UpstreamBase {
        UpstreamBase::parse(url).unwrap()
    }

    #[test]
    fn rewrites_reports_listing() {
        let target = TargetDescriptor::rewrite(
            &base("https://api.example.com"),
            "/proxy",
            "/proxy/api/v1/reports",
            Some("tag=safety"),
        );
        assert_eq!(target.forward_path, "/api/v1/reports");
        assert_eq!(target.url(), "https://api.example.com/api/v1/reports?tag=safety");
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        let target = TargetDescriptor::rewrite(&base("https://api.example.com/"), "/proxy", "/proxy/staff", None);
        assert_eq!(target.url(), "https://api.example.com/staff");

        let target = TargetDescriptor::rewrite(&base("http://10.0.0.1:9000/base//"), "/proxy", "/proxy/x", None);
        assert_eq!(target.url(), "http://10.0.0.1:9000/base/x");
    }

    #[test]
    fn prefix_removed_exactly_once() {
        assert_eq!(strip_prefix("/proxy", "/proxy/proxy/a"), "/proxy/a");
        assert_eq!(strip_prefix("/proxy", "/proxy"), "");
        assert_eq!(strip_prefix("/proxy", "/proxyish/a"), "/proxyish/a");
        assert_eq!(strip_prefix("/proxy", "/other/proxy/a"), "/other/proxy/a");
    }

    #[test]
    fn empty_query_omits_question_mark() {
        let target = TargetDescriptor::rewrite(&base("https://api.example.com"), "/proxy", "/proxy/a", Some(""));
        assert_eq!(target.url(), "https://api.example.com/a");
    }

    #[test]
    fn encoding_is_preserved_verbatim() {
        let target = TargetDescriptor::rewrite(
            &base("https://api.example.com"),
            "/proxy",
            "/proxy/files/annual%20report%2F2024.pdf",
            Some("q=a%2Bb&name=caf%C3%A9&flag"),
        );
        assert_eq!(
            target.url(),
            "https://api.example.com/files/annual%20report%2F2024.pdf?q=a%2Bb&name=caf%C3%A9&flag"
        );
    }

    #[test]
    fn fixed_target_ignores_inbound_path() {
        let target = base("https://api.example.com/").fixed("/api/v1/plasmida/auth/login");
        assert_eq!(target.url(), "https://api.example.com/api/v1/plasmida/auth/login");
    }

    #[test]
    fn rejects_non_http_bases() {
        assert!(matches!(UpstreamBase::parse("ftp://example.com"), Err(TargetError::UnsupportedScheme(_))));
        assert!(matches!(UpstreamBase::parse("example.com"), Err(TargetError::Malformed { .. })));
    }
}
