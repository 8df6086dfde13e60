//! Short URL construction from the inbound `Host` header.
//!
//! The host a client used to reach the service is the canonical base for the
//! short URLs it receives, so one deployment can serve several hostnames. When
//! the header is missing or is not a plain authority, the configured default
//! host is used instead.

use crate::error::AppError;
use axum::http::{HeaderMap, header};
use url::Url;

/// Deployment settings used to build short URLs.
#[derive(Debug, Clone)]
pub struct ShortUrlSettings {
    /// `http` or `https`.
    pub scheme: String,
    /// Host used when the request carries no usable `Host` header.
    pub default_host: String,
}

/// Validated `<scheme>://<host>/` prefix for short URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlBase {
    base: Url,
}

impl ShortUrlBase {
    /// Builds a base from a scheme and an authority (`host` or `host:port`).
    ///
    /// Returns `None` if `host` carries anything besides an authority, such
    /// as a path, query, fragment or credentials.
    pub fn new(scheme: &str, host: &str) -> Option<Self> {
        let host = host.trim();
        if host.is_empty() || host.contains(['/', '?', '#', '@', '\\']) {
            return None;
        }

        let base = Url::parse(&format!("{}://{}/", scheme, host)).ok()?;
        if base.host_str().is_none_or(str::is_empty) {
            return None;
        }

        Some(Self { base })
    }

    /// Picks the base for a request: the `Host` header when usable, otherwise
    /// the configured default host.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the configured default host is not a
    /// valid authority either.
    pub fn for_request(headers: &HeaderMap, settings: &ShortUrlSettings) -> Result<Self, AppError> {
        if let Some(base) =
            extract_host(headers).and_then(|host| Self::new(&settings.scheme, host))
        {
            return Ok(base);
        }

        Self::new(&settings.scheme, &settings.default_host).ok_or_else(|| {
            AppError::internal(format!(
                "default host '{}' is not a valid authority",
                settings.default_host
            ))
        })
    }

    /// Returns the full short URL for `short_id`.
    pub fn short_url(&self, short_id: &str) -> String {
        format!("{}{}", self.base.as_str(), short_id)
    }

    /// Returns the host (and port, when non-default) of this base.
    pub fn authority(&self) -> String {
        match (self.base.host_str(), self.base.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            _ => String::new(),
        }
    }
}

/// Returns the raw `Host` header value, if present and valid UTF-8.
pub fn extract_host(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
