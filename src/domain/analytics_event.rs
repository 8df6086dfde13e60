//! Analytics event model for best-effort event emission.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What happened on the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    /// A mapping was created.
    #[serde(rename = "shorten")]
    Shorten,
    /// A known identifier was redirected.
    #[serde(rename = "redirect")]
    Redirect,
    /// An unknown identifier was requested.
    #[serde(rename = "404_error")]
    NotFound,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Shorten => "shorten",
            EventKind::Redirect => "redirect",
            EventKind::NotFound => "404_error",
        }
    }
}

/// Client metadata attached to analytics events.
///
/// All fields are optional to handle missing headers gracefully.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestMeta {
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// A structured analytics record handed to the event sink.
///
/// Built on the request path, sent through a bounded queue and delivered by
/// the background worker, so the HTTP response never waits on the sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub event: EventKind,
    pub timestamp: DateTime<Utc>,
    pub short_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(flatten)]
    pub meta: RequestMeta,
}

impl AnalyticsEvent {
    pub fn shorten(short_id: &str, original_url: &str, meta: RequestMeta) -> Self {
        Self::new(EventKind::Shorten, short_id, Some(original_url), meta)
    }

    pub fn redirect(short_id: &str, original_url: &str, meta: RequestMeta) -> Self {
        Self::new(EventKind::Redirect, short_id, Some(original_url), meta)
    }

    pub fn not_found(short_id: &str, meta: RequestMeta) -> Self {
        Self::new(EventKind::NotFound, short_id, None, meta)
    }

    fn new(kind: EventKind, short_id: &str, original_url: Option<&str>, meta: RequestMeta) -> Self {
        Self {
            event: kind,
            timestamp: Utc::now(),
            short_id: short_id.to_string(),
            original_url: original_url.map(str::to_string),
            meta,
        }
    }
}
