//! DTOs for the create endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortenedLink;

/// Body of `POST /shorten`.
///
/// `url` is optional at the parsing stage so that a missing URL is reported
/// as an invalid URL rather than a malformed body.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: Option<String>,
}

/// Successful create response.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub original_url: String,
    pub short_id: String,
}

impl From<ShortenedLink> for ShortenResponse {
    fn from(link: ShortenedLink) -> Self {
        Self {
            short_url: link.short_url,
            original_url: link.original_url,
            short_id: link.short_id,
        }
    }
}
