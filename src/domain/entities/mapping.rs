//! Mapping entity: the only persisted record of the service.

use serde::Serialize;

/// Longest identifier the resolver will look up.
///
/// Anything longer is rejected before the store is queried.
pub const MAX_SHORT_ID_LENGTH: usize = 16;

/// An immutable `short_id -> original_url` mapping.
///
/// Created once by the shortener, read by the resolver, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub short_id: String,
    pub original_url: String,
}

impl Mapping {
    pub fn new(short_id: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_id: short_id.into(),
            original_url: original_url.into(),
        }
    }
}

/// Result of a successful create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenedLink {
    pub short_url: String,
    pub original_url: String,
    pub short_id: String,
}

/// Returns `true` when `short_id` may be looked up in the store.
pub fn is_lookup_candidate(short_id: &str) -> bool {
    !short_id.is_empty() && short_id.chars().count() <= MAX_SHORT_ID_LENGTH
}
