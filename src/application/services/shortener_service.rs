//! Create path: validate, generate, persist, announce.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::analytics_event::{AnalyticsEvent, RequestMeta};
use crate::domain::entities::ShortenedLink;
use crate::domain::event_queue::EventDispatcher;
use crate::domain::repositories::{MappingStore, PutOutcome, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::IdGenerator;
use crate::utils::short_url::ShortUrlBase;
use crate::utils::url_validator::is_valid_url;

/// Attempts made before giving up on finding a free identifier.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service creating new short links.
///
/// Uniqueness is enforced by the store's create-if-absent write: a rejected
/// write is retried with a fresh identifier, up to
/// [`MAX_GENERATION_ATTEMPTS`] times. Identical URLs are not deduplicated.
pub struct ShortenerService {
    store: Arc<dyn MappingStore>,
    generator: Arc<dyn IdGenerator>,
    events: EventDispatcher,
}

impl ShortenerService {
    /// Creates a new shortener service.
    pub fn new(
        store: Arc<dyn MappingStore>,
        generator: Arc<dyn IdGenerator>,
        events: EventDispatcher,
    ) -> Self {
        Self {
            store,
            generator,
            events,
        }
    }

    /// Shortens `original_url` and returns the new link.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL (no store access on failure)
    /// 2. Generate an identifier and write it create-if-absent
    /// 3. On duplicate, retry with a new identifier
    /// 4. Queue a `shorten` analytics event (best-effort)
    /// 5. Build the short URL from `base`
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL fails validation
    /// - [`AppError::GenerationExhausted`] if every attempt collided
    /// - [`AppError::StoreUnavailable`] if the store could not be reached
    /// - [`AppError::Internal`] on any other store or generator fault
    pub async fn shorten(
        &self,
        original_url: &str,
        base: &ShortUrlBase,
        meta: RequestMeta,
    ) -> Result<ShortenedLink, AppError> {
        if !is_valid_url(original_url) {
            warn!(url = %truncate_for_log(original_url), "Invalid URL submitted");
            return Err(AppError::invalid_url());
        }

        let short_id = self.store_with_unique_id(original_url).await?;

        self.events
            .dispatch(AnalyticsEvent::shorten(&short_id, original_url, meta));

        let short_url = base.short_url(&short_id);
        metrics::counter!("shortener_links_created_total").increment(1);
        info!(short_id = %short_id, original_url = %original_url, short_url = %short_url, "Shortened URL");

        Ok(ShortenedLink {
            short_url,
            original_url: original_url.to_string(),
            short_id,
        })
    }

    /// Writes the mapping under a freshly generated identifier.
    async fn store_with_unique_id(&self, original_url: &str) -> Result<String, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let short_id = self.generator.generate()?;

            match self.store.put_if_absent(&short_id, original_url).await {
                Ok(PutOutcome::Created) => return Ok(short_id),
                Ok(PutOutcome::AlreadyExists) => {
                    warn!(attempt, short_id = %short_id, "short_id collision, retrying");
                }
                Err(StoreError::Unavailable(reason)) => {
                    error!(
                        backend = self.store.backend_name(),
                        error = %reason,
                        "Mapping store unavailable"
                    );
                    return Err(AppError::StoreUnavailable(reason));
                }
                Err(StoreError::Backend(reason)) => {
                    error!(
                        backend = self.store.backend_name(),
                        error = %reason,
                        "Mapping store write failed"
                    );
                    return Err(AppError::Internal(reason));
                }
            }
        }

        error!(
            attempts = MAX_GENERATION_ATTEMPTS,
            backend = self.store.backend_name(),
            "short_id generation exhausted, store may be saturated"
        );
        Err(AppError::GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

/// Caps logged user input so an oversized URL does not flood the logs.
fn truncate_for_log(value: &str) -> String {
    const LIMIT: usize = 128;
    if value.chars().count() <= LIMIT {
        value.to_string()
    } else {
        let head: String = value.chars().take(LIMIT).collect();
        format!("{}...", head)
    }
}
