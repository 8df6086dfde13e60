//! Redirect path: validate, look up, announce.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::analytics_event::{AnalyticsEvent, RequestMeta};
use crate::domain::entities::{Mapping, is_lookup_candidate};
use crate::domain::event_queue::EventDispatcher;
use crate::domain::repositories::MappingStore;
use crate::error::AppError;

/// Service resolving short identifiers to their original URL.
///
/// Resolution never mutates the store: resolving the same identifier twice
/// yields the same URL.
pub struct ResolverService {
    store: Arc<dyn MappingStore>,
    events: EventDispatcher,
}

impl ResolverService {
    /// Creates a new resolver service.
    pub fn new(store: Arc<dyn MappingStore>, events: EventDispatcher) -> Self {
        Self { store, events }
    }

    /// Resolves `short_id` to its mapping.
    ///
    /// Queues a `redirect` event on success and a `404_error` event when the
    /// identifier is unknown. Both are best-effort.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if `short_id` is empty or longer than 16
    ///   characters (the store is not queried)
    /// - [`AppError::NotFound`] if no mapping exists
    /// - [`AppError::Internal`] on any store fault
    pub async fn resolve(&self, short_id: &str, meta: RequestMeta) -> Result<Mapping, AppError> {
        if !is_lookup_candidate(short_id) {
            warn!(length = short_id.chars().count(), "Invalid short_id");
            return Err(AppError::invalid_short_id());
        }

        let lookup = self.store.get(short_id).await.map_err(|e| {
            error!(
                backend = self.store.backend_name(),
                short_id = %short_id,
                error = %e,
                "Mapping store lookup failed"
            );
            AppError::internal(e.to_string())
        })?;

        match lookup {
            Some(original_url) => {
                self.events
                    .dispatch(AnalyticsEvent::redirect(short_id, &original_url, meta));
                metrics::counter!("shortener_redirects_total").increment(1);
                info!(short_id = %short_id, original_url = %original_url, "Redirecting");
                Ok(Mapping::new(short_id, original_url))
            }
            None => {
                self.events.dispatch(AnalyticsEvent::not_found(short_id, meta));
                warn!(short_id = %short_id, "short_id not found");
                Err(AppError::NotFound)
            }
        }
    }
}
