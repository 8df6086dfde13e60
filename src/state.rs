//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ResolverService, ShortenerService};
use crate::domain::event_queue::EventDispatcher;
use crate::domain::repositories::MappingStore;
use crate::utils::code_generator::IdGenerator;
use crate::utils::short_url::ShortUrlSettings;

/// Process-wide handles created once at startup.
///
/// Cloned per request; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    pub resolver: Arc<ResolverService>,
    pub store: Arc<dyn MappingStore>,
    pub events: EventDispatcher,
    pub short_urls: ShortUrlSettings,
    /// When true, client IPs are read from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services around a store, a generator and an event queue.
    pub fn new(
        store: Arc<dyn MappingStore>,
        generator: Arc<dyn IdGenerator>,
        events: EventDispatcher,
        short_urls: ShortUrlSettings,
        behind_proxy: bool,
    ) -> Self {
        let shortener = Arc::new(ShortenerService::new(
            store.clone(),
            generator,
            events.clone(),
        ));
        let resolver = Arc::new(ResolverService::new(store.clone(), events.clone()));

        Self {
            shortener,
            resolver,
            store,
            events,
            short_urls,
            behind_proxy,
        }
    }
}
