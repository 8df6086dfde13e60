//! Business logic services for the application layer.

pub mod resolver_service;
pub mod shortener_service;

pub use resolver_service::ResolverService;
pub use shortener_service::{MAX_GENERATION_ATTEMPTS, ShortenerService};
