//! Application layer services implementing the create and redirect protocol.
//!
//! Services consume the domain's store and sink contracts and provide a
//! typed API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Validation, id generation, create-if-absent writes
//! - [`services::resolver_service::ResolverService`] - Identifier lookup for redirects

pub mod services;
