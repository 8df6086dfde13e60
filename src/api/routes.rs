//! Route configuration for the public endpoints.

use crate::api::handlers::{
    health_handler, missing_short_id_handler, preflight_handler, redirect_handler,
    shorten_handler,
};
use crate::api::middleware::cors;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST    /shorten`     - Create a short link
/// - `OPTIONS /shorten`     - CORS preflight
/// - `GET     /health`      - Store and event queue health
/// - `GET     /{short_id}`  - Redirect to the original URL
/// - `OPTIONS /{short_id}`  - CORS preflight
///
/// The static `/shorten` and `/health` segments take precedence over
/// `/{short_id}`; the generator never hands out those identifiers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/shorten",
            post(shorten_handler)
                .options(preflight_handler)
                .layer(middleware::from_fn(cors::create_layer)),
        )
        .route("/health", get(health_handler))
        .route(
            "/{short_id}",
            get(redirect_handler)
                .options(preflight_handler)
                .layer(middleware::from_fn(cors::redirect_layer)),
        )
        .route(
            "/",
            get(missing_short_id_handler)
                .options(preflight_handler)
                .layer(middleware::from_fn(cors::redirect_layer)),
        )
}
