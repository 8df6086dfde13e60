//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use tracing::{debug, error};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::ClientMeta;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::ShortUrlBase;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_url": "https://short.ly/Ab3dE-9x",
///   "original_url": "https://example.com/page",
///   "short_id": "Ab3dE-9x"
/// }
/// ```
///
/// The short URL uses the request's `Host` header, or the configured default
/// host when the header is missing or unusable.
///
/// The shortener runs on its own task: if the client disconnects, the store
/// write still completes.
///
/// # Errors
///
/// - 400 `Invalid request body` if the body is not a JSON object
/// - 400 `Invalid URL` if `url` is missing or fails validation
/// - 500 `Internal server error` on store failure or exhausted retries
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ClientMeta(meta): ClientMeta,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected create request body");
        AppError::invalid_body()
    })?;

    let Some(url) = payload.url else {
        return Err(AppError::invalid_url());
    };

    let base = ShortUrlBase::for_request(&headers, &state.short_urls)?;

    let shortener = state.shortener.clone();
    let link = tokio::spawn(async move { shortener.shorten(&url, &base, meta).await })
        .await
        .map_err(|e| {
            error!(error = %e, "Shorten task failed");
            AppError::internal(format!("shorten task failed: {}", e))
        })??;

    Ok(Json(link.into()))
}
