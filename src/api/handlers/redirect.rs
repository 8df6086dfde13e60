//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::api::extract::ClientMeta;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Request Flow
///
/// 1. Reject empty ids and ids over 16 characters (no store access)
/// 2. Look the id up in the mapping store
/// 3. Queue a `redirect` or `404_error` analytics event
/// 4. Return `302 Found` with the original URL in `Location`
///
/// # Errors
///
/// - 400 `Invalid short_id` for a malformed or oversized id
/// - 404 `Not found` if the id is unknown
/// - 500 `Internal server error` on store failure
pub async fn redirect_handler(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    short_id: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(short_id) = short_id.map_err(|_| AppError::invalid_short_id())?;

    let mapping = state.resolver.resolve(&short_id, meta).await?;

    let location = HeaderValue::from_str(&mapping.original_url).map_err(|e| {
        error!(short_id = %mapping.short_id, error = %e, "Stored URL is not a valid header value");
        AppError::internal(format!("invalid Location header: {}", e))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// `GET /` carries no identifier at all.
pub async fn missing_short_id_handler(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
) -> Result<Response, AppError> {
    state.resolver.resolve("", meta).await?;
    Err(AppError::invalid_short_id())
}
