//! Handler for CORS preflight requests.

use axum::http::StatusCode;

/// Answers `OPTIONS` with `204 No Content`.
///
/// The CORS headers themselves are added by [`crate::api::middleware::cors`].
pub async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}
