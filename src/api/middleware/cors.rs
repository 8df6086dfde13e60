//! CORS response headers.
//!
//! Both endpoints are called from browsers on other origins, so every
//! response carries the headers, errors included, not only preflights.

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

pub const CREATE_METHODS: &str = "POST,OPTIONS";
pub const REDIRECT_METHODS: &str = "GET,OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// CORS headers for the create endpoint.
pub async fn create_layer(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    apply(&mut response, CREATE_METHODS);
    response
}

/// CORS headers for the redirect endpoint.
pub async fn redirect_layer(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    apply(&mut response, REDIRECT_METHODS);
    response
}

fn apply(response: &mut Response, methods: &'static str) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(methods),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}
