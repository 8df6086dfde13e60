//! Request metadata extraction for analytics events.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};

use crate::domain::analytics_event::RequestMeta;
use crate::state::AppState;

/// Client IP, user agent and referrer of the current request.
///
/// Never rejects: every field is optional. The client IP comes from the peer
/// socket address, or from `X-Forwarded-For` / `X-Real-IP` when the service
/// is configured to run behind a trusted proxy.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta(pub RequestMeta);

impl FromRequestParts<AppState> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let client_ip = if state.behind_proxy {
            forwarded_ip(&parts.headers).or(peer_ip)
        } else {
            peer_ip
        };

        Ok(ClientMeta(RequestMeta {
            client_ip,
            user_agent: header_string(&parts.headers, header::USER_AGENT),
            referrer: header_string(&parts.headers, header::REFERER),
        }))
    }
}

/// First address of `X-Forwarded-For`, else `X-Real-IP`.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
        .map(str::to_string)
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
