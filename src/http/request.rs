//! Request inspection.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Determine the Host value the client addressed
//! - Determine the client IP from the connection
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Every helper degrades to an empty value instead of failing

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{header::HOST, Extensions, HeaderMap, HeaderValue, Request, Uri},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID generator for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Request ID assigned by the request-id layer, if any.
pub fn request_id(extensions: &Extensions) -> String {
    extensions
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Host value as presented by the client, port included.
///
/// Prefers the `Host` header and falls back to the authority of the request
/// target (HTTP/2 `:authority`, absolute-form targets) without user-info.
pub fn request_host(uri: &Uri, headers: &HeaderMap) -> String {
    if let Some(host) = headers.get(HOST) {
        return String::from_utf8_lossy(host.as_bytes()).into_owned();
    }
    uri.authority()
        .map(|authority| {
            let authority = authority.as_str();
            authority
                .rsplit_once('@')
                .map_or(authority, |(_, host)| host)
                .to_string()
        })
        .unwrap_or_default()
}

/// Client IP from the connection info, without port. Empty when unknown.
pub fn remote_ip(extensions: &Extensions) -> String {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default()
}
