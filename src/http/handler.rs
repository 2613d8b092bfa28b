//! The redirect request handler.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
};

use crate::http::request::{remote_ip, request_host, request_id};
use crate::http::response::found;
use crate::http::server::AppState;
use crate::observability::{metrics, LogEntry};
use crate::redirect::{options::X_FORWARDED_PROTO, redirect_url, RedirectOptions};

/// Answer every request with a `302 Found` to its computed target.
///
/// The access log record is captured up front and written when the
/// handler returns or is cancelled.
pub async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, _body) = request.into_parts();

    let host = request_host(&parts.uri, &parts.headers);
    let _pending = state.access_log.begin(LogEntry::capture(
        &parts.method,
        &parts.uri,
        &parts.headers,
        &host,
        remote_ip(&parts.extensions),
    ));

    let forwarded_proto = parts
        .headers
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok());
    let options = RedirectOptions::derive(&state.config, forwarded_proto);
    let target = redirect_url(&parts.uri, &host, &options).to_string();

    tracing::debug!(
        request_id = %request_id(&parts.extensions),
        method = %parts.method,
        host = %host,
        target = %target,
        "Redirecting request"
    );

    let response = found(&parts.method, &target);
    metrics::record_redirect(&parts.method, options.scheme(), start_time);
    response
}
