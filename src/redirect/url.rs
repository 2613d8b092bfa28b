//! Redirect URL transformation.
//!
//! # Responsibilities
//! - Select the scheme (`https` when forced, `http` otherwise)
//! - Rewrite the host to `<leaf label>.<target host>`
//! - Record the original host in a query parameter
//! - Keep the request path and existing query parameters
//!
//! # Design Decisions
//! - The output is assembled from parts, never parsed back, so any Host
//!   value accepted by the transport yields a target
//! - User-info of the request target is never forwarded
//! - Merged queries are re-encoded with keys in ascending order

use std::collections::BTreeMap;
use std::fmt;

use axum::http::Uri;
use url::form_urlencoded;

use super::host::leaf_label;
use super::options::RedirectOptions;

/// A computed redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrl {
    scheme: &'static str,
    host: String,
    path: String,
    query: Option<String>,
}

impl fmt::Display for RedirectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}

/// Compute where a request should be redirected.
///
/// `request_host` is the Host value as sent by the client, port included.
/// Only the path and query of `uri` are used; its scheme and authority
/// (including any user-info) are dropped.
pub fn redirect_url(uri: &Uri, request_host: &str, options: &RedirectOptions<'_>) -> RedirectUrl {
    let mut query = uri.query().filter(|q| !q.is_empty()).map(str::to_string);

    let host = if !request_host.is_empty() && !options.target_host.is_empty() {
        if !options.host_query_param.is_empty() {
            query = Some(set_query_param(
                query.as_deref(),
                options.host_query_param,
                request_host,
            ));
        }
        format!("{}.{}", leaf_label(request_host), options.target_host)
    } else {
        request_host.to_string()
    };

    RedirectUrl {
        scheme: options.scheme(),
        host,
        path: uri.path().to_string(),
        query,
    }
}

/// Set `name=value` in a form-encoded query, replacing any previous values
/// for `name` and keeping every other pair.
fn set_query_param(raw_query: Option<&str>, name: &str, value: &str) -> String {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(raw) = raw_query {
        for (key, val) in form_urlencoded::parse(raw.as_bytes()) {
            params.entry(key.into_owned()).or_default().push(val.into_owned());
        }
    }
    params.insert(name.to_string(), vec![value.to_string()]);

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in &params {
        for val in values {
            serializer.append_pair(key, val);
        }
    }
    serializer.finish()
}
