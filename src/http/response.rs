//! Redirect response construction.
//!
//! # Design Decisions
//! - Always `302 Found`; a redirect is never permanent
//! - GET and HEAD get a short HTML body linking to the target
//! - A target that can't be a header value still yields a 302

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, LOCATION},
        HeaderValue, Method, StatusCode,
    },
    response::Response,
};

/// Build a `302 Found` response pointing at `location`.
pub fn found(method: &Method, location: &str) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::FOUND;

    match HeaderValue::from_str(location) {
        Ok(value) => {
            response.headers_mut().insert(LOCATION, value);
        }
        Err(e) => {
            tracing::error!(location = %location, error = %e, "Redirect target is not a valid header value");
            return response;
        }
    }

    if *method == Method::GET || *method == Method::HEAD {
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        *response.body_mut() = Body::from(format!(
            "<a href=\"{}\">Found</a>.\n",
            html_escape(location)
        ));
    }

    response
}

fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
