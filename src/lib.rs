//! Subdomain redirector library.
//!
//! Answers every HTTP request with a `302 Found` to
//! `<scheme>://<leaf label>.<target host><path>?<query>` and writes one JSON
//! access log line per request to stdout.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod redirect;

pub use config::RedirectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
