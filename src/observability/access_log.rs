//! Per-request access log.
//!
//! One JSON object per handled request, one line per object, written to
//! stdout. The record is captured when handling starts and written when
//! its [`PendingLogEntry`] guard is dropped, so every exit path (including
//! a cancelled or panicking handler) produces exactly one line.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use axum::http::{HeaderMap, Method, Uri};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One access log record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEntry {
    /// Completion time of the request (UTC).
    pub time: DateTime<Utc>,
    /// Client address without port.
    #[serde(rename = "RemoteIP")]
    pub remote_ip: String,
    pub method: String,
    /// Host value as sent by the client.
    pub host: String,
    /// Path and query of the request target.
    #[serde(rename = "RequestURI")]
    pub request_uri: String,
    pub referrer: String,
    pub user_agent: String,
    pub forwarded_for: String,
    pub forwarded_host: String,
    pub forwarded_proto: String,
}

impl LogEntry {
    /// Capture request metadata. `time` is left unset until emission.
    pub fn capture(
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        host: &str,
        remote_ip: String,
    ) -> Self {
        Self {
            time: DateTime::<Utc>::default(),
            remote_ip,
            method: method.to_string(),
            host: host.to_string(),
            request_uri: uri
                .path_and_query()
                .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string()),
            referrer: header_string(headers, "referer"),
            user_agent: header_string(headers, "user-agent"),
            forwarded_for: header_string(headers, "x-forwarded-for"),
            forwarded_host: header_string(headers, "x-forwarded-host"),
            forwarded_proto: header_string(headers, "x-forwarded-proto"),
        }
    }
}

/// Header value as text, empty when absent.
pub fn header_string(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// Shared handle to the access log sink.
///
/// Cloning is cheap; all clones write to the same sink. Each record is
/// written with a single `write_all` while holding the sink lock, so
/// concurrent requests never interleave within a line.
#[derive(Clone)]
pub struct AccessLog {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl AccessLog {
    /// Access log writing to any sink.
    pub fn new<W: Write + Send + 'static>(sink: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    /// Access log writing to the process' standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Start recording a request. The entry is written when the guard drops.
    pub fn begin(&self, entry: LogEntry) -> PendingLogEntry {
        PendingLogEntry {
            log: self.clone(),
            entry: Some(entry),
        }
    }

    /// Serialize and write one record. Failures are reported and dropped.
    pub fn write(&self, entry: &LogEntry) {
        let mut line = match serde_json::to_vec(entry) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize access log entry");
                return;
            }
        };
        line.push(b'\n');

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = sink.write_all(&line).and_then(|_| sink.flush()) {
            tracing::warn!(error = %e, "Failed to write access log entry");
        }
    }
}

impl fmt::Debug for AccessLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessLog").finish_non_exhaustive()
    }
}

/// Guard owning an access log record until it is written.
#[derive(Debug)]
pub struct PendingLogEntry {
    log: AccessLog,
    entry: Option<LogEntry>,
}

impl Drop for PendingLogEntry {
    fn drop(&mut self) {
        if let Some(mut entry) = self.entry.take() {
            entry.time = Utc::now();
            self.log.write(&entry);
        }
    }
}
