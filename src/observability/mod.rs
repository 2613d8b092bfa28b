//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handler produces:
//!     → access_log.rs (one JSON line per request, stdout)
//!     → metrics.rs (counters, histograms)
//!
//! Everything else produces:
//!     → logging.rs (tracing events, stderr)
//! ```
//!
//! # Design Decisions
//! - stdout carries nothing but access log records, so it can be piped
//!   straight into a log collector
//! - Diagnostics go to stderr through `tracing`
//! - Metrics are cheap (atomic increments) and exported only when enabled

pub mod access_log;
pub mod logging;
pub mod metrics;

pub use access_log::{AccessLog, LogEntry, PendingLogEntry};
