//! Redirect target computation.
//!
//! # Data Flow
//! ```text
//! RedirectConfig (static, shared via Arc)
//!     + X-Forwarded-Proto of the request
//!     → options.rs (per-request RedirectOptions)
//!     → url.rs (scheme, host rewrite, query merge)
//!     → RedirectUrl (rendered into the Location header)
//! ```
//!
//! # Design Decisions
//! - Everything here is pure: no I/O, no shared mutable state
//! - The transformation is total; malformed hosts degrade, they never error
//! - Host/port splitting lives in host.rs so its edge cases are testable alone

pub mod host;
pub mod options;
pub mod url;

pub use host::{leaf_label, split_host_port};
pub use options::RedirectOptions;
pub use url::{redirect_url, RedirectUrl};
