//! Subdomain redirector.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request       ┌──────────────────────────────────────────────┐
//!     ─────────────────────┼─▶ http::server ─▶ http::handler              │
//!                          │                     │  access log guard      │
//!                          │                     ▼                        │
//!                          │               redirect::options              │
//!                          │               redirect::url                  │
//!     302 Found            │                     │                        │
//!     ◀────────────────────┼── http::response ◀──┘                        │
//!                          │                                              │
//!     JSON line (stdout) ◀─┼── observability::access_log (on guard drop)  │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use subdomain_redirector::cli::Cli;
use subdomain_redirector::lifecycle;
use subdomain_redirector::observability::logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability);
    tracing::info!("subdomain-redirector v{} starting", env!("CARGO_PKG_VERSION"));

    match lifecycle::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
