//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Bind the listener
//! - Serve until a shutdown signal arrives

use std::io;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{parse_bind_address, ListenerConfig, RedirectorConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::{metrics, AccessLog};

/// Fatal errors before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid listen address '{0}'")]
    Address(String),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Bind the TCP listener described by the configuration.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let addr = parse_bind_address(&config.bind_address)
        .ok_or_else(|| StartupError::Address(config.bind_address.clone()))?;

    TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.bind_address.clone(),
            source,
        })
}

/// Run the redirector until SIGINT/SIGTERM.
pub async fn run(config: RedirectorConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::Address(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let listener = bind(&config.listener).await?;

    let shutdown = Shutdown::on_signal();

    HttpServer::new(config, AccessLog::stdout())
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
