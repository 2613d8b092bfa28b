//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the redirect handler
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{RedirectConfig, RedirectorConfig};
use crate::http::handler::redirect_handler;
use crate::http::request::MakeRequestUuid;
use crate::observability::AccessLog;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Static redirect settings, never mutated after startup.
    pub config: Arc<RedirectConfig>,
    pub access_log: AccessLog,
}

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
    config: RedirectorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RedirectorConfig, access_log: AccessLog) -> Self {
        let router = build_router(&config, access_log);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            target_host = %self.config.redirect.target_host,
            host_query_param = %self.config.redirect.host_query_param,
            always_https = self.config.redirect.always_https,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Every method and path reaches the redirect handler, and every response
/// is the handler's redirect; no layer here answers on its own.
pub fn build_router(config: &RedirectorConfig, access_log: AccessLog) -> Router {
    let state = AppState {
        config: Arc::new(config.redirect.clone()),
        access_log,
    };

    Router::new()
        .fallback(redirect_handler)
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
