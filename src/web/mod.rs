//! Web layer module
//!
//! HTTP surface of the gateway. Handlers stay thin: they pull input out of
//! the request, call the resolver or the relay and hand any error to
//! [`responses`] for mapping.
//!
//! Routes:
//! - `POST /api/download` resolve a media page URL into a download manifest
//! - `GET /api/stream` relay one media URL back as an attachment
//! - `GET /health`, `GET /live` process probes

use anyhow::{Context, Result};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    config::Config,
    errors::AppResult,
    proxy::RelayStreamer,
    services::ResolverClient,
    utils::HttpClientFactory,
};

pub mod handlers;
pub mod middleware;
pub mod responses;

pub use responses::{handle_error, ApiResponse};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: ResolverClient,
    pub relay: RelayStreamer,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    /// Build the outbound client once and wire both collaborators to it
    pub fn new(config: Config) -> AppResult<Self> {
        let client = HttpClientFactory::new(config.upstream.clone()).create_client()?;
        let resolver = ResolverClient::new(client.clone(), &config.upstream);
        let relay = RelayStreamer::new(client, &config.upstream);

        Ok(Self {
            config: Arc::new(config),
            resolver,
            relay,
            start_time: Utc::now(),
        })
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/live", get(handlers::health::liveness_check))
        .nest("/api", api_routes())
        .layer(from_fn(middleware::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/download", post(handlers::download::resolve_download))
        .route("/stream", get(handlers::stream::relay_stream))
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port)
            .parse()
            .with_context(|| {
                format!("Invalid listen address {}:{}", config.web.host, config.web.port)
            })?;

        info!("Resolver endpoint: {}", config.upstream.resolver_url);
        let state = AppState::new(config)?;

        Ok(Self {
            app: create_router(state),
            addr,
        })
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Serve until SIGINT/SIGTERM, letting in-flight requests finish
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind to {}", self.addr))?;

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
