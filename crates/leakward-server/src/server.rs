//! Main server implementation

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use leakward_core::config::{LeakwardConfig, ServerSettings};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::handlers;
use crate::state::AppState;

/// HTTP API server
pub struct Server {
    bind_addr: SocketAddr,
    app: Router,
}

impl Server {
    /// Create a server from loaded configuration
    pub fn new(config: &LeakwardConfig) -> anyhow::Result<Self> {
        let state = AppState::new(config)?;
        Ok(Self::with_state(&config.server, state))
    }

    /// Construct a server around an already-built state
    pub fn with_state(settings: &ServerSettings, state: AppState) -> Self {
        Self {
            bind_addr: settings.bind,
            app: Self::router(state, settings.cors),
        }
    }

    /// Build the Axum application with routes and middleware
    pub fn router(state: AppState, enable_cors: bool) -> Router {
        let api_routes = Router::new()
            .route("/health", get(handlers::health::health_check))
            .route("/download-config", get(handlers::bundle::download_config))
            .route("/generate-script", post(handlers::bundle::generate_script))
            .route("/scan-projects", post(handlers::local::scan_projects))
            .route("/deploy-single", post(handlers::local::deploy_single))
            .route("/deploy-bulk", post(handlers::local::deploy_bulk))
            .route(
                "/github-org/repos",
                post(handlers::github::list_repositories),
            )
            .route(
                "/github-org/deploy",
                post(handlers::github::deploy_repositories),
            );

        let app = Router::new()
            .nest("/api", api_routes)
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Get the bind address
    pub fn addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Run the server until interrupted
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.bind_addr))?;
        info!("Starting server on {}", listener.local_addr()?);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
