//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router (API routes + static asset fallback)
//! - Wire up middleware (tracing, request ID, CORS)
//! - Bind server to listener and shut down gracefully
//!
//! # Route Table
//! ```text
//! OPTIONS /api, /api/*               → preflight (no upstream call)
//! ANY     /api                       → generic passthrough
//! ANY     /api/networks[/...]        → convenience routes
//! ANY     /api/*                     → 404 JSON
//! *                                  → static assets
//! ```

use std::path::Path;

use axum::{
    middleware,
    routing::options,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::{ConfigError, GatewayConfig};
use crate::http::handlers::{api_not_found, api_passthrough, network_shortcut, AppState};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::{shutdown_signal, ShutdownListener};
use crate::security::{cors_middleware, preflight, CorsPolicy};
use crate::upstream::Forwarder;

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Build the server. The route table is fixed from here on.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let state = AppState {
            forwarder: Forwarder::new(&config.upstream)?,
            max_body_bytes: config.limits.max_body_bytes,
        };
        let cors = CorsPolicy::from_config(&config.cors)?;

        let router = Self::build_router(&config, state, cors);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState, cors: CorsPolicy) -> Router {
        let api = Router::new()
            .route("/api", options(preflight).fallback(api_passthrough))
            .route("/api/networks", options(preflight).fallback(network_shortcut))
            .route(
                "/api/networks/{*rest}",
                options(preflight).fallback(network_shortcut),
            )
            .route("/api/{*rest}", options(preflight).fallback(api_not_found))
            .with_state(state)
            .layer(middleware::from_fn_with_state(cors, cors_middleware));

        let assets_dir = Path::new(&config.assets.dir);
        let assets = ServeDir::new(assets_dir)
            .fallback(ServeFile::new(assets_dir.join(&config.assets.index)));

        Router::new()
            .merge(api)
            .fallback_service(assets)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The composed router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Serve on `listener` until a shutdown signal or trigger arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            assets = %self.config.assets.dir,
            "Gateway listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("Gateway stopped");
        Ok(())
    }
}
