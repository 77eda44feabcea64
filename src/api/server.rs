//! Router assembly and server startup.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::api::handlers::{execute, health, GatewayState};
use crate::config::Settings;
use crate::engine::ExecutionEngine;
use crate::planner::Planner;

/// The gateway HTTP server.
pub struct GatewayServer {
    port: u16,
    state: Arc<GatewayState>,
}

impl GatewayServer {
    pub fn new(settings: &Settings, engine: ExecutionEngine, planner: Arc<dyn Planner>) -> Self {
        GatewayServer {
            port: settings.port,
            state: Arc::new(GatewayState { engine, planner }),
        }
    }

    /// Build the router. Separated from `start` so tests can drive it.
    pub fn router(state: Arc<GatewayState>) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/execute", post(execute))
            // Caller is the OpenClaw web UI, served from another origin.
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(&self) -> Result<()> {
        let app = Self::router(self.state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("OpenClaw gateway listening on {}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Gateway server failed: {}", e))?;

        Ok(())
    }
}
