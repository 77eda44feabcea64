//! OpenClaw Gateway entrypoint.
//!
//! Wires the static pieces once at startup (settings, RBAC policy, approval
//! policy, worker client, planner) and injects them into every request.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use openclaw_gateway::api::GatewayServer;
use openclaw_gateway::config::Settings;
use openclaw_gateway::engine::{ExecutionEngine, NeverRequire};
use openclaw_gateway::planner::{LlmPlanner, OpenAiChatModel, Planner};
use openclaw_gateway::rbac::AllowAll;
use openclaw_gateway::worker::WorkerClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("openclaw_gateway=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env();
    info!("worker endpoint: {}", settings.worker_url);

    let executor = Arc::new(WorkerClient::new(
        &settings.worker_url,
        &settings.worker_token,
    ));
    let engine = ExecutionEngine::new(Arc::new(AllowAll), Arc::new(NeverRequire), executor);

    let model = Arc::new(OpenAiChatModel::new(&settings));
    let planner: Arc<dyn Planner> = Arc::new(LlmPlanner::new(model));

    let server = GatewayServer::new(&settings, engine, planner);
    server.start().await
}
