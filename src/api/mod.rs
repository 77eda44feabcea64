//! HTTP surface: `/health` and `/execute`.

mod handlers;
mod models;
mod server;

pub use handlers::{annotate_error, execute, health, render_response, GatewayState};
pub use models::{ExecuteRequest, ExecuteResponse, ExecuteStatus};
pub use server::GatewayServer;
