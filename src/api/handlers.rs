//! Request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{debug_handler, extract::State, http::StatusCode, response::Json};
use serde_json::Value;
use tracing::error;

use crate::api::models::{ExecuteRequest, ExecuteResponse, ExecuteStatus};
use crate::engine::{ExecutionEngine, RunState, RunStatus};
use crate::planner::Planner;

/// Shared state for the gateway: the engine and planner are built once at
/// startup and injected into every request.
pub struct GatewayState {
    pub engine: ExecutionEngine,
    pub planner: Arc<dyn Planner>,
}

/// Health check endpoint. No dependencies checked.
#[debug_handler]
pub async fn health() -> Json<HashMap<String, String>> {
    let mut response = HashMap::new();
    response.insert("status".to_string(), "ok".to_string());
    Json(response)
}

/// Run the plan → execute pipeline for one prompt.
///
/// Business outcomes (success, error, pending approval) always return 200;
/// a 500 indicates a defect in the driving logic, not a run failure.
#[debug_handler]
pub async fn execute(
    State(state): State<Arc<GatewayState>>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, (StatusCode, String)> {
    tracing::debug!(user_id = ?request.user_id, "executing prompt");

    let engine = state.engine.clone();
    let planner = state.planner.clone();
    let prompt = request.prompt.clone();
    let user_id = request.user_id.clone();

    // Run on a separate task so a panic in the engine surfaces as a 500
    // instead of tearing down the connection.
    let run = tokio::spawn(async move { engine.run(planner.as_ref(), &prompt, user_id).await });

    let final_state = match run.await {
        Ok(state) => state,
        Err(e) => {
            error!("Execute failed: {}", e);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    Ok(Json(render_response(&final_state)))
}

/// Map a terminal run state to the response body.
pub fn render_response(state: &RunState) -> ExecuteResponse {
    match state.status() {
        RunStatus::PendingApproval => ExecuteResponse {
            status: ExecuteStatus::PendingApproval,
            output: results_value(state),
        },
        RunStatus::Error => ExecuteResponse {
            status: ExecuteStatus::Error,
            output: Value::String(annotate_error(state.error.as_deref().unwrap_or_default())),
        },
        _ => ExecuteResponse {
            status: ExecuteStatus::Success,
            output: results_value(state),
        },
    }
}

fn results_value(state: &RunState) -> Value {
    serde_json::to_value(&state.results).unwrap_or_default()
}

/// Append a remediation hint for the worker's token-mismatch close code.
///
/// Matched on exact substrings of the upstream message; keep the triggers
/// verbatim for compatibility.
pub fn annotate_error(error: &str) -> String {
    let mut message = error.to_string();
    if message.contains("1008")
        && (message.contains("gateway token mismatch") || message.contains("gateway.remote.token"))
    {
        message.push_str(
            "\n\nHint: On the OpenClaw worker, set gateway.remote.token to match gateway.auth.token (see README).",
        );
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_payload_is_fixed() {
        for _ in 0..3 {
            let Json(body) = health().await;
            assert_eq!(body.get("status").map(String::as_str), Some("ok"));
            assert_eq!(body.len(), 1);
        }
    }

    #[test]
    fn test_annotate_token_mismatch() {
        let annotated = annotate_error("worker closed: 1008 gateway token mismatch");
        assert!(annotated.contains("Hint: On the OpenClaw worker"));
        assert!(annotated.starts_with("worker closed: 1008 gateway token mismatch"));

        let annotated = annotate_error("1008: check gateway.remote.token");
        assert!(annotated.contains("Hint:"));
    }

    #[test]
    fn test_annotate_leaves_other_errors_alone() {
        assert_eq!(annotate_error("Empty prompt"), "Empty prompt");
        // "1008" without either token substring must not trigger.
        assert_eq!(annotate_error("code 1008 seen"), "code 1008 seen");
        // Token substring without "1008" must not trigger.
        assert_eq!(
            annotate_error("gateway token mismatch"),
            "gateway token mismatch"
        );
    }
}
