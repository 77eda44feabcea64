//! Request handler tests: terminal state → response mapping.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Map, Value};

use openclaw_gateway::api::{execute, render_response, ExecuteRequest, ExecuteStatus, GatewayState};
use openclaw_gateway::engine::{
    AlwaysRequire, ExecutionEngine, NeverRequire, RunState, Step, StepResult,
};
use openclaw_gateway::planner::{PlanError, Planner};
use openclaw_gateway::rbac::AllowAll;
use openclaw_gateway::worker::{ToolExecutor, WorkerInvokeError};

// Test utilities

struct FakeExecutor {
    calls: Mutex<usize>,
    response: Result<Value, WorkerInvokeError>,
}

impl FakeExecutor {
    fn ok(value: Value) -> Arc<Self> {
        Arc::new(FakeExecutor {
            calls: Mutex::new(0),
            response: Ok(value),
        })
    }
}

#[async_trait]
impl ToolExecutor for FakeExecutor {
    async fn invoke(
        &self,
        _tool: &str,
        _args: &Map<String, Value>,
    ) -> Result<Value, WorkerInvokeError> {
        *self.calls.lock().unwrap() += 1;
        self.response.clone()
    }
}

struct FixedPlanner {
    steps: Vec<Step>,
}

#[async_trait]
impl Planner for FixedPlanner {
    async fn plan(&self, _prompt: &str) -> Result<Vec<Step>, PlanError> {
        Ok(self.steps.clone())
    }
}

struct FailingPlanner {
    message: String,
}

#[async_trait]
impl Planner for FailingPlanner {
    async fn plan(&self, _prompt: &str) -> Result<Vec<Step>, PlanError> {
        Err(PlanError::Model(self.message.clone()))
    }
}

fn gateway_state(planner: Arc<dyn Planner>, executor: Arc<FakeExecutor>) -> Arc<GatewayState> {
    let engine = ExecutionEngine::new(Arc::new(AllowAll), Arc::new(NeverRequire), executor);
    Arc::new(GatewayState { engine, planner })
}

fn request(prompt: &str) -> Json<ExecuteRequest> {
    Json(ExecuteRequest {
        prompt: prompt.to_string(),
        user_id: None,
    })
}

// Tests

#[tokio::test]
async fn test_execute_success_response_shape() {
    let executor = FakeExecutor::ok(json!({"sessions": []}));
    let planner = Arc::new(FixedPlanner {
        steps: vec![Step::new("sessions_list", Map::new())],
    });
    let state = gateway_state(planner, executor.clone());

    let Json(response) = execute(State(state), request("list sessions"))
        .await
        .expect("business outcomes are never 500");

    assert_eq!(response.status, ExecuteStatus::Success);
    assert_eq!(
        response.output,
        json!([{"tool": "sessions_list", "ok": true, "result": {"sessions": []}}])
    );
    assert_eq!(*executor.calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_execute_empty_prompt_is_error_with_message() {
    let executor = FakeExecutor::ok(Value::Null);
    let planner = Arc::new(openclaw_gateway::planner::LlmPlanner::new(Arc::new(
        openclaw_gateway::planner::FakeChatModel::with_error("model called"),
    )));
    let state = gateway_state(planner, executor.clone());

    let Json(response) = execute(State(state), request("   ")).await.unwrap();

    assert_eq!(response.status, ExecuteStatus::Error);
    assert!(response.output.as_str().unwrap().contains("Empty"));
    assert_eq!(*executor.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_execute_planner_failure_is_error_status() {
    let executor = FakeExecutor::ok(Value::Null);
    let planner = Arc::new(FailingPlanner {
        message: "upstream model unavailable".to_string(),
    });
    let state = gateway_state(planner, executor.clone());

    let Json(response) = execute(State(state), request("anything")).await.unwrap();

    assert_eq!(response.status, ExecuteStatus::Error);
    assert_eq!(response.output, json!("upstream model unavailable"));
    assert_eq!(*executor.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_execute_token_mismatch_error_gets_hint() {
    let executor = FakeExecutor::ok(Value::Null);
    let planner = Arc::new(FailingPlanner {
        message: "worker closed: 1008 gateway token mismatch".to_string(),
    });
    let state = gateway_state(planner, executor);

    let Json(response) = execute(State(state), request("anything")).await.unwrap();

    assert_eq!(response.status, ExecuteStatus::Error);
    let output = response.output.as_str().unwrap();
    assert!(output.starts_with("worker closed: 1008 gateway token mismatch"));
    assert!(output.contains("Hint: On the OpenClaw worker, set gateway.remote.token"));
}

#[tokio::test]
async fn test_execute_pending_approval_status() {
    let executor = FakeExecutor::ok(Value::Null);
    let planner: Arc<dyn Planner> = Arc::new(FixedPlanner {
        steps: vec![Step::new("terminal.run", Map::new())],
    });
    let engine = ExecutionEngine::new(Arc::new(AllowAll), Arc::new(AlwaysRequire), executor);
    let state = Arc::new(GatewayState { engine, planner });

    let Json(response) = execute(State(state), request("gated action")).await.unwrap();

    assert_eq!(response.status, ExecuteStatus::PendingApproval);
    assert_eq!(response.output, json!([]));
}

#[test]
fn test_render_response_mapping() {
    let mut state = RunState::new("p", None);
    state.done = true;
    state.results.push(StepResult::success("sessions_list", json!({})));
    let response = render_response(&state);
    assert_eq!(response.status, ExecuteStatus::Success);
    assert_eq!(
        response.output,
        json!([{"tool": "sessions_list", "ok": true, "result": {}}])
    );

    let mut state = RunState::new("p", None);
    state.fail("Step missing tool");
    let response = render_response(&state);
    assert_eq!(response.status, ExecuteStatus::Error);
    assert_eq!(response.output, json!("Step missing tool"));

    let mut state = RunState::new("p", None);
    state.pending_approval = true;
    state.done = true;
    let response = render_response(&state);
    assert_eq!(response.status, ExecuteStatus::PendingApproval);
    assert_eq!(response.output, json!([]));
}

#[test]
fn test_status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(ExecuteStatus::PendingApproval).unwrap(),
        json!("pending_approval")
    );
    assert_eq!(
        serde_json::to_value(ExecuteStatus::Success).unwrap(),
        json!("success")
    );
    assert_eq!(
        serde_json::to_value(ExecuteStatus::Error).unwrap(),
        json!("error")
    );
}
