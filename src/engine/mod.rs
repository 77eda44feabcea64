//! Execution engine — sequential step runner for planned tool invocations.
//!
//! The engine consumes one step per tick: RBAC check, approval check, then a
//! worker call. It short-circuits on the first deny or failure and records
//! every attempted step in the run's result log.

mod executor;
mod state;

pub use executor::ExecutionEngine;
pub use state::{RunState, RunStatus, Step, StepResult};

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Hook deciding whether a step needs human approval before execution.
///
/// The resumption mechanism lives outside the gateway; the engine only parks
/// the run with `pending_approval` set and `current_index` untouched.
#[async_trait]
pub trait ApprovalPolicy: Send + Sync {
    async fn requires_approval(
        &self,
        user_id: Option<&str>,
        tool: &str,
        args: &Map<String, Value>,
    ) -> bool;
}

/// Default policy: no step requires approval.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverRequire;

#[async_trait]
impl ApprovalPolicy for NeverRequire {
    async fn requires_approval(
        &self,
        _user_id: Option<&str>,
        _tool: &str,
        _args: &Map<String, Value>,
    ) -> bool {
        false
    }
}

/// Approval policy that gates every step (for testing).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRequire;

#[async_trait]
impl ApprovalPolicy for AlwaysRequire {
    async fn requires_approval(
        &self,
        _user_id: Option<&str>,
        _tool: &str,
        _args: &Map<String, Value>,
    ) -> bool {
        true
    }
}
