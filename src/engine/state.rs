//! Run state types threaded through the execution engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One planned tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Worker tool name; empty is malformed.
    pub tool: String,
    /// Arguments forwarded verbatim to the worker.
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl Step {
    pub fn new(tool: impl Into<String>, args: Map<String, Value>) -> Self {
        Step {
            tool: tool.into(),
            args,
        }
    }
}

/// Recorded outcome of attempting one step.
///
/// Append-only audit record; `result` is present iff `ok`, `error` iff not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub tool: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepResult {
    pub fn success(tool: &str, result: Value) -> Self {
        StepResult {
            tool: tool.to_string(),
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(tool: &str, error: impl Into<String>) -> Self {
        StepResult {
            tool: tool.to_string(),
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Derived view of a run's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Success,
    Error,
    PendingApproval,
}

/// The unit of work threaded through the engine.
///
/// One instance per request, never shared across runs. Mutated only by the
/// engine; once `done` is set the state is terminal.
#[derive(Debug, Clone)]
pub struct RunState {
    /// Immutable input.
    pub prompt: String,
    /// Identity used for authorization.
    pub user_id: Option<String>,
    /// Set once by the planner, then immutable.
    pub steps: Vec<Step>,
    /// Advances by one per successfully executed step; never decreases.
    pub current_index: usize,
    /// Append-only, ordered by attempt.
    pub results: Vec<StepResult>,
    pub done: bool,
    pub error: Option<String>,
    pub pending_approval: bool,
}

impl RunState {
    pub fn new(prompt: impl Into<String>, user_id: Option<String>) -> Self {
        RunState {
            prompt: prompt.into(),
            user_id,
            steps: Vec::new(),
            current_index: 0,
            results: Vec::new(),
            done: false,
            error: None,
            pending_approval: false,
        }
    }

    /// Terminate the run with an error. Setting `error` always sets `done`.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.done = true;
    }

    pub fn status(&self) -> RunStatus {
        if !self.done {
            return RunStatus::Running;
        }
        if self.pending_approval {
            return RunStatus::PendingApproval;
        }
        if self.error.is_some() {
            return RunStatus::Error;
        }
        RunStatus::Success
    }
}
