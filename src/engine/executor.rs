//! The plan → execute state machine.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::engine::state::{RunState, StepResult};
use crate::engine::ApprovalPolicy;
use crate::planner::Planner;
use crate::rbac::Authorizer;
use crate::worker::ToolExecutor;

/// Executes planned steps one at a time against the worker.
///
/// Built once at startup and injected into every request; all mutable state
/// lives in the per-request [`RunState`], so the engine is safely shared.
#[derive(Clone)]
pub struct ExecutionEngine {
    authorizer: Arc<dyn Authorizer>,
    approval: Arc<dyn ApprovalPolicy>,
    executor: Arc<dyn ToolExecutor>,
}

impl ExecutionEngine {
    pub fn new(
        authorizer: Arc<dyn Authorizer>,
        approval: Arc<dyn ApprovalPolicy>,
        executor: Arc<dyn ToolExecutor>,
    ) -> Self {
        ExecutionEngine {
            authorizer,
            approval,
            executor,
        }
    }

    /// Run one prompt to a terminal state: plan, then tick until done.
    ///
    /// Planner failure terminates the run before the step loop is entered.
    /// Never returns a non-terminal state.
    pub async fn run(
        &self,
        planner: &dyn Planner,
        prompt: &str,
        user_id: Option<String>,
    ) -> RunState {
        let run_id = Uuid::new_v4();
        let mut state = RunState::new(prompt, user_id);

        match planner.plan(prompt).await {
            Ok(steps) => {
                debug!(%run_id, steps = steps.len(), "plan ready");
                state.steps = steps;
            }
            Err(e) => {
                warn!(%run_id, "planning failed: {}", e);
                state.fail(e.to_string());
                return state;
            }
        }

        while !state.done {
            self.tick(&mut state).await;
        }

        debug!(
            %run_id,
            results = state.results.len(),
            status = ?state.status(),
            "run finished"
        );
        state
    }

    /// One transition of the state machine: consume at most one step.
    ///
    /// Steps execute strictly in plan order; a step's outcome is fully
    /// resolved before the next tick. Terminal states are never mutated.
    pub async fn tick(&self, state: &mut RunState) {
        if state.done {
            return;
        }

        if state.current_index >= state.steps.len() {
            state.done = true;
            return;
        }

        let step = state.steps[state.current_index].clone();

        if step.tool.is_empty() {
            state.fail("Step missing tool");
            return;
        }

        if !self
            .authorizer
            .is_allowed(state.user_id.as_deref(), &step.tool)
            .await
        {
            state.fail(format!(
                "RBAC: user not allowed to run tool '{}'",
                step.tool
            ));
            return;
        }

        if self
            .approval
            .requires_approval(state.user_id.as_deref(), &step.tool, &step.args)
            .await
        {
            // Park the run; current_index stays put so a resume can replay
            // this exact step.
            state.pending_approval = true;
            state.error = None;
            state.done = true;
            return;
        }

        debug!(tool = %step.tool, index = state.current_index, "invoking tool");
        match self.executor.invoke(&step.tool, &step.args).await {
            Ok(result) => {
                state.results.push(StepResult::success(&step.tool, result));
                state.current_index += 1;
                if state.current_index >= state.steps.len() {
                    state.done = true;
                }
            }
            Err(e) => {
                let message = e.message.clone();
                warn!(tool = %step.tool, "tool invocation failed: {}", message);
                state.results.push(StepResult::failure(&step.tool, message.clone()));
                state.fail(message);
            }
        }
    }
}
