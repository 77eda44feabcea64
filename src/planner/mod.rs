//! Planner: maps a free-text prompt into an ordered list of tool steps.

mod llm;
mod parse;

pub use llm::{ChatModel, FakeChatModel, OpenAiChatModel};
pub use parse::parse_steps;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::engine::Step;

/// Errors from planning.
///
/// Always terminal for the run; nothing here escapes as an unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Empty prompt")]
    EmptyPrompt,

    /// Upstream model call or output parsing failed.
    #[error("{0}")]
    Model(String),
}

/// Turns a prompt into an ordered step list.
#[async_trait]
pub trait Planner: Send + Sync {
    async fn plan(&self, prompt: &str) -> Result<Vec<Step>, PlanError>;
}

/// Instruction prepended to every planning call.
const PLANNER_INSTRUCTIONS: &str = "You are a task planner. Given a user prompt, output a JSON array of steps. \
Each step must have exactly: \"tool\" (string, the OpenClaw tool name) and \"args\" (object). \
Use only tool names like: sessions_list, terminal.run, filesystem.read_text_file. \
Output only valid JSON, e.g. [{\"tool\": \"sessions_list\", \"args\": {}}].";

/// LLM-backed planner.
pub struct LlmPlanner {
    model: Arc<dyn ChatModel>,
}

impl LlmPlanner {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        LlmPlanner { model }
    }
}

#[async_trait]
impl Planner for LlmPlanner {
    async fn plan(&self, prompt: &str) -> Result<Vec<Step>, PlanError> {
        if prompt.trim().is_empty() {
            return Err(PlanError::EmptyPrompt);
        }

        let message = format!("{}\n\nUser prompt: {}", PLANNER_INSTRUCTIONS, prompt);
        let text = self.model.complete(&message).await?;

        let steps = parse_steps(&text).map_err(|e| PlanError::Model(e.to_string()))?;
        debug!(steps = steps.len(), "planner produced steps");
        Ok(steps)
    }
}
