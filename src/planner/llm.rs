//! Chat model transport for the planner.
//!
//! The planner only needs one completion per run, so the seam is a single
//! `complete` call. `OpenAiChatModel` talks to any OpenAI-compatible
//! endpoint; `FakeChatModel` returns fixtures for tests.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Settings;
use crate::planner::PlanError;

/// Single-shot chat completion.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, PlanError>;
}

/// OpenAI-compatible chat completions client.
pub struct OpenAiChatModel {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChatModel {
    pub fn new(settings: &Settings) -> Self {
        OpenAiChatModel {
            client: Client::new(),
            base_url: settings.openai_base_url.trim_end_matches('/').to_string(),
            api_key: settings.openai_api_key.clone(),
            model: settings.planner_model.clone(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, prompt: &str) -> Result<String, PlanError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0,
        });

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request);

        if !self.api_key.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
        }

        debug!(model = %self.model, "requesting plan completion");
        let response = builder
            .send()
            .await
            .map_err(|e| PlanError::Model(format!("Planner request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PlanError::Model(format!(
                "Planner API error: {}",
                error_text
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| PlanError::Model(format!("Planner response invalid: {}", e)))?;

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();

        Ok(content)
    }
}

/// Fake chat model for testing (uses fixture strings).
pub struct FakeChatModel {
    response: String,
    error_message: Option<String>,
}

impl FakeChatModel {
    /// Fake model returning the given completion text.
    pub fn new(response: &str) -> Self {
        FakeChatModel {
            response: response.to_string(),
            error_message: None,
        }
    }

    /// Fake model that fails with the given message.
    pub fn with_error(message: &str) -> Self {
        FakeChatModel {
            response: String::new(),
            error_message: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl ChatModel for FakeChatModel {
    async fn complete(&self, _prompt: &str) -> Result<String, PlanError> {
        if let Some(message) = &self.error_message {
            return Err(PlanError::Model(message.clone()));
        }
        Ok(self.response.clone())
    }
}
