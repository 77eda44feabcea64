//! HTTP client for the worker's `POST /tools/invoke`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Fixed overall timeout per tool invocation.
pub const INVOKE_TIMEOUT: Duration = Duration::from_secs(60);

/// Raised when `/tools/invoke` returns a non-2xx status, an invalid success
/// body, or a network/timeout failure (`status_code: None`).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct WorkerInvokeError {
    pub status_code: Option<u16>,
    pub message: String,
    pub body: Option<Value>,
}

impl WorkerInvokeError {
    fn network(message: impl Into<String>) -> Self {
        WorkerInvokeError {
            status_code: None,
            message: message.into(),
            body: None,
        }
    }
}

/// Performs a single remote tool invocation.
///
/// Returns the worker's `result` payload on success.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn invoke(
        &self,
        tool: &str,
        args: &Map<String, Value>,
    ) -> Result<Value, WorkerInvokeError>;
}

/// Optional invocation fields forwarded to the worker when supplied.
///
/// Part of the wire contract; the current planner never sets them.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    pub action: Option<String>,
    pub session_key: Option<String>,
}

/// Reqwest-backed client for the worker endpoint.
pub struct WorkerClient {
    client: Client,
    base_url: String,
    token: String,
}

impl WorkerClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        WorkerClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        }
    }

    /// Call `POST /tools/invoke` with the full wire body.
    pub async fn invoke_with_options(
        &self,
        tool: &str,
        args: &Map<String, Value>,
        options: &InvokeOptions,
    ) -> Result<Value, WorkerInvokeError> {
        let url = format!("{}/tools/invoke", self.base_url);
        let body = build_invoke_body(tool, args, options);

        let mut request = self
            .client
            .post(&url)
            .timeout(INVOKE_TIMEOUT)
            .header("Content-Type", "application/json")
            .json(&body);

        if !self.token.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.token));
        }

        debug!(%tool, %url, "invoking worker tool");
        let response = request
            .send()
            .await
            .map_err(|e| WorkerInvokeError::network(format!("Worker request failed: {}", e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| WorkerInvokeError::network(format!("Worker response unreadable: {}", e)))?;

        triage_response(status, &text)
    }
}

#[async_trait]
impl ToolExecutor for WorkerClient {
    async fn invoke(
        &self,
        tool: &str,
        args: &Map<String, Value>,
    ) -> Result<Value, WorkerInvokeError> {
        self.invoke_with_options(tool, args, &InvokeOptions::default())
            .await
    }
}

/// Assemble the `/tools/invoke` wire body.
///
/// `action` and `sessionKey` are included only when supplied.
pub fn build_invoke_body(tool: &str, args: &Map<String, Value>, options: &InvokeOptions) -> Value {
    let mut body = json!({ "tool": tool, "args": args });
    if let Some(action) = &options.action {
        body["action"] = json!(action);
    }
    if let Some(session_key) = &options.session_key {
        body["sessionKey"] = json!(session_key);
    }
    body
}

/// Classify a worker response ("response triage").
///
/// - 2xx with a body containing `ok: true` → the `result` field.
/// - 2xx otherwise → error with the body attached for diagnostics.
/// - non-2xx → message from `error.message`, else stringified `error`, else
///   the raw body when it is plain text, else `"unknown"`.
///
/// Tolerates non-JSON bodies.
pub fn triage_response(status: u16, body: &str) -> Result<Value, WorkerInvokeError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if (200..300).contains(&status) {
        if let Some(data) = &parsed {
            if data.get("ok") == Some(&Value::Bool(true)) {
                return Ok(data.get("result").cloned().unwrap_or(Value::Null));
            }
        }
        return Err(WorkerInvokeError {
            status_code: Some(status),
            message: "Response ok but missing ok: true or result".to_string(),
            body: Some(parsed.unwrap_or_else(|| Value::String(body.to_string()))),
        });
    }

    let err_body = parsed.unwrap_or_else(|| Value::String(body.to_string()));
    let mut message = "unknown".to_string();
    if let Some(err) = err_body.get("error") {
        message = match err.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => match err {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        };
    } else if let Value::String(s) = &err_body {
        message = s.clone();
    }

    Err(WorkerInvokeError {
        status_code: Some(status),
        message,
        body: Some(err_body),
    })
}
