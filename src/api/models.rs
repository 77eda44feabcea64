//! Request and response bodies for the execute endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /execute`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    pub prompt: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Business-level outcome of a run. Always carried in a 200 response;
/// callers inspect this field, not the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteStatus {
    Success,
    Error,
    PendingApproval,
}

/// Body of the `POST /execute` response.
///
/// `output` is the step-result list for success and pending-approval, or the
/// annotated error message for errors.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteResponse {
    pub status: ExecuteStatus,
    pub output: Value,
}
