//! Gateway configuration from environment.

use tracing::warn;

/// Default worker endpoint (local OpenClaw worker).
pub const DEFAULT_WORKER_URL: &str = "http://127.0.0.1:18789";

/// Default listen port for the gateway itself.
pub const DEFAULT_PORT: u16 = 8000;

/// Default OpenAI-compatible endpoint for the planner model.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default planner model.
pub const DEFAULT_PLANNER_MODEL: &str = "gpt-4o-mini";

/// Runtime settings, read once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the OpenClaw worker.
    pub worker_url: String,
    /// Bearer token for the worker; empty means no Authorization header.
    pub worker_token: String,
    /// Gateway listen port.
    pub port: u16,
    /// API key for the planner model; empty means planning fails at call time.
    pub openai_api_key: String,
    /// Base URL of the OpenAI-compatible planner endpoint.
    pub openai_base_url: String,
    /// Model name used for planning.
    pub planner_model: String,
}

impl Settings {
    /// Load settings from process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Settings {
            worker_url: env_or("OPENCLAW_WORKER_URL", DEFAULT_WORKER_URL),
            worker_token: strip_token(std::env::var("OPENCLAW_WORKER_TOKEN").ok()),
            port: parse_port(std::env::var("PORT").ok()),
            openai_api_key: env_or("OPENAI_API_KEY", ""),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            planner_model: env_or("OPENCLAW_PLANNER_MODEL", DEFAULT_PLANNER_MODEL),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            worker_url: DEFAULT_WORKER_URL.to_string(),
            worker_token: String::new(),
            port: DEFAULT_PORT,
            openai_api_key: String::new(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            planner_model: DEFAULT_PLANNER_MODEL.to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Worker tokens arrive via env files and often carry stray whitespace.
fn strip_token(value: Option<String>) -> String {
    value.unwrap_or_default().trim().to_string()
}

fn parse_port(value: Option<String>) -> u16 {
    match value {
        None => DEFAULT_PORT,
        Some(raw) => match raw.trim().parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                warn!("Invalid PORT value '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }
        },
    }
}
