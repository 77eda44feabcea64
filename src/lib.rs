//! OpenClaw Gateway: plan → execute control loop over the OpenClaw worker.
//!
//! The gateway accepts a natural-language prompt over HTTP, asks an LLM to
//! turn it into an ordered list of tool steps, then executes those steps one
//! at a time against the remote worker with an RBAC check before each call.

pub mod api;
pub mod config;
pub mod engine;
pub mod planner;
pub mod rbac;
pub mod worker;

// Re-export the engine types for convenience
pub use engine::{
    AlwaysRequire, ApprovalPolicy, ExecutionEngine, NeverRequire, RunState, RunStatus, Step,
    StepResult,
};

// Re-export capability seams
pub use config::Settings;
pub use planner::{LlmPlanner, PlanError, Planner};
pub use rbac::{AllowAll, Authorizer};
pub use worker::{InvokeOptions, ToolExecutor, WorkerClient, WorkerInvokeError};
