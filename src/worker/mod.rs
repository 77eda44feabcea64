//! Client for the OpenClaw worker's tool invocation endpoint.

mod client;

pub use client::{
    build_invoke_body, triage_response, InvokeOptions, ToolExecutor, WorkerClient,
    WorkerInvokeError, INVOKE_TIMEOUT,
};
