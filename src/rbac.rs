//! RBAC policy: which tools a user may invoke.
//!
//! The policy is an injectable capability so the engine's contract does not
//! change when per-role policies replace the wildcard default.

use std::collections::HashSet;

use async_trait::async_trait;

/// Decides whether a user may invoke a given tool.
///
/// Pure decision, no side effects. Called once per step by the engine.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn is_allowed(&self, user_id: Option<&str>, tool: &str) -> bool;
}

/// Wildcard policy: every tool for every user.
///
/// Placeholder so the execution path is testable end to end. Not a security
/// boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AllowAll {
    /// Tool names the user is allowed to invoke; `"*"` means everything.
    pub fn allowed_tools(&self, _user_id: Option<&str>) -> HashSet<String> {
        let mut allowed = HashSet::new();
        allowed.insert("*".to_string());
        allowed
    }
}

#[async_trait]
impl Authorizer for AllowAll {
    async fn is_allowed(&self, user_id: Option<&str>, tool: &str) -> bool {
        let allowed = self.allowed_tools(user_id);
        allowed.contains("*") || allowed.contains(tool)
    }
}
