use async_trait::async_trait;
use toolgate_core::{ToolCall, ToolContext, ToolResult, User};

/// Sink for tool access checks, invocations and results.
///
/// Calls are fire-and-forget from the registry's side: implementations must
/// contain their own failures.
#[async_trait]
pub trait AuditLogger: Send + Sync {
    async fn log_tool_access_check(
        &self,
        user: &User,
        tool_name: &str,
        access_granted: bool,
        required_groups: &[String],
        ctx: &ToolContext,
        reason: Option<&str>,
    );

    async fn log_tool_invocation(
        &self,
        user: &User,
        tool_call: &ToolCall,
        ui_features: &[String],
        ctx: &ToolContext,
        sanitize_parameters: bool,
    );

    async fn log_tool_result(
        &self,
        user: &User,
        tool_call: &ToolCall,
        result: &ToolResult,
        ctx: &ToolContext,
    );
}
