use crate::logger::AuditLogger;
use crate::sanitize::sanitize_arguments;
use async_trait::async_trait;
use serde_json::{json, Value};
use toolgate_core::{ToolCall, ToolContext, ToolResult, User};
use tracing::info;

/// Audit sink that emits each event as a JSON record on the `toolgate::audit`
/// tracing target. Nothing is persisted; route the target with a subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditLogger;

impl TracingAuditLogger {
    pub fn new() -> Self {
        Self
    }

    fn envelope(event_type: &str, user: &User, ctx: &ToolContext, details: Value) -> Value {
        json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "event_type": event_type,
            "user_id": user.id,
            "username": user.username,
            "conversation_id": ctx.conversation_id,
            "request_id": ctx.request_id,
            "details": details,
        })
    }

    pub fn access_check_record(
        user: &User,
        tool_name: &str,
        access_granted: bool,
        required_groups: &[String],
        ctx: &ToolContext,
        reason: Option<&str>,
    ) -> Value {
        Self::envelope(
            "tool_access_check",
            user,
            ctx,
            json!({
                "tool_name": tool_name,
                "access_granted": access_granted,
                "required_groups": required_groups,
                "user_groups": user.group_memberships,
                "reason": reason,
            }),
        )
    }

    pub fn invocation_record(
        user: &User,
        tool_call: &ToolCall,
        ui_features: &[String],
        ctx: &ToolContext,
        sanitize_parameters: bool,
    ) -> Value {
        let parameters = if sanitize_parameters {
            sanitize_arguments(&tool_call.arguments)
        } else {
            tool_call.arguments.clone()
        };

        Self::envelope(
            "tool_invocation",
            user,
            ctx,
            json!({
                "tool_call_id": tool_call.id,
                "tool_name": tool_call.name,
                "parameters": parameters,
                "parameters_sanitized": sanitize_parameters,
                "ui_features_available": ui_features,
            }),
        )
    }

    pub fn result_record(
        user: &User,
        tool_call: &ToolCall,
        result: &ToolResult,
        ctx: &ToolContext,
    ) -> Value {
        Self::envelope(
            "tool_result",
            user,
            ctx,
            json!({
                "tool_call_id": tool_call.id,
                "tool_name": tool_call.name,
                "success": result.success,
                "error": result.error,
                "execution_time_ms": result.execution_time_ms(),
                "result_length": result.result_for_llm.len(),
                "has_ui_component": result.ui_component.is_some(),
            }),
        )
    }
}

#[async_trait]
impl AuditLogger for TracingAuditLogger {
    async fn log_tool_access_check(
        &self,
        user: &User,
        tool_name: &str,
        access_granted: bool,
        required_groups: &[String],
        ctx: &ToolContext,
        reason: Option<&str>,
    ) {
        let record =
            Self::access_check_record(user, tool_name, access_granted, required_groups, ctx, reason);
        info!(target: "toolgate::audit", event = "tool_access_check", "{}", record);
    }

    async fn log_tool_invocation(
        &self,
        user: &User,
        tool_call: &ToolCall,
        ui_features: &[String],
        ctx: &ToolContext,
        sanitize_parameters: bool,
    ) {
        let record =
            Self::invocation_record(user, tool_call, ui_features, ctx, sanitize_parameters);
        info!(target: "toolgate::audit", event = "tool_invocation", "{}", record);
    }

    async fn log_tool_result(
        &self,
        user: &User,
        tool_call: &ToolCall,
        result: &ToolResult,
        ctx: &ToolContext,
    ) {
        let record = Self::result_record(user, tool_call, result, ctx);
        info!(target: "toolgate::audit", event = "tool_result", "{}", record);
    }
}
