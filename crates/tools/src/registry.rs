use crate::audit_gate::AuditGate;
use crate::error::RegistryError;
use crate::wrapper::AccessGroupsWrapper;
use futures::FutureExt;
use serde_json::json;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use toolgate_audit::{AuditConfig, AuditLogger};
use toolgate_core::{
    Tool, ToolArgs, ToolCall, ToolContext, ToolExt, ToolRejection, ToolResult, ToolSchema, User,
    EXECUTION_TIME_KEY,
};
use toolgate_policy::{AccessDecision, ArgsTransform, NoopTransform};
use tracing::{debug, error, info, warn};

/// Access groups for a tool anyone may call.
pub const UNRESTRICTED: [&str; 0] = [];

/// Catalog of tools plus the guarded execution pipeline.
///
/// Register everything first, then share the registry (e.g. behind an `Arc`)
/// for concurrent `execute` calls; `execute` only needs `&self`.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
    audit_logger: Option<Arc<dyn AuditLogger>>,
    audit_config: AuditConfig,
    transform: Arc<dyn ArgsTransform>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
            audit_logger: None,
            audit_config: AuditConfig::default(),
            transform: Arc::new(NoopTransform),
        }
    }

    pub fn with_audit_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.audit_logger = Some(logger);
        self
    }

    pub fn with_audit_config(mut self, config: AuditConfig) -> Self {
        self.audit_config = config;
        self
    }

    /// Installs the per-user argument policy consulted before every execution.
    pub fn with_transform(mut self, transform: Arc<dyn ArgsTransform>) -> Self {
        self.transform = transform;
        self
    }

    /// Adds `tool` under its name. Non-empty `access_groups` replace the
    /// tool's own groups; repeated groups are kept once, in first-seen order.
    /// Never overwrites an existing entry.
    pub fn register<I, S>(
        &mut self,
        tool: Arc<dyn Tool>,
        access_groups: I,
    ) -> Result<&mut Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = tool.name().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.tools.contains_key(&name) {
            return Err(RegistryError::DuplicateTool { name });
        }

        let mut groups: Vec<String> = Vec::new();
        for group in access_groups {
            let group = group.into();
            if !groups.contains(&group) {
                groups.push(group);
            }
        }

        let tool: Arc<dyn Tool> = if groups.is_empty() {
            tool
        } else {
            Arc::new(AccessGroupsWrapper::new(tool, groups))
        };

        info!(
            "Registered tool: {} (access groups: {:?})",
            name,
            tool.access_groups()
        );
        self.tools.insert(name, tool);
        Ok(self)
    }

    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered names in sorted order.
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Schemas of the tools `user` may call, or of every tool when `user` is `None`.
    /// Emits no audit events.
    pub fn get_schemas(&self, user: Option<&User>) -> Vec<ToolSchema> {
        self.tools
            .values()
            .filter(|&tool| user.map_or(true, |user| self.check_access(tool.as_ref(), user)))
            .map(|tool| tool.schema())
            .collect()
    }

    pub fn check_access(&self, tool: &dyn Tool, user: &User) -> bool {
        toolgate_policy::check_access(tool, user)
    }

    pub async fn transform_args(
        &self,
        tool: &dyn Tool,
        args: ToolArgs,
        user: &User,
        ctx: &ToolContext,
    ) -> Result<ToolArgs, ToolRejection> {
        self.transform.transform(tool, args, user, ctx).await
    }

    /// Runs one tool call through lookup, authorization, validation,
    /// transformation and execution. Every outcome is a `ToolResult`.
    pub async fn execute(&self, tool_call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        info!(
            "Dispatching tool: {} for request: {}",
            tool_call.name, ctx.request_id
        );
        let audit = AuditGate::new(self.audit_logger.as_deref(), &self.audit_config);
        let user = &ctx.user;

        // 1. Resolve
        let Some(tool) = self.get_tool(&tool_call.name) else {
            warn!("Tool not found: {}", tool_call.name);
            return ToolResult::failure(format!("Tool '{}' not found", tool_call.name));
        };

        // 2. Authorize
        let required_groups = tool.access_groups();
        match AccessDecision::evaluate(&required_groups, user) {
            AccessDecision::Denied => {
                let msg = format!("Insufficient group access for tool '{}'", tool_call.name);
                warn!(
                    "Access denied: user {} lacks {:?} for {}",
                    user.id, required_groups, tool_call.name
                );
                if let Some(logger) = audit.access_checks {
                    logger
                        .log_tool_access_check(
                            user,
                            &tool_call.name,
                            false,
                            &required_groups,
                            ctx,
                            Some(msg.as_str()),
                        )
                        .await;
                }
                return ToolResult::failure(msg);
            }
            AccessDecision::Granted(group) => {
                debug!("Access to {} granted via group {}", tool_call.name, group)
            }
            AccessDecision::Unrestricted => {}
        }

        // 3. Validate
        let validated = std::panic::catch_unwind(AssertUnwindSafe(|| {
            tool.args_schema().validate(&tool_call.arguments)
        }));
        let args = match validated {
            Ok(Ok(args)) => args,
            Ok(Err(e)) => {
                debug!("Invalid arguments for {}: {}", tool_call.name, e);
                return ToolResult::failure(format!("Invalid arguments: {e}"));
            }
            Err(panic) => {
                error!("Argument validation panicked for {}", tool_call.name);
                return ToolResult::failure(format!(
                    "Invalid arguments: {}",
                    panic_message(panic.as_ref())
                ));
            }
        };

        // 4. Transform
        let transformed = AssertUnwindSafe(self.transform_args(tool.as_ref(), args, user, ctx))
            .catch_unwind()
            .await;
        let args = match transformed {
            Ok(Ok(args)) => args,
            Ok(Err(rejection)) => {
                debug!("Tool {} rejected: {}", tool_call.name, rejection);
                return ToolResult::failure(rejection.reason);
            }
            Err(panic) => {
                let msg = panic_message(panic.as_ref());
                error!("Argument transform panicked for {}: {}", tool_call.name, msg);
                return ToolResult::failure(format!("Argument transform failed: {msg}"));
            }
        };

        // 5. Pre-execution audit
        if let Some(logger) = audit.access_checks {
            logger
                .log_tool_access_check(user, &tool_call.name, true, &required_groups, ctx, None)
                .await;
        }
        if let Some(logger) = audit.invocations {
            let ui_features = ctx.ui_features_available();
            logger
                .log_tool_invocation(
                    user,
                    tool_call,
                    &ui_features,
                    ctx,
                    audit.sanitize_parameters,
                )
                .await;
        }

        // 6. Execute
        let started = Instant::now();
        let outcome = AssertUnwindSafe(tool.execute(ctx, args))
            .catch_unwind()
            .await;
        let execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let mut result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                error!("Tool {} failed: {}", tool_call.name, e);
                return ToolResult::failure(format!("Execution failed: {e}"));
            }
            Err(panic) => {
                let msg = panic_message(panic.as_ref());
                error!("Tool {} panicked: {}", tool_call.name, msg);
                return ToolResult::failure(format!("Execution failed: {msg}"));
            }
        };

        // 7. Stamp and audit
        result
            .metadata
            .insert(EXECUTION_TIME_KEY.to_string(), json!(execution_time_ms));
        info!(
            "Tool {} finished in {:.2}ms (success: {})",
            tool_call.name, execution_time_ms, result.success
        );

        if let Some(logger) = audit.results {
            logger.log_tool_result(user, tool_call, &result, ctx).await;
        }

        result
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("audit_logger", &self.audit_logger.is_some())
            .field("audit_config", &self.audit_config)
            .finish_non_exhaustive()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use toolgate_core::{ArgsSchema, RawArgs, ToolError};

    struct NamedTool(&'static str);

    #[async_trait]
    impl Tool for NamedTool {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn args_schema(&self) -> Arc<dyn ArgsSchema> {
            RawArgs::shared(json!({"type": "object"}))
        }

        async fn execute(
            &self,
            _ctx: &ToolContext,
            _args: ToolArgs,
        ) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::success(self.0))
        }
    }

    struct PanickingSchema;

    impl ArgsSchema for PanickingSchema {
        fn validate(&self, _raw: &Value) -> Result<ToolArgs, toolgate_core::ValidationError> {
            panic!("schema exploded");
        }

        fn json_schema(&self) -> Value {
            json!({})
        }
    }

    struct BrokenSchemaTool;

    #[async_trait]
    impl Tool for BrokenSchemaTool {
        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "schema panics"
        }

        fn args_schema(&self) -> Arc<dyn ArgsSchema> {
            Arc::new(PanickingSchema)
        }

        async fn execute(
            &self,
            _ctx: &ToolContext,
            _args: ToolArgs,
        ) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::success("unreachable"))
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(NamedTool("a")), UNRESTRICTED)
            .unwrap();

        assert!(registry.get_tool("a").is_some());
        assert!(registry.get_tool("missing").is_none());
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_register_chainable() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(NamedTool("b")), UNRESTRICTED)
            .unwrap()
            .register(Arc::new(NamedTool("a")), ["admin"])
            .unwrap();
        assert_eq!(registry.list_tools(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = ToolRegistry::new();
        let Err(err) = registry.register(Arc::new(NamedTool("")), UNRESTRICTED) else {
            panic!("tool with empty name was registered");
        };
        assert_eq!(err, RegistryError::EmptyName);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_register_dedupes_owned_groups() {
        let groups: Vec<String> = vec!["analyst".into(), "admin".into(), "analyst".into()];
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(NamedTool("report")), groups)
            .unwrap();

        let tool = registry.get_tool("report").unwrap();
        assert_eq!(tool.access_groups(), vec!["analyst", "admin"]);
    }

    #[test]
    fn test_debug_lists_tool_names() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(NamedTool("a")), UNRESTRICTED)
            .unwrap();
        let rendered = format!("{registry:?}");
        assert!(rendered.contains("tools: [\"a\"]"));
        assert!(rendered.contains("audit_logger: false"));
    }

    #[test]
    fn test_register_wraps_only_with_groups() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(NamedTool("open")), UNRESTRICTED)
            .unwrap();
        registry
            .register(Arc::new(NamedTool("closed")), ["admin", "analyst"])
            .unwrap();

        let open = registry.get_tool("open").unwrap();
        let closed = registry.get_tool("closed").unwrap();
        assert!(open.access_groups().is_empty());
        assert_eq!(closed.access_groups(), vec!["admin", "analyst"]);
    }

    #[test]
    fn test_panic_message_variants() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "borrowed");
        assert_eq!(panic_message(other.as_ref()), "tool panicked");
    }

    #[tokio::test]
    async fn test_validation_panic_is_contained() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(BrokenSchemaTool), UNRESTRICTED)
            .unwrap();

        let ctx = ToolContext::new(User::new("u"));
        let result = registry
            .execute(&ToolCall::new("broken", json!({})), &ctx)
            .await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Invalid arguments: schema exploded"));
    }
}
