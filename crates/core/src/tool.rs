use crate::context::ToolContext;
use crate::error::ToolError;
use crate::schema::{ArgsSchema, ToolArgs};
use crate::types::{ToolResult, ToolSchema};
use async_trait::async_trait;
use std::sync::Arc;

/// A named, schema-described capability the agent can invoke.
///
/// `execute` receives arguments already validated by `args_schema()` and
/// possibly rewritten by the registry's argument transform.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique, stable identifier, e.g. `run_sql`.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Groups allowed to call this tool. Empty means everyone.
    fn access_groups(&self) -> Vec<String> {
        Vec::new()
    }

    fn args_schema(&self) -> Arc<dyn ArgsSchema>;

    async fn execute(&self, ctx: &ToolContext, args: ToolArgs) -> Result<ToolResult, ToolError>;
}

/// Derived operations available on every tool.
pub trait ToolExt: Tool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.args_schema().json_schema(),
            access_groups: self.access_groups(),
        }
    }
}

impl<T: Tool + ?Sized> ToolExt for T {}

/// Recovers the concrete argument type inside a tool body.
pub fn expect_args<T: std::any::Any>(tool: &str, args: ToolArgs) -> Result<T, ToolError> {
    args.into_inner::<T>()
        .map_err(|_| ToolError::ArgumentType(tool.to_string()))
}
