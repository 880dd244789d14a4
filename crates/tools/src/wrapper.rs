use async_trait::async_trait;
use std::sync::Arc;
use toolgate_core::{ArgsSchema, Tool, ToolArgs, ToolContext, ToolError, ToolResult};

/// Overrides a tool's access groups at registration time; everything else is
/// forwarded to the wrapped tool.
pub(crate) struct AccessGroupsWrapper {
    inner: Arc<dyn Tool>,
    access_groups: Vec<String>,
}

impl AccessGroupsWrapper {
    pub(crate) fn new(inner: Arc<dyn Tool>, access_groups: Vec<String>) -> Self {
        Self {
            inner,
            access_groups,
        }
    }
}

#[async_trait]
impl Tool for AccessGroupsWrapper {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn access_groups(&self) -> Vec<String> {
        self.access_groups.clone()
    }

    fn args_schema(&self) -> Arc<dyn ArgsSchema> {
        self.inner.args_schema()
    }

    async fn execute(&self, ctx: &ToolContext, args: ToolArgs) -> Result<ToolResult, ToolError> {
        self.inner.execute(ctx, args).await
    }
}
