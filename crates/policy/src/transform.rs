//! Per-user argument rewriting.
//!
//! The registry hands every validated call to its `ArgsTransform` before the
//! tool runs. A transform may rewrite the arguments (row-level security,
//! redaction, defaulting from user attributes) or refuse the call with a
//! `ToolRejection`.

use async_trait::async_trait;
use toolgate_core::{Tool, ToolArgs, ToolContext, ToolRejection, User};

#[async_trait]
pub trait ArgsTransform: Send + Sync {
    async fn transform(
        &self,
        tool: &dyn Tool,
        args: ToolArgs,
        user: &User,
        ctx: &ToolContext,
    ) -> Result<ToolArgs, ToolRejection>;
}

/// Identity transform used when no policy is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTransform;

#[async_trait]
impl ArgsTransform for NoopTransform {
    async fn transform(
        &self,
        _tool: &dyn Tool,
        args: ToolArgs,
        _user: &User,
        _ctx: &ToolContext,
    ) -> Result<ToolArgs, ToolRejection> {
        Ok(args)
    }
}

/// Adapts a synchronous closure into an `ArgsTransform`.
pub struct FnTransform<F> {
    f: F,
}

impl<F> FnTransform<F>
where
    F: Fn(&dyn Tool, ToolArgs, &User, &ToolContext) -> Result<ToolArgs, ToolRejection>
        + Send
        + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> ArgsTransform for FnTransform<F>
where
    F: Fn(&dyn Tool, ToolArgs, &User, &ToolContext) -> Result<ToolArgs, ToolRejection>
        + Send
        + Sync,
{
    async fn transform(
        &self,
        tool: &dyn Tool,
        args: ToolArgs,
        user: &User,
        ctx: &ToolContext,
    ) -> Result<ToolArgs, ToolRejection> {
        (self.f)(tool, args, user, ctx)
    }
}
