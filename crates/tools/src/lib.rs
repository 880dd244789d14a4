//! Tool catalog and the guarded execution pipeline.

mod audit_gate;
pub mod error;
pub mod registry;
mod wrapper;

pub use error::RegistryError;
pub use registry::{ToolRegistry, UNRESTRICTED};

pub use toolgate_audit::{AuditConfig, AuditLogger, TracingAuditLogger};
pub use toolgate_core::{
    expect_args, ArgsSchema, RawArgs, Tool, ToolArgs, ToolCall, ToolContext, ToolError, ToolExt,
    ToolRejection, ToolResult, ToolSchema, TypedArgs, User, ValidationError,
};
pub use toolgate_policy::{ArgsTransform, FnTransform, NoopTransform};
