pub mod context;
pub mod error;
pub mod schema;
pub mod tool;
pub mod types;
pub mod user;

pub use context::{ToolContext, UI_FEATURES_KEY};
pub use error::{ToolError, ValidationError};
pub use schema::{ArgsSchema, RawArgs, ToolArgs, TypedArgs};
pub use tool::{expect_args, Tool, ToolExt};
pub use types::{ToolCall, ToolRejection, ToolResult, ToolSchema, EXECUTION_TIME_KEY};
pub use user::User;
