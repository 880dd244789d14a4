use thiserror::Error;

/// Failure raised by a tool body. The registry converts every variant into a
/// failed `ToolResult`.
#[derive(Error, Debug, Clone)]
pub enum ToolError {
    #[error("{0}")]
    ExecutionFailed(String),

    #[error("Unexpected argument type for tool '{0}'")]
    ArgumentType(String),
}

/// Argument validation failure with a human-readable diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    /// Dotted path of the offending field, when known.
    pub path: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    pub fn at(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path.into()),
        }
    }
}
