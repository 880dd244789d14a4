use thiserror::Error;

/// Registration failures. These are configuration mistakes, so unlike
/// invocation failures they are returned to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool '{name}' already registered")]
    DuplicateTool { name: String },

    #[error("Tool name must not be empty")]
    EmptyName,
}
