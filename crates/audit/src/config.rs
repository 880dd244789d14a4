//! Audit configuration loader.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Config file is empty")]
    Empty,

    #[error("Invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Switches gating each audit call site of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Master switch; when off no event is emitted regardless of the others.
    pub enabled: bool,
    pub log_tool_access_checks: bool,
    pub log_tool_invocations: bool,
    pub log_tool_results: bool,
    /// Redact sensitive argument values before invocation events are recorded.
    pub sanitize_tool_parameters: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_tool_access_checks: true,
            log_tool_invocations: true,
            log_tool_results: true,
            sanitize_tool_parameters: true,
        }
    }
}

impl AuditConfig {
    /// Everything off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            log_tool_access_checks: false,
            log_tool_invocations: false,
            log_tool_results: false,
            sanitize_tool_parameters: false,
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Load audit configuration from a YAML file.
///
/// # Errors
/// Returns error if the file is missing, empty, or not valid YAML
pub fn load_audit_config(config_path: impl AsRef<Path>) -> Result<AuditConfig, ConfigError> {
    let config_path = config_path.as_ref();

    if !config_path.exists() {
        return Err(ConfigError::NotFound(config_path.display().to_string()));
    }

    let content = std::fs::read_to_string(config_path)?;
    AuditConfig::from_yaml_str(&content)
}
