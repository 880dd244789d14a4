pub mod config;
pub mod logger;
pub mod sanitize;
pub mod tracing_logger;

pub use config::{load_audit_config, AuditConfig, ConfigError};
pub use logger::AuditLogger;
pub use sanitize::{sanitize_arguments, REDACTED};
pub use tracing_logger::TracingAuditLogger;
