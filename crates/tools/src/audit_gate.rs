use toolgate_audit::{AuditConfig, AuditLogger};

/// Which audit events one `execute` call emits, resolved once up front from
/// the optional logger and its configuration.
#[derive(Clone, Copy)]
pub(crate) struct AuditGate<'a> {
    pub access_checks: Option<&'a dyn AuditLogger>,
    pub invocations: Option<&'a dyn AuditLogger>,
    pub results: Option<&'a dyn AuditLogger>,
    pub sanitize_parameters: bool,
}

impl<'a> AuditGate<'a> {
    pub fn new(logger: Option<&'a dyn AuditLogger>, config: &AuditConfig) -> Self {
        let logger = logger.filter(|_| config.enabled);
        Self {
            access_checks: logger.filter(|_| config.log_tool_access_checks),
            invocations: logger.filter(|_| config.log_tool_invocations),
            results: logger.filter(|_| config.log_tool_results),
            sanitize_parameters: config.sanitize_tool_parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolgate_audit::TracingAuditLogger;

    #[test]
    fn test_no_logger_disables_everything() {
        let gate = AuditGate::new(None, &AuditConfig::default());
        assert!(gate.access_checks.is_none());
        assert!(gate.invocations.is_none());
        assert!(gate.results.is_none());
    }

    #[test]
    fn test_master_switch() {
        let logger = TracingAuditLogger::new();
        let config = AuditConfig {
            enabled: false,
            ..AuditConfig::default()
        };
        let gate = AuditGate::new(Some(&logger), &config);
        assert!(gate.access_checks.is_none());
        assert!(gate.results.is_none());
    }

    #[test]
    fn test_disabled_config_silences_logger() {
        let logger = TracingAuditLogger::new();
        let gate = AuditGate::new(Some(&logger), &AuditConfig::disabled());
        assert!(gate.access_checks.is_none());
        assert!(gate.invocations.is_none());
        assert!(gate.results.is_none());
        assert!(!gate.sanitize_parameters);
    }

    #[test]
    fn test_individual_switches() {
        let logger = TracingAuditLogger::new();
        let config = AuditConfig {
            log_tool_invocations: false,
            ..AuditConfig::default()
        };
        let gate = AuditGate::new(Some(&logger), &config);
        assert!(gate.access_checks.is_some());
        assert!(gate.invocations.is_none());
        assert!(gate.results.is_some());
        assert!(gate.sanitize_parameters);
    }
}
