//! Harness-level error taxonomy.
//!
//! Only construction of the agent and writing the report can fail at this
//! level. Errors raised by the agent during a scenario never surface here;
//! they become [`crate::outcome::Outcome::Failure`] records.

/// Errors that abort the harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("missing agent configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[error("invalid agent configuration {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("failed to build agent client: {0}")]
    AgentBuild(String),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_display() {
        let err = HarnessError::MissingConfig("TOOLEVAL_AGENT_URL");
        assert!(err.to_string().contains("TOOLEVAL_AGENT_URL"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = HarnessError::InvalidConfig {
            key: "TOOLEVAL_AGENT_TIMEOUT_SECS",
            reason: "not a number".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("TOOLEVAL_AGENT_TIMEOUT_SECS"));
        assert!(msg.contains("not a number"));
    }

    #[test]
    fn test_io_error_display() {
        let err = HarnessError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "closed",
        ));
        assert!(err.to_string().contains("failed to write report"));
    }
}
