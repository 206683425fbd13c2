//! Per-scenario outcome records.

use std::time::Duration;

use crate::agent::AgentError;

/// Maximum number of characters of an error message kept in the report.
pub const ERROR_MESSAGE_LIMIT: usize = 100;

/// Terminal state of one scenario evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Agent returned normally; carries the summary text shown in the report.
    Success { summary: String },

    /// Agent signalled an error; carries its kind and a truncated message.
    Failure { kind: String, message: String },
}

impl Outcome {
    /// Classify an agent error, truncating its message to [`ERROR_MESSAGE_LIMIT`].
    pub fn from_error(err: &AgentError) -> Self {
        Self::Failure {
            kind: err.kind().to_string(),
            message: truncate_chars(&err.to_string(), ERROR_MESSAGE_LIMIT),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Ephemeral record produced for a single scenario and consumed by the reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRecord {
    /// Zero-based position in the scenario set.
    pub scenario_index: usize,

    /// Wall-clock time spent inside the agent invocation.
    pub duration: Duration,

    pub outcome: Outcome,
}

impl OutcomeRecord {
    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// First `limit` characters of `s`, never splitting a UTF-8 code point.
pub fn truncate_chars(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_message_unchanged() {
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "x".repeat(250);
        assert_eq!(truncate_chars(&long, 100).chars().count(), 100);
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let turkish = "ğ".repeat(150);
        let truncated = truncate_chars(&turkish, 100);
        assert_eq!(truncated.chars().count(), 100);
        assert_eq!(truncated.len(), 200);
    }

    #[test]
    fn test_from_error_keeps_kind_and_truncates() {
        let err = AgentError::Network("n".repeat(500));
        match Outcome::from_error(&err) {
            Outcome::Failure { kind, message } => {
                assert_eq!(kind, "NetworkError");
                assert_eq!(message.len(), ERROR_MESSAGE_LIMIT);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_is_success() {
        assert!(Outcome::Success {
            summary: "4".into()
        }
        .is_success());
        assert!(!Outcome::from_error(&AgentError::Other("boom".into())).is_success());
    }
}
