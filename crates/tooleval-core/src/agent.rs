//! Agent contract consumed by the evaluation runner.
//!
//! The agent under test is an external collaborator. The harness only needs
//! one operation from it: accept an [`InvocationEnvelope`] and either return
//! an [`AgentOutput`] or fail with an [`AgentError`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Placeholder summary used when the agent returns no `output` field.
pub const MISSING_OUTPUT_PLACEHOLDER: &str = "Yanıt Bulunamadı";

/// Uniform request passed to the agent for every scenario.
///
/// The conversation history is always empty so that no scenario can observe
/// state left behind by another one.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvocationEnvelope {
    input: String,
    #[serde(rename = "chat_history")]
    conversation_history: Vec<Value>,
}

impl InvocationEnvelope {
    /// Build a fresh envelope for a single request.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            conversation_history: Vec::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn conversation_history(&self) -> &[Value] {
        &self.conversation_history
    }
}

/// Result returned by a successful agent invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentOutput {
    /// Final answer text, if the agent produced one.
    #[serde(default)]
    pub output: Option<String>,
}

impl AgentOutput {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Lenient extraction from an arbitrary JSON result object.
    ///
    /// A string `output` is taken as-is, any other non-null value is rendered
    /// as JSON text, and a missing or null field yields no output.
    pub fn from_value(value: &Value) -> Self {
        let output = match value.get("output") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        Self { output }
    }

    /// Summary text for the report, falling back to the placeholder.
    pub fn summary(&self) -> &str {
        self.output.as_deref().unwrap_or(MISSING_OUTPUT_PLACEHOLDER)
    }
}

/// Failure signalled by the agent during a single invocation.
///
/// `Display` renders only the message; [`AgentError::kind`] carries the
/// classification shown in the report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Tool(String),

    #[error("{0}")]
    MalformedOutput(String),

    #[error("{0}")]
    Other(String),

    /// Error with a kind name supplied by the agent itself.
    #[error("{message}")]
    Custom { kind: String, message: String },
}

impl AgentError {
    pub fn custom(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Kind name used to classify the failure in the report.
    pub fn kind(&self) -> &str {
        match self {
            Self::Timeout(_) => "TimeoutError",
            Self::Network(_) => "NetworkError",
            Self::Tool(_) => "ToolError",
            Self::MalformedOutput(_) => "MalformedOutput",
            Self::Other(_) => "AgentError",
            Self::Custom { kind, .. } => kind.as_str(),
        }
    }
}

/// The system under test.
///
/// Implementations are constructed once and shared read-only across every
/// scenario of a run.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn invoke(&self, envelope: &InvocationEnvelope) -> Result<AgentOutput, AgentError>;
}

#[async_trait]
impl<A: Agent + ?Sized> Agent for Arc<A> {
    async fn invoke(&self, envelope: &InvocationEnvelope) -> Result<AgentOutput, AgentError> {
        (**self).invoke(envelope).await
    }
}

#[async_trait]
impl<A: Agent + ?Sized> Agent for Box<A> {
    async fn invoke(&self, envelope: &InvocationEnvelope) -> Result<AgentOutput, AgentError> {
        (**self).invoke(envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_history_is_empty() {
        let envelope = InvocationEnvelope::new("2 + 2 kaç eder?");
        assert_eq!(envelope.input(), "2 + 2 kaç eder?");
        assert!(envelope.conversation_history().is_empty());
    }

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = InvocationEnvelope::new("hello");
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(value, json!({"input": "hello", "chat_history": []}));
    }

    #[test]
    fn test_output_summary_falls_back_to_placeholder() {
        assert_eq!(AgentOutput::empty().summary(), MISSING_OUTPUT_PLACEHOLDER);
        assert_eq!(AgentOutput::new("4").summary(), "4");
    }

    #[test]
    fn test_output_from_value_shapes() {
        assert_eq!(AgentOutput::from_value(&json!({"output": "4"})).summary(), "4");
        assert_eq!(
            AgentOutput::from_value(&json!({"output": null})).summary(),
            MISSING_OUTPUT_PLACEHOLDER
        );
        assert_eq!(
            AgentOutput::from_value(&json!({"answer": "x"})).summary(),
            MISSING_OUTPUT_PLACEHOLDER
        );
        assert_eq!(AgentOutput::from_value(&json!({"output": 42})).summary(), "42");
        assert_eq!(
            AgentOutput::from_value(&json!(["not", "an", "object"])).summary(),
            MISSING_OUTPUT_PLACEHOLDER
        );
    }

    #[test]
    fn test_output_deserialize_missing_field() {
        let output: AgentOutput = serde_json::from_str("{}").expect("deserialize");
        assert!(output.output.is_none());
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(AgentError::Timeout("t".into()).kind(), "TimeoutError");
        assert_eq!(AgentError::Network("n".into()).kind(), "NetworkError");
        assert_eq!(AgentError::Tool("x".into()).kind(), "ToolError");
        assert_eq!(AgentError::MalformedOutput("m".into()).kind(), "MalformedOutput");
        assert_eq!(AgentError::Other("o".into()).kind(), "AgentError");
        assert_eq!(AgentError::custom("ValueError", "bad").kind(), "ValueError");
    }

    #[test]
    fn test_error_display_is_message_only() {
        let err = AgentError::Timeout("upstream took too long".into());
        assert_eq!(err.to_string(), "upstream took too long");

        let err = AgentError::custom("KeyError", "'output'");
        assert_eq!(err.to_string(), "'output'");
    }
}
