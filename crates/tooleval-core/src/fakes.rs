//! In-memory agent double for tests and dry runs.
//!
//! Responses are matched by request text; every received envelope is
//! recorded so tests can assert on what the runner sent.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::agent::{Agent, AgentError, AgentOutput, InvocationEnvelope};

/// Scripted reply for one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Output(AgentOutput),
    Error(AgentError),
    /// Sleep, then return the inner reply.
    Delayed(Duration, Box<Reply>),
}

/// Agent whose replies are fixed ahead of time.
///
/// Requests without a scripted reply fail with an `AgentError`.
#[derive(Debug, Default)]
pub struct ScriptedAgent {
    replies: HashMap<String, Reply>,
    received: Mutex<Vec<InvocationEnvelope>>,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, input: impl Into<String>, reply: Reply) -> Self {
        self.replies.insert(input.into(), reply);
        self
    }

    pub fn with_output(self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.with_reply(input, Reply::Output(AgentOutput::new(output)))
    }

    pub fn with_error(self, input: impl Into<String>, error: AgentError) -> Self {
        self.with_reply(input, Reply::Error(error))
    }

    /// Envelopes received so far, in call order.
    pub fn received(&self) -> Vec<InvocationEnvelope> {
        self.received
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    async fn invoke(&self, envelope: &InvocationEnvelope) -> Result<AgentOutput, AgentError> {
        if let Ok(mut guard) = self.received.lock() {
            guard.push(envelope.clone());
        }

        let mut reply = self.replies.get(envelope.input()).cloned().ok_or_else(|| {
            AgentError::Other(format!("no scripted reply for '{}'", envelope.input()))
        })?;

        loop {
            match reply {
                Reply::Output(output) => return Ok(output),
                Reply::Error(err) => return Err(err),
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_output_and_recording() {
        let agent = ScriptedAgent::new().with_output("q", "a");
        let output = agent.invoke(&InvocationEnvelope::new("q")).await.expect("reply");
        assert_eq!(output.summary(), "a");
        assert_eq!(agent.call_count(), 1);
        assert_eq!(agent.received()[0].input(), "q");
    }

    #[tokio::test]
    async fn test_unscripted_request_fails() {
        let agent = ScriptedAgent::new();
        let err = agent
            .invoke(&InvocationEnvelope::new("unknown"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "AgentError");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_reply() {
        let agent = ScriptedAgent::new().with_reply(
            "slow",
            Reply::Delayed(
                Duration::from_secs(5),
                Box::new(Reply::Output(AgentOutput::new("done"))),
            ),
        );
        let output = agent.invoke(&InvocationEnvelope::new("slow")).await.expect("reply");
        assert_eq!(output.summary(), "done");
    }
}
