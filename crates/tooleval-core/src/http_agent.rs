//! HTTP-backed agent.
//!
//! Forwards each [`InvocationEnvelope`] as JSON to an agent service and
//! decodes `{"output": ...}` from the response. Connection settings come from
//! the environment:
//!
//! - `TOOLEVAL_AGENT_URL` (required)
//! - `TOOLEVAL_AGENT_TOKEN` (optional bearer token)
//! - `TOOLEVAL_AGENT_TIMEOUT_SECS` (optional client timeout, unset = none)

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::agent::{Agent, AgentError, AgentOutput, InvocationEnvelope};
use crate::error::{HarnessError, Result};
use crate::outcome::truncate_chars;

pub const AGENT_URL_ENV: &str = "TOOLEVAL_AGENT_URL";
pub const AGENT_TOKEN_ENV: &str = "TOOLEVAL_AGENT_TOKEN";
pub const AGENT_TIMEOUT_ENV: &str = "TOOLEVAL_AGENT_TIMEOUT_SECS";

const ERROR_BODY_PREVIEW: usize = 200;

/// Connection settings for the agent service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Endpoint receiving the envelope via `POST`.
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl AgentConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            timeout: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(AGENT_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(HarnessError::MissingConfig(AGENT_URL_ENV))?;

        let url = reqwest::Url::parse(&endpoint).map_err(|e| HarnessError::InvalidConfig {
            key: AGENT_URL_ENV,
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HarnessError::InvalidConfig {
                key: AGENT_URL_ENV,
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let token = lookup(AGENT_TOKEN_ENV).filter(|v| !v.is_empty());

        let timeout = match lookup(AGENT_TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| HarnessError::InvalidConfig {
                    key: AGENT_TIMEOUT_ENV,
                    reason: format!("'{raw}' is not a whole number of seconds"),
                })?;
                if secs == 0 {
                    return Err(HarnessError::InvalidConfig {
                        key: AGENT_TIMEOUT_ENV,
                        reason: "timeout must be at least one second; unset it to disable".into(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            endpoint,
            token,
            timeout,
        })
    }
}

/// Agent reached over HTTP.
pub struct HttpAgent {
    config: AgentConfig,
    client: reqwest::Client,
}

impl HttpAgent {
    pub fn new(config: AgentConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("tooleval/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HarnessError::AgentBuild(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Construct the agent under test from the environment.
///
/// Failure here is fatal for the harness: without an agent there is nothing
/// to evaluate.
pub fn build_agent() -> Result<HttpAgent> {
    let agent = HttpAgent::new(AgentConfig::from_env()?)?;
    let config = agent.config();
    info!(
        endpoint = %config.endpoint,
        authenticated = config.token.is_some(),
        timeout_secs = config.timeout.map(|t| t.as_secs()),
        "agent configured"
    );
    Ok(agent)
}

#[async_trait]
impl Agent for HttpAgent {
    async fn invoke(
        &self,
        envelope: &InvocationEnvelope,
    ) -> std::result::Result<AgentOutput, AgentError> {
        let mut request = self.client.post(&self.config.endpoint).json(envelope);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(classify_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_transport_error)?;
        debug!(status, bytes = body.len(), "agent responded");

        decode_response(status, &body)
    }
}

/// Turn an HTTP status and body into the agent's result.
///
/// Non-2xx responses carrying `{"error": {"kind", "message"}}` keep the
/// service's own error kind; anything else is reported as a `ToolError`.
pub fn decode_response(status: u16, body: &str) -> std::result::Result<AgentOutput, AgentError> {
    if !(200..300).contains(&status) {
        if let Some(err) = structured_error(body) {
            return Err(err);
        }
        return Err(AgentError::Tool(format!(
            "agent service returned HTTP {status}: {}",
            truncate_chars(body, ERROR_BODY_PREVIEW)
        )));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| AgentError::MalformedOutput(format!("response is not JSON: {e}")))?;
    Ok(AgentOutput::from_value(&value))
}

fn structured_error(body: &str) -> Option<AgentError> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    let kind = error.get("kind")?.as_str()?;
    let message = error.get("message").and_then(Value::as_str).unwrap_or("");
    Some(AgentError::custom(kind, message))
}

fn classify_transport_error(err: reqwest::Error) -> AgentError {
    let message = error_chain(&err);
    if err.is_timeout() {
        AgentError::Timeout(message)
    } else if err.is_connect() || err.is_request() {
        AgentError::Network(message)
    } else if err.is_decode() || err.is_body() {
        AgentError::MalformedOutput(message)
    } else {
        AgentError::Other(message)
    }
}

/// `err` followed by every cause in its source chain, joined by `": "`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
