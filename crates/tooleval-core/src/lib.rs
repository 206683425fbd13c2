//! Tool-selection evaluation harness.
//!
//! Feeds a fixed battery of scenarios to an agent, times every invocation,
//! and prints a pass/fail report. A failing scenario never stops the batch.

pub mod agent;
pub mod error;
pub mod fakes;
pub mod http_agent;
pub mod obs;
pub mod outcome;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod telemetry;

pub use agent::{Agent, AgentError, AgentOutput, InvocationEnvelope, MISSING_OUTPUT_PLACEHOLDER};
pub use error::{HarnessError, Result};
pub use fakes::{Reply, ScriptedAgent};
pub use http_agent::{build_agent, AgentConfig, HttpAgent};
pub use outcome::{Outcome, OutcomeRecord, ERROR_MESSAGE_LIMIT};
pub use report::Reporter;
pub use runner::{evaluate_scenario, run, run_to, RunSummary};
pub use scenario::{Scenario, ScenarioSet};
pub use telemetry::init_tracing;
