//! Sequential evaluation runner.
//!
//! Drives every scenario through the agent one at a time, times each
//! invocation, and reports the outcome. A failing scenario is recorded and
//! the run moves on; nothing the agent does can stop the batch.

use std::any::Any;
use std::io::{self, Write};
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use tracing::{debug, Instrument};
use uuid::Uuid;

use crate::agent::{Agent, AgentError, InvocationEnvelope};
use crate::error::{HarnessError, Result};
use crate::obs;
use crate::outcome::{Outcome, OutcomeRecord};
use crate::report::Reporter;
use crate::scenario::{Scenario, ScenarioSet};

/// Totals printed in the closing banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Evaluate one scenario and classify the result.
///
/// Never fails: any error, and any panic, raised by the agent becomes an
/// [`Outcome::Failure`]. `index` is zero-based.
pub async fn evaluate_scenario<A>(agent: &A, index: usize, scenario: &Scenario) -> OutcomeRecord
where
    A: Agent + ?Sized,
{
    let start = Instant::now();
    let envelope = InvocationEnvelope::new(scenario.request_text.as_str());

    let result = AssertUnwindSafe(agent.invoke(&envelope))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(panic_to_error(payload)));

    let duration = start.elapsed();

    let outcome = match result {
        Ok(output) => Outcome::Success {
            summary: output.summary().to_string(),
        },
        Err(err) => {
            obs::emit_scenario_failed(index, err.kind(), &err);
            Outcome::from_error(&err)
        }
    };

    obs::emit_scenario_finished(
        index,
        &scenario.expected_capability,
        duration.as_millis() as u64,
        outcome.is_success(),
    );

    OutcomeRecord {
        scenario_index: index,
        duration,
        outcome,
    }
}

/// Run every scenario and print the report to stdout.
pub async fn run<A>(agent: &A, scenarios: &ScenarioSet) -> Result<RunSummary>
where
    A: Agent + ?Sized,
{
    run_to(agent, scenarios, io::stdout()).await
}

/// Run every scenario, writing the report to `out`.
///
/// Only a failure to write the report is returned as an error.
pub async fn run_to<A, W>(agent: &A, scenarios: &ScenarioSet, out: W) -> Result<RunSummary>
where
    A: Agent + ?Sized,
    W: Write,
{
    let run_id = Uuid::new_v4().to_string();
    let span = obs::run_span(&run_id);

    async move {
        let started = Instant::now();
        let total = scenarios.len();
        obs::emit_run_started(&run_id, total);

        let mut reporter = Reporter::new(out);
        let mut summary = RunSummary::default();

        reporter.opening_banner()?;
        for (index, scenario) in scenarios.iter().enumerate() {
            reporter.scenario_header(index, total, scenario)?;
            debug!(scenario = index + 1, "invoking agent");

            let record = evaluate_scenario(agent, index, scenario).await;
            reporter.outcome(&record)?;
            summary.record(&record.outcome);
        }
        reporter.closing_banner(&summary)?;

        obs::emit_run_finished(
            &run_id,
            started.elapsed().as_millis() as u64,
            summary.succeeded,
            summary.failed,
        );
        Ok::<_, HarnessError>(summary)
    }
    .instrument(span)
    .await
}

fn panic_to_error(payload: Box<dyn Any + Send>) -> AgentError {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "agent panicked".to_string()
    };
    AgentError::custom("Panic", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentOutput;
    use async_trait::async_trait;

    struct EchoAgent;

    #[async_trait]
    impl Agent for EchoAgent {
        async fn invoke(
            &self,
            envelope: &InvocationEnvelope,
        ) -> std::result::Result<AgentOutput, AgentError> {
            Ok(AgentOutput::new(envelope.input()))
        }
    }

    struct PanickingAgent;

    #[async_trait]
    impl Agent for PanickingAgent {
        async fn invoke(
            &self,
            _envelope: &InvocationEnvelope,
        ) -> std::result::Result<AgentOutput, AgentError> {
            panic!("tool registry corrupted");
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::default();
        summary.record(&Outcome::Success {
            summary: "ok".into(),
        });
        summary.record(&Outcome::Failure {
            kind: "ToolError".into(),
            message: "bad".into(),
        });
        assert_eq!(
            summary,
            RunSummary {
                total: 2,
                succeeded: 1,
                failed: 1
            }
        );
        assert!(!summary.all_succeeded());
    }

    #[tokio::test]
    async fn test_evaluate_scenario_success() {
        let scenario = Scenario::new("merhaba", "echo");
        let record = evaluate_scenario(&EchoAgent, 3, &scenario).await;
        assert_eq!(record.scenario_index, 3);
        assert_eq!(
            record.outcome,
            Outcome::Success {
                summary: "merhaba".into()
            }
        );
    }

    #[tokio::test]
    async fn test_panic_becomes_failure() {
        let scenario = Scenario::new("anything", "any_tool");
        let record = evaluate_scenario(&PanickingAgent, 0, &scenario).await;
        assert_eq!(
            record.outcome,
            Outcome::Failure {
                kind: "Panic".into(),
                message: "tool registry corrupted".into()
            }
        );
    }

    #[tokio::test]
    async fn test_run_works_through_trait_object() {
        let agent: Box<dyn Agent> = Box::new(EchoAgent);
        let scenarios = ScenarioSet::new(vec![Scenario::new("a", "x")]);
        let summary = run_to(&agent, &scenarios, Vec::new()).await.expect("run");
        assert_eq!(summary.succeeded, 1);
    }
}
