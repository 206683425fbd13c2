//! Structured lifecycle events for evaluation runs.
//!
//! Every event is emitted at `info!` (per-scenario failures at `warn!`) with
//! an `event` field so log pipelines can filter on it.

use tracing::{info, warn};

/// Span covering a whole evaluation run, tagged with its run id.
pub fn run_span(run_id: &str) -> tracing::Span {
    tracing::info_span!("tooleval.run", run_id = %run_id)
}

/// Emit event: run started.
pub fn emit_run_started(run_id: &str, total_scenarios: usize) {
    info!(event = "run.started", run_id = %run_id, total_scenarios = total_scenarios);
}

/// Emit event: one scenario reached a terminal state.
pub fn emit_scenario_finished(
    index: usize,
    expected_capability: &str,
    duration_ms: u64,
    success: bool,
) {
    info!(
        event = "scenario.finished",
        scenario = index + 1,
        expected_capability = %expected_capability,
        duration_ms = duration_ms,
        success = success,
    );
}

/// Emit event: the agent failed a scenario.
pub fn emit_scenario_failed(index: usize, kind: &str, error: &dyn std::fmt::Display) {
    warn!(event = "scenario.failed", scenario = index + 1, kind = %kind, error = %error);
}

/// Emit event: run finished with totals.
pub fn emit_run_finished(run_id: &str, duration_ms: u64, succeeded: usize, failed: usize) {
    info!(
        event = "run.finished",
        run_id = %run_id,
        duration_ms = duration_ms,
        succeeded = succeeded,
        failed = failed,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_span_create() {
        let span = run_span("test-run-id");
        let _guard = span.enter();
        emit_run_started("test-run-id", 0);
    }
}
