//! tooleval - agent tool-selection evaluation
//!
//! Builds the agent under test and drives the builtin scenario battery
//! through it, printing a timed pass/fail report to stdout. Per-scenario
//! failures are reported, never fatal; only failing to build the agent (or
//! to write the report) exits non-zero.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};

use tooleval_core::{build_agent, init_tracing, run, ScenarioSet};

#[derive(Parser)]
#[command(name = "tooleval")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Agent tool-selection and latency evaluation", long_about = None)]
struct Cli {
    /// Enable verbose log output (stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    init_tracing(cli.json, level);

    let agent = build_agent().context("Failed to build agent under test")?;
    let scenarios = ScenarioSet::builtin();

    let summary = run(&agent, &scenarios)
        .await
        .context("Failed to write evaluation report")?;

    if summary.all_succeeded() {
        info!(total = summary.total, "evaluation complete, every scenario succeeded");
    } else {
        warn!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "evaluation complete with failed scenarios"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_without_flags() {
        let cli = Cli::try_parse_from(["tooleval"]).expect("parse");
        assert!(!cli.verbose);
        assert!(!cli.json);
    }

    #[test]
    fn cli_accepts_log_flags() {
        let cli = Cli::try_parse_from(["tooleval", "--verbose", "--json"]).expect("parse");
        assert!(cli.verbose);
        assert!(cli.json);
    }

    #[test]
    fn cli_rejects_positional_args() {
        assert!(Cli::try_parse_from(["tooleval", "extra"]).is_err());
    }
}
