//! Scenario runner.
//!
//! Sends each scenario's request and evaluates its expectations in order.
//! The first failing expectation aborts that scenario; remaining scenarios
//! still run. Scenarios execute sequentially, one request in flight.

use std::time::Instant;

use restprobe_domain::{ProbeConfig, Scenario, ScenarioReport, SuiteReport};

use crate::checker::Checker;
use crate::client::HttpClient;

/// Runs scenarios against a configured base URL.
pub struct ScenarioRunner<C> {
    client: C,
    config: ProbeConfig,
    checker: Checker,
}

impl<C: HttpClient> ScenarioRunner<C> {
    /// Creates a runner for the given client and configuration.
    #[must_use]
    pub const fn new(client: C, config: ProbeConfig) -> Self {
        Self {
            client,
            config,
            checker: Checker::new(),
        }
    }

    /// Returns the runner's configuration.
    #[must_use]
    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Runs a single scenario.
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioReport {
        let label = scenario.request.label();
        let start = Instant::now();
        tracing::debug!(scenario = %scenario.name, request = %label, "running scenario");

        let snapshot = match self.client.send(&scenario.request, &self.config).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                let duration_ms = elapsed_ms(start);
                tracing::warn!(scenario = %scenario.name, error = %err, "transport failure");
                return ScenarioReport::from_transport_error(
                    &scenario.name,
                    label,
                    err.to_string(),
                    duration_ms,
                );
            }
        };

        let mut outcomes = Vec::with_capacity(scenario.expectations.len());
        for expectation in &scenario.expectations {
            let outcome = self.checker.evaluate(expectation, &snapshot);
            let failed = !outcome.passed;
            outcomes.push(outcome);
            if failed {
                break;
            }
        }

        let report =
            ScenarioReport::from_outcomes(&scenario.name, label, outcomes, elapsed_ms(start));
        tracing::info!(
            scenario = %scenario.name,
            passed = report.passed(),
            duration_ms = report.duration_ms,
            "scenario finished"
        );
        report
    }

    /// Runs every scenario in order and aggregates the results.
    pub async fn run_suite(&self, name: &str, scenarios: &[Scenario]) -> SuiteReport {
        let start = Instant::now();
        let mut reports = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            reports.push(self.run_scenario(scenario).await);
        }
        SuiteReport::new(name, reports, elapsed_ms(start))
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
