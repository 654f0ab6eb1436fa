//! Scenarios and suite reports.
//!
//! A scenario pairs one request with an ordered list of expectations.
//! Scenarios are independent; a failing scenario never stops the suite.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expect::{Expectation, ExpectationOutcome};
use crate::request::RequestSpec;

/// A named request with its ordered expectations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique identifier.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Scenario name.
    pub name: String,
    /// Request to issue.
    pub request: RequestSpec,
    /// Expectations evaluated in order; the first failure aborts the scenario.
    #[serde(default)]
    pub expectations: Vec<Expectation>,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

impl Scenario {
    /// Create a new scenario for the given request.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestSpec) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            request,
            expectations: Vec::new(),
        }
    }

    /// Add an expectation (builder pattern).
    #[must_use]
    pub fn expecting(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Returns the number of expectations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Returns true if the scenario has no expectations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }
}

/// Result of running a single scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Request label (e.g. "GET /posts/{id}").
    pub request: String,
    /// Outcomes in evaluation order; truncated at the first failure.
    pub outcomes: Vec<ExpectationOutcome>,
    /// Transport failure, if the request never produced a response.
    pub transport_error: Option<String>,
    /// Wall-clock time for the whole scenario in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// Create a report from evaluated outcomes.
    #[must_use]
    pub fn from_outcomes(
        name: impl Into<String>,
        request: impl Into<String>,
        outcomes: Vec<ExpectationOutcome>,
        duration_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            request: request.into(),
            outcomes,
            transport_error: None,
            duration_ms,
        }
    }

    /// Create a report for a request that failed before any expectation ran.
    #[must_use]
    pub fn from_transport_error(
        name: impl Into<String>,
        request: impl Into<String>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            request: request.into(),
            outcomes: Vec::new(),
            transport_error: Some(error.into()),
            duration_ms,
        }
    }

    /// Whether the scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.transport_error.is_none() && self.outcomes.iter().all(|o| o.passed)
    }

    /// The first failed outcome, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<&ExpectationOutcome> {
        self.outcomes.iter().find(|o| !o.passed)
    }
}

/// Aggregated results of a suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name.
    pub name: String,
    /// Per-scenario reports.
    pub scenarios: Vec<ScenarioReport>,
    /// Number of passed scenarios.
    pub passed: usize,
    /// Number of failed scenarios.
    pub failed: usize,
    /// Total wall-clock time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Build a suite report from scenario reports.
    #[must_use]
    pub fn new(name: impl Into<String>, scenarios: Vec<ScenarioReport>, duration_ms: u64) -> Self {
        let passed = scenarios.iter().filter(|s| s.passed()).count();
        let failed = scenarios.len() - passed;
        Self {
            name: name.into(),
            scenarios,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Whether every scenario passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Total number of scenarios.
    #[must_use]
    pub fn total(&self) -> usize {
        self.scenarios.len()
    }
}
