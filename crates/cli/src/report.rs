//! Console rendering of suite reports.

use std::fmt::Write as _;

use restprobe_domain::{ScenarioReport, SuiteReport};

/// Renders a suite report as console text, one line per scenario plus
/// failure detail and a summary line.
#[must_use]
pub fn render_suite(report: &SuiteReport) -> String {
    let mut out = String::new();
    for scenario in &report.scenarios {
        render_scenario(&mut out, scenario);
    }
    let _ = writeln!(
        out,
        "{}: {} scenarios, {} passed, {} failed ({} ms)",
        report.name,
        report.total(),
        report.passed,
        report.failed,
        report.duration_ms
    );
    out
}

fn render_scenario(out: &mut String, scenario: &ScenarioReport) {
    let verdict = if scenario.passed() { "PASS" } else { "FAIL" };
    let _ = writeln!(
        out,
        "{verdict} {} ({}) [{} ms]",
        scenario.name, scenario.request, scenario.duration_ms
    );

    if let Some(error) = &scenario.transport_error {
        let _ = writeln!(out, "     network error: {error}");
        return;
    }

    if let Some(failure) = scenario.first_failure() {
        let _ = writeln!(out, "     expectation: {}", failure.expectation.describe());
        if let Some(actual) = &failure.actual {
            let _ = writeln!(out, "     actual: {actual}");
        }
        if let Some(error) = &failure.error {
            let _ = writeln!(out, "     {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restprobe_domain::{Expectation, ExpectationOutcome};

    fn passing_scenario() -> ScenarioReport {
        ScenarioReport::from_outcomes(
            "list all posts",
            "GET /posts",
            vec![ExpectationOutcome::pass_with(Expectation::status(200), "200")],
            120,
        )
    }

    #[test]
    fn test_render_passing_suite() {
        let suite = SuiteReport::new("smoke", vec![passing_scenario()], 120);
        let text = render_suite(&suite);
        assert!(text.contains("PASS list all posts (GET /posts) [120 ms]"));
        assert!(text.contains("smoke: 1 scenarios, 1 passed, 0 failed"));
    }

    #[test]
    fn test_render_failed_expectation() {
        let failed = ScenarioReport::from_outcomes(
            "fetch post by id",
            "GET /posts/{id}",
            vec![ExpectationOutcome::fail_with(
                Expectation::status(200),
                "404",
                "assertion failed: status = 200 (expected = 200, got 404)",
            )],
            80,
        );
        let suite = SuiteReport::new("smoke", vec![failed], 80);
        let text = render_suite(&suite);
        assert!(text.contains("FAIL fetch post by id"));
        assert!(text.contains("expectation: status = 200"));
        assert!(text.contains("actual: 404"));
    }

    #[test]
    fn test_render_transport_error() {
        let down = ScenarioReport::from_transport_error(
            "list all posts",
            "GET /posts",
            "connection to https://api.example.com/posts failed: refused",
            10,
        );
        let suite = SuiteReport::new("smoke", vec![down], 10);
        let text = render_suite(&suite);
        assert!(text.contains("network error: connection to"));
    }
}
