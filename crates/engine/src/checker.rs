//! Expectation checker.
//!
//! Evaluates declarative [`Expectation`]s against a captured
//! [`ResponseSnapshot`], and exposes direct `expect_*` operations for use
//! from integration tests.

use regex::Regex;
use restprobe_domain::{
    Expectation, ExpectationOutcome, LengthOperator, ResponseSnapshot, StatusExpectation,
    ValuePredicate,
};

use crate::error::CheckError;
use crate::jsonpath;

/// Evaluates expectations against response snapshots.
#[derive(Debug, Default, Clone, Copy)]
pub struct Checker;

impl Checker {
    /// Creates a checker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates one expectation, producing an outcome for reporting.
    #[must_use]
    pub fn evaluate(
        &self,
        expectation: &Expectation,
        snapshot: &ResponseSnapshot,
    ) -> ExpectationOutcome {
        let checked = match expectation {
            Expectation::Status { expected } => self.check_status(snapshot, expected),
            Expectation::TimeUnder { max_ms } => self.check_time_under(snapshot, *max_ms),
            Expectation::ContentType { expected } => self.check_content_type(snapshot, expected),
            Expectation::JsonPath { path, predicate } => {
                self.check_json_path(snapshot, path, predicate)
            }
            Expectation::JsonEach { path, predicate } => {
                self.check_json_each(snapshot, path, predicate)
            }
            Expectation::JsonLength {
                path,
                operator,
                expected,
            } => self.check_json_length(snapshot, path, *operator, *expected),
        };

        match checked {
            Ok(actual) => ExpectationOutcome::pass_with(expectation.clone(), actual),
            Err(err) => match &err {
                CheckError::Assertion { actual, .. } => ExpectationOutcome::fail_with(
                    expectation.clone(),
                    actual.clone(),
                    err.to_string(),
                ),
                _ => ExpectationOutcome::fail(expectation.clone(), err.to_string()),
            },
        }
    }

    /// Asserts the status code matches.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Assertion`] on mismatch.
    pub fn expect_status(
        &self,
        snapshot: &ResponseSnapshot,
        expected: &StatusExpectation,
    ) -> Result<(), CheckError> {
        self.check_status(snapshot, expected).map(drop)
    }

    /// Asserts the elapsed time stays under `max_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Assertion`] if the bound is exceeded.
    pub fn expect_time_under(
        &self,
        snapshot: &ResponseSnapshot,
        max_ms: u64,
    ) -> Result<(), CheckError> {
        self.check_time_under(snapshot, max_ms).map(drop)
    }

    /// Asserts the Content-Type header contains `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Assertion`] on mismatch or missing header.
    pub fn expect_content_type(
        &self,
        snapshot: &ResponseSnapshot,
        expected: &str,
    ) -> Result<(), CheckError> {
        self.check_content_type(snapshot, expected).map(drop)
    }

    /// Asserts the predicate holds for the value at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::PathNotFound`] if the path does not resolve,
    /// [`CheckError::BodyNotJson`] if the body does not parse, and
    /// [`CheckError::Assertion`] if the predicate fails.
    pub fn expect_json_path(
        &self,
        snapshot: &ResponseSnapshot,
        path: &str,
        predicate: &ValuePredicate,
    ) -> Result<(), CheckError> {
        self.check_json_path(snapshot, path, predicate).map(drop)
    }

    fn check_status(
        &self,
        snapshot: &ResponseSnapshot,
        expected: &StatusExpectation,
    ) -> Result<String, CheckError> {
        let actual = snapshot.status();
        if expected.matches(actual) {
            Ok(actual.to_string())
        } else {
            Err(CheckError::Assertion {
                description: format!("status {}", expected.describe()),
                expected: expected.describe(),
                actual: actual.to_string(),
            })
        }
    }

    fn check_time_under(
        &self,
        snapshot: &ResponseSnapshot,
        max_ms: u64,
    ) -> Result<String, CheckError> {
        let actual_ms = snapshot.elapsed_ms();
        if actual_ms < max_ms {
            Ok(format!("{actual_ms}ms"))
        } else {
            Err(CheckError::Assertion {
                description: format!("response time < {max_ms}ms"),
                expected: format!("< {max_ms}ms"),
                actual: format!("{actual_ms}ms"),
            })
        }
    }

    fn check_content_type(
        &self,
        snapshot: &ResponseSnapshot,
        expected: &str,
    ) -> Result<String, CheckError> {
        match snapshot.content_type() {
            Some(actual) if actual.contains(expected) => Ok(actual.to_string()),
            Some(actual) => Err(CheckError::Assertion {
                description: format!("Content-Type contains '{expected}'"),
                expected: expected.to_string(),
                actual: actual.to_string(),
            }),
            None => Err(CheckError::Assertion {
                description: format!("Content-Type contains '{expected}'"),
                expected: expected.to_string(),
                actual: "<no Content-Type header>".to_string(),
            }),
        }
    }

    fn check_json_path(
        &self,
        snapshot: &ResponseSnapshot,
        path: &str,
        predicate: &ValuePredicate,
    ) -> Result<String, CheckError> {
        let value = self.value_at(snapshot, path)?;
        if apply_predicate(&value, predicate)? {
            Ok(value.to_string())
        } else {
            Err(CheckError::Assertion {
                description: format!("{path} {}", predicate.describe()),
                expected: predicate.describe(),
                actual: value.to_string(),
            })
        }
    }

    fn check_json_each(
        &self,
        snapshot: &ResponseSnapshot,
        path: &str,
        predicate: &ValuePredicate,
    ) -> Result<String, CheckError> {
        let value = self.value_at(snapshot, path)?;
        let Some(elements) = value.as_array() else {
            return Err(CheckError::Assertion {
                description: format!("every {path} {}", predicate.describe()),
                expected: "an array".to_string(),
                actual: value.to_string(),
            });
        };

        for (index, element) in elements.iter().enumerate() {
            if !apply_predicate(element, predicate)? {
                return Err(CheckError::Assertion {
                    description: format!("every {path} {}", predicate.describe()),
                    expected: predicate.describe(),
                    actual: format!("element {index} = {element}"),
                });
            }
        }
        Ok(format!("{} elements", elements.len()))
    }

    fn check_json_length(
        &self,
        snapshot: &ResponseSnapshot,
        path: &str,
        operator: LengthOperator,
        expected: usize,
    ) -> Result<String, CheckError> {
        let value = self.value_at(snapshot, path)?;
        let actual = match &value {
            serde_json::Value::Array(items) => items.len(),
            serde_json::Value::String(s) => s.len(),
            serde_json::Value::Object(map) => map.len(),
            other => {
                return Err(CheckError::Assertion {
                    description: format!("length of {path} {} {expected}", operator.symbol()),
                    expected: "an array, string, or object".to_string(),
                    actual: other.to_string(),
                });
            }
        };

        if operator.holds(actual, expected) {
            Ok(actual.to_string())
        } else {
            Err(CheckError::Assertion {
                description: format!("length of {path} {} {expected}", operator.symbol()),
                expected: format!("{} {expected}", operator.symbol()),
                actual: actual.to_string(),
            })
        }
    }

    fn value_at(
        &self,
        snapshot: &ResponseSnapshot,
        path: &str,
    ) -> Result<serde_json::Value, CheckError> {
        let json = snapshot
            .body_json()
            .map_err(|e| CheckError::BodyNotJson(e.to_string()))?;
        Ok(jsonpath::lookup(&json, path)?)
    }
}

fn apply_predicate(
    value: &serde_json::Value,
    predicate: &ValuePredicate,
) -> Result<bool, CheckError> {
    use serde_json::Value;

    Ok(match predicate {
        ValuePredicate::Equals { value: expected } => value == expected,
        ValuePredicate::NotEquals { value: expected } => value != expected,
        ValuePredicate::GreaterThan { value: bound } => {
            value.as_f64().is_some_and(|v| v > *bound)
        }
        ValuePredicate::LessThan { value: bound } => value.as_f64().is_some_and(|v| v < *bound),
        ValuePredicate::Contains { value: needle } => match value {
            Value::String(s) => s.contains(needle.as_str()),
            Value::Array(items) => items.iter().any(|i| i == &Value::String(needle.clone())),
            _ => false,
        },
        ValuePredicate::MatchesPattern { pattern } => {
            let regex = Regex::new(pattern).map_err(|e| CheckError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            value.as_str().is_some_and(|s| regex.is_match(s))
        }
        ValuePredicate::Exists => !value.is_null(),
        ValuePredicate::NonEmpty => match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn snapshot(status: u16, body: &str) -> ResponseSnapshot {
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        );
        ResponseSnapshot::new(
            status,
            headers,
            body.as_bytes().to_vec(),
            Duration::from_millis(50),
        )
    }

    #[test]
    fn test_expect_status() {
        let checker = Checker::new();
        let snap = snapshot(200, "{}");

        assert!(checker
            .expect_status(&snap, &StatusExpectation::Exact(200))
            .is_ok());

        let err = checker
            .expect_status(&snap, &StatusExpectation::Exact(201))
            .unwrap_err();
        assert!(matches!(err, CheckError::Assertion { .. }));
        assert!(err.to_string().contains("expected = 201, got 200"));
    }

    #[test]
    fn test_expect_time_under() {
        let checker = Checker::new();
        let snap = snapshot(200, "{}");

        assert!(checker.expect_time_under(&snap, 3000).is_ok());
        assert!(checker.expect_time_under(&snap, 10).is_err());
    }

    #[test]
    fn test_expect_content_type() {
        let checker = Checker::new();
        let snap = snapshot(200, "{}");

        assert!(checker
            .expect_content_type(&snap, "application/json")
            .is_ok());
        assert!(checker.expect_content_type(&snap, "text/html").is_err());
    }

    #[test]
    fn test_expect_json_path_equals() {
        let checker = Checker::new();
        let snap = snapshot(200, r#"{"id": 1, "title": "hello"}"#);

        assert!(checker
            .expect_json_path(&snap, "$.id", &ValuePredicate::Equals { value: json!(1) })
            .is_ok());
        assert!(checker
            .expect_json_path(&snap, "$.id", &ValuePredicate::Equals { value: json!(2) })
            .is_err());
    }

    #[test]
    fn test_expect_json_path_not_found() {
        let checker = Checker::new();
        let snap = snapshot(200, r#"{"id": 1}"#);

        let err = checker
            .expect_json_path(&snap, "$.missing", &ValuePredicate::Exists)
            .unwrap_err();
        assert!(matches!(err, CheckError::PathNotFound(_)));
        assert!(err.to_string().contains("available: id"));
    }

    #[test]
    fn test_expect_json_path_body_not_json() {
        let checker = Checker::new();
        let snap = snapshot(200, "plain text");

        let err = checker
            .expect_json_path(&snap, "$.id", &ValuePredicate::Exists)
            .unwrap_err();
        assert!(matches!(err, CheckError::BodyNotJson(_)));
    }

    #[test]
    fn test_non_empty_predicate() {
        let checker = Checker::new();
        let snap = snapshot(200, r#"{"title": "x", "empty": "", "tags": []}"#);

        assert!(checker
            .expect_json_path(&snap, "$.title", &ValuePredicate::NonEmpty)
            .is_ok());
        assert!(checker
            .expect_json_path(&snap, "$.empty", &ValuePredicate::NonEmpty)
            .is_err());
        assert!(checker
            .expect_json_path(&snap, "$.tags", &ValuePredicate::NonEmpty)
            .is_err());
    }

    #[test]
    fn test_matches_pattern_predicate() {
        let checker = Checker::new();
        let snap = snapshot(200, r#"{"email": "test@example.com"}"#);

        assert!(checker
            .expect_json_path(
                &snap,
                "$.email",
                &ValuePredicate::MatchesPattern {
                    pattern: r"^[A-Za-z0-9+_.-]+@(.+)$".to_string()
                }
            )
            .is_ok());

        let err = checker
            .expect_json_path(
                &snap,
                "$.email",
                &ValuePredicate::MatchesPattern {
                    pattern: "[unclosed".to_string()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CheckError::InvalidPattern { .. }));
    }

    #[test]
    fn test_numeric_predicates() {
        let checker = Checker::new();
        let snap = snapshot(200, r#"{"count": 10}"#);

        assert!(checker
            .expect_json_path(
                &snap,
                "$.count",
                &ValuePredicate::GreaterThan { value: 5.0 }
            )
            .is_ok());
        assert!(checker
            .expect_json_path(&snap, "$.count", &ValuePredicate::LessThan { value: 5.0 })
            .is_err());
    }

    #[test]
    fn test_evaluate_json_each() {
        let checker = Checker::new();
        let snap = snapshot(200, r#"[{"userId": 1}, {"userId": 1}]"#);

        let every = Expectation::JsonEach {
            path: "$[*].userId".to_string(),
            predicate: ValuePredicate::Equals { value: json!(1) },
        };
        let outcome = checker.evaluate(&every, &snap);
        assert!(outcome.passed);
        assert_eq!(outcome.actual.as_deref(), Some("2 elements"));

        let snap = snapshot(200, r#"[{"userId": 1}, {"userId": 2}]"#);
        let outcome = checker.evaluate(&every, &snap);
        assert!(!outcome.passed);
        assert!(outcome.actual.unwrap().contains("element 1"));
    }

    #[test]
    fn test_evaluate_json_length() {
        let checker = Checker::new();
        let snap = snapshot(200, r#"[1, 2, 3]"#);

        let non_empty = Expectation::JsonLength {
            path: "$".to_string(),
            operator: LengthOperator::GreaterThan,
            expected: 0,
        };
        assert!(checker.evaluate(&non_empty, &snap).passed);

        let exact = Expectation::JsonLength {
            path: "$".to_string(),
            operator: LengthOperator::Equals,
            expected: 5,
        };
        let outcome = checker.evaluate(&exact, &snap);
        assert!(!outcome.passed);
        assert_eq!(outcome.actual.as_deref(), Some("3"));
    }

    #[test]
    fn test_evaluate_reports_expected_vs_actual() {
        let checker = Checker::new();
        let snap = snapshot(404, "{}");

        let outcome = checker.evaluate(&Expectation::status(200), &snap);
        assert!(!outcome.passed);
        assert_eq!(outcome.actual.as_deref(), Some("404"));
        assert!(outcome.error.unwrap().contains("expected = 200, got 404"));
    }
}
