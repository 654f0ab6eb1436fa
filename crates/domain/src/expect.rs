//! Declarative response expectations.
//!
//! This module defines the expectation vocabulary evaluated against a
//! [`crate::response::ResponseSnapshot`]: status code, elapsed time,
//! content type, and JSON-path value predicates.

use serde::{Deserialize, Serialize};

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// Predicate applied to a value extracted by JSON path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ValuePredicate {
    /// Value equals the given JSON value.
    Equals {
        /// Expected value.
        value: serde_json::Value,
    },
    /// Value does not equal the given JSON value.
    NotEquals {
        /// Disallowed value.
        value: serde_json::Value,
    },
    /// Numeric value is strictly greater than the given number.
    GreaterThan {
        /// Lower bound (exclusive).
        value: f64,
    },
    /// Numeric value is strictly less than the given number.
    LessThan {
        /// Upper bound (exclusive).
        value: f64,
    },
    /// String value contains the given substring.
    Contains {
        /// Required substring.
        value: String,
    },
    /// String value matches the given regex pattern.
    MatchesPattern {
        /// Regex pattern.
        pattern: String,
    },
    /// Value exists and is not null.
    Exists,
    /// String, array, or object is non-empty (and not null).
    NonEmpty,
}

impl ValuePredicate {
    /// Get a human-readable description of this predicate.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Equals { value } => format!("== {value}"),
            Self::NotEquals { value } => format!("!= {value}"),
            Self::GreaterThan { value } => format!("> {value}"),
            Self::LessThan { value } => format!("< {value}"),
            Self::Contains { value } => format!("contains '{value}'"),
            Self::MatchesPattern { pattern } => format!("matches /{pattern}/"),
            Self::Exists => "exists".to_string(),
            Self::NonEmpty => "is non-empty".to_string(),
        }
    }
}

/// Comparison operator for length expectations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LengthOperator {
    /// Length equals.
    Equals,
    /// Length is strictly greater than.
    GreaterThan,
    /// Length is strictly less than.
    LessThan,
}

impl LengthOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
        }
    }

    /// Apply the operator to actual vs expected lengths.
    #[must_use]
    pub const fn holds(self, actual: usize, expected: usize) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::GreaterThan => actual > expected,
            Self::LessThan => actual < expected,
        }
    }
}

/// A declarative expectation to evaluate against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    /// Check response status code.
    Status {
        /// Expected status code or range.
        expected: StatusExpectation,
    },
    /// Check elapsed time stays under a bound.
    TimeUnder {
        /// Maximum allowed time in milliseconds.
        max_ms: u64,
    },
    /// Check the Content-Type header contains the given string.
    ContentType {
        /// Expected content type (partial match).
        expected: String,
    },
    /// Check the value at a JSON path satisfies a predicate.
    JsonPath {
        /// JSON path expression (e.g., "$.user.id").
        path: String,
        /// Predicate to apply to the extracted value.
        predicate: ValuePredicate,
    },
    /// Check the predicate holds for every element of the array at a path.
    JsonEach {
        /// JSON path expression selecting an array (e.g., "$[*].userId").
        path: String,
        /// Predicate applied to each element.
        predicate: ValuePredicate,
    },
    /// Check the length of the array, string, or object at a path.
    JsonLength {
        /// JSON path expression.
        path: String,
        /// Comparison operator.
        operator: LengthOperator,
        /// Length to compare against.
        expected: usize,
    },
}

impl Expectation {
    /// Shorthand for an exact status expectation.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::Status {
            expected: StatusExpectation::Exact(code),
        }
    }

    /// Shorthand for a response-time bound.
    #[must_use]
    pub const fn time_under(max_ms: u64) -> Self {
        Self::TimeUnder { max_ms }
    }

    /// Shorthand for a JSON-path equality expectation.
    #[must_use]
    pub fn json_eq(path: impl Into<String>, value: serde_json::Value) -> Self {
        Self::JsonPath {
            path: path.into(),
            predicate: ValuePredicate::Equals { value },
        }
    }

    /// Shorthand for a JSON-path existence expectation.
    #[must_use]
    pub fn json_exists(path: impl Into<String>) -> Self {
        Self::JsonPath {
            path: path.into(),
            predicate: ValuePredicate::Exists,
        }
    }

    /// Shorthand for a JSON-path non-empty expectation.
    #[must_use]
    pub fn json_non_empty(path: impl Into<String>) -> Self {
        Self::JsonPath {
            path: path.into(),
            predicate: ValuePredicate::NonEmpty,
        }
    }

    /// Get a human-readable description of this expectation.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Status { expected } => format!("status {}", expected.describe()),
            Self::TimeUnder { max_ms } => format!("response time < {max_ms}ms"),
            Self::ContentType { expected } => {
                format!("Content-Type contains '{expected}'")
            }
            Self::JsonPath { path, predicate } => {
                format!("{path} {}", predicate.describe())
            }
            Self::JsonEach { path, predicate } => {
                format!("every {path} {}", predicate.describe())
            }
            Self::JsonLength {
                path,
                operator,
                expected,
            } => format!("length of {path} {} {expected}", operator.symbol()),
        }
    }
}

/// Result of evaluating a single expectation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpectationOutcome {
    /// The expectation that was evaluated.
    pub expectation: Expectation,
    /// Whether the expectation held.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl ExpectationOutcome {
    /// Create a passed outcome.
    #[must_use]
    pub const fn pass(expectation: Expectation) -> Self {
        Self {
            expectation,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed outcome with actual value.
    #[must_use]
    pub fn pass_with(expectation: Expectation, actual: impl Into<String>) -> Self {
        Self {
            expectation,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed outcome.
    #[must_use]
    pub fn fail(expectation: Expectation, error: impl Into<String>) -> Self {
        Self {
            expectation,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed outcome with actual value.
    #[must_use]
    pub fn fail_with(
        expectation: Expectation,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            expectation,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_expectation_exact() {
        let exp = StatusExpectation::Exact(200);
        assert!(exp.matches(200));
        assert!(!exp.matches(201));
    }

    #[test]
    fn test_status_expectation_range() {
        let exp = StatusExpectation::success();
        assert!(exp.matches(200));
        assert!(exp.matches(299));
        assert!(!exp.matches(300));
        assert!(!exp.matches(199));
    }

    #[test]
    fn test_status_expectation_one_of() {
        let exp = StatusExpectation::OneOf(vec![200, 201, 204]);
        assert!(exp.matches(201));
        assert!(!exp.matches(202));
    }

    #[test]
    fn test_expectation_describe() {
        assert_eq!(Expectation::status(200).describe(), "status = 200");
        assert_eq!(
            Expectation::time_under(3000).describe(),
            "response time < 3000ms"
        );
        assert_eq!(
            Expectation::json_eq("$.id", json!(1)).describe(),
            "$.id == 1"
        );
        assert_eq!(
            Expectation::json_non_empty("$.title").describe(),
            "$.title is non-empty"
        );
        let each = Expectation::JsonEach {
            path: "$[*].userId".to_string(),
            predicate: ValuePredicate::Equals { value: json!(1) },
        };
        assert_eq!(each.describe(), "every $[*].userId == 1");
    }

    #[test]
    fn test_length_operator() {
        assert!(LengthOperator::GreaterThan.holds(3, 0));
        assert!(!LengthOperator::GreaterThan.holds(0, 0));
        assert!(LengthOperator::Equals.holds(5, 5));
        assert!(LengthOperator::LessThan.holds(1, 2));
    }

    #[test]
    fn test_outcome_constructors() {
        let pass = ExpectationOutcome::pass_with(Expectation::status(200), "200");
        assert!(pass.passed);
        assert_eq!(pass.actual.as_deref(), Some("200"));

        let fail =
            ExpectationOutcome::fail_with(Expectation::status(200), "404", "expected 200, got 404");
        assert!(!fail.passed);
        assert_eq!(fail.error.as_deref(), Some("expected 200, got 404"));
    }

    #[test]
    fn test_expectation_serde_tagging() {
        let exp = Expectation::json_eq("$.id", json!(1));
        let encoded = serde_json::to_value(&exp).unwrap_or_default();
        assert_eq!(encoded["type"], "json_path");
        assert_eq!(encoded["predicate"]["op"], "equals");
    }
}
