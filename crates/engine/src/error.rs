//! Engine error types

use restprobe_domain::DomainError;
use thiserror::Error;

use crate::jsonpath::PathError;

/// Transport-level failures: the request never produced a usable response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request exceeded its timeout.
    #[error("request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout {
        /// The endpoint being called.
        endpoint: String,
        /// The configured timeout.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection to {endpoint} failed: {message}")]
    ConnectionFailed {
        /// The endpoint being called.
        endpoint: String,
        /// Underlying cause.
        message: String,
    },

    /// The response body could not be read.
    #[error("failed to read response from {endpoint}: {message}")]
    ReadBody {
        /// The endpoint being called.
        endpoint: String,
        /// Underlying cause.
        message: String,
    },

    /// The request could not be built from its spec.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Any other transport failure.
    #[error("HTTP error for {endpoint}: {message}")]
    Other {
        /// The endpoint being called.
        endpoint: String,
        /// Underlying cause.
        message: String,
    },
}

/// Failures raised by the direct `expect_*` check operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// An expectation did not hold.
    #[error("assertion failed: {description} (expected {expected}, got {actual})")]
    Assertion {
        /// Human-readable form of the expectation.
        description: String,
        /// What was expected.
        expected: String,
        /// What was observed.
        actual: String,
    },

    /// A JSON path did not resolve.
    #[error(transparent)]
    PathNotFound(#[from] PathError),

    /// The response body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    BodyNotJson(String),

    /// A regex predicate failed to compile.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler diagnostic.
        message: String,
    },
}
