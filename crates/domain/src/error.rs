//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building or validating a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A path template placeholder has no bound value.
    #[error("path template '{template}' references unbound parameter '{name}'")]
    MissingPathParam {
        /// The path template being rendered.
        template: String,
        /// The placeholder with no value.
        name: String,
    },

    /// A bound path parameter does not appear in the template.
    #[error("path parameter '{name}' does not appear in template '{template}'")]
    UnknownPathParam {
        /// The path template being rendered.
        template: String,
        /// The parameter with no matching placeholder.
        name: String,
    },

    /// The request body is invalid for the given content type.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A regex predicate pattern failed to compile.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler diagnostic.
        message: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
