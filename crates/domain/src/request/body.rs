//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// HTTP request body.
///
/// Structured JSON bodies are kept as a parsed value so field echoes can be
/// asserted against the exact submitted data; raw bodies are sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Structured JSON body
    Json {
        /// The JSON document to send.
        value: serde_json::Value,
    },
    /// Raw string body with an explicit content type
    Raw {
        /// The body content as a string.
        content: String,
        /// The content type (e.g. "application/json", "text/plain").
        content_type: String,
    },
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a structured JSON body.
    #[must_use]
    pub const fn json(value: serde_json::Value) -> Self {
        Self::Json { value }
    }

    /// Creates a raw JSON string body.
    #[must_use]
    pub fn raw_json(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            content_type: "application/json".to_string(),
        }
    }

    /// Creates a plain text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            content_type: "text/plain".to_string(),
        }
    }

    /// Returns whether the body is empty or none.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Json { value } => value.is_null(),
            Self::Raw { content, .. } => content.is_empty(),
        }
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Json { .. } => Some("application/json"),
            Self::Raw { content_type, .. } => Some(content_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(json!({"title": "hello"}));
        assert_eq!(body.content_type(), Some("application/json"));
        assert!(!body.is_empty());
    }

    #[test]
    fn test_raw_json_body() {
        let body = RequestBody::raw_json(r#"{"userId": 2}"#);
        assert_eq!(body.content_type(), Some("application/json"));
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::none();
        assert!(body.is_empty());
        assert_eq!(body.content_type(), None);
    }
}
