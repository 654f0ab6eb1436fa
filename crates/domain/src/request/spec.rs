//! Request specification type

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{HttpMethod, QueryParam, QueryParams, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Complete specification for an HTTP request.
///
/// The path is a template; `{name}` placeholders are substituted from the
/// bound path parameters when the request is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Path template relative to the base URL (e.g. "/posts/{id}")
    pub path: String,
    /// Values for path template placeholders
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub path_params: BTreeMap<String, String>,
    /// Query parameters
    #[serde(default, skip_serializing_if = "QueryParams::is_empty")]
    pub query: QueryParams,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Per-request timeout override in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestSpec {
    /// Creates a request specification with the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            path_params: BTreeMap::new(),
            query: QueryParams::new(),
            body: RequestBody::none(),
            timeout_ms: None,
        }
    }

    /// Creates a GET request for the given path template.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request for the given path template.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Binds a path template parameter.
    #[must_use]
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.insert(name.into(), value.to_string());
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.add(QueryParam::new(key, value.to_string()));
        self
    }

    /// Sets a structured JSON body.
    #[must_use]
    pub fn with_json_body(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::json(value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets a per-request timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Renders the path template, substituting `{name}` placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingPathParam`] if a placeholder has no
    /// bound value, or [`DomainError::UnknownPathParam`] if a bound value
    /// matches no placeholder.
    pub fn render_path(&self) -> DomainResult<String> {
        let mut rendered = String::with_capacity(self.path.len());
        let mut used: Vec<&str> = Vec::new();
        let mut rest = self.path.as_str();

        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                return Err(DomainError::InvalidUrl(format!(
                    "unclosed placeholder in '{}'",
                    self.path
                )));
            };
            let name = &after[..close];
            match self.path_params.get(name) {
                Some(value) => {
                    rendered.push_str(value);
                    used.push(name);
                }
                None => {
                    return Err(DomainError::MissingPathParam {
                        template: self.path.clone(),
                        name: name.to_string(),
                    });
                }
            }
            rest = &after[close + 1..];
        }
        rendered.push_str(rest);

        if let Some(unused) = self.path_params.keys().find(|k| !used.contains(&k.as_str())) {
            return Err(DomainError::UnknownPathParam {
                template: self.path.clone(),
                name: unused.clone(),
            });
        }

        Ok(rendered)
    }

    /// Returns a short human-readable label (e.g. "GET /posts/{id}").
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self::get("/")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_plain_path() {
        let spec = RequestSpec::get("/posts");
        assert_eq!(spec.render_path().unwrap(), "/posts");
    }

    #[test]
    fn test_render_with_param() {
        let spec = RequestSpec::get("/posts/{id}").with_path_param("id", 1);
        assert_eq!(spec.render_path().unwrap(), "/posts/1");
    }

    #[test]
    fn test_render_multiple_params() {
        let spec = RequestSpec::get("/users/{user}/posts/{id}")
            .with_path_param("user", 7)
            .with_path_param("id", 42);
        assert_eq!(spec.render_path().unwrap(), "/users/7/posts/42");
    }

    #[test]
    fn test_missing_param_fails() {
        let spec = RequestSpec::get("/posts/{id}");
        let err = spec.render_path().unwrap_err();
        assert!(matches!(err, DomainError::MissingPathParam { .. }));
    }

    #[test]
    fn test_unknown_param_fails() {
        let spec = RequestSpec::get("/posts").with_path_param("id", 1);
        let err = spec.render_path().unwrap_err();
        assert!(matches!(err, DomainError::UnknownPathParam { .. }));
    }

    #[test]
    fn test_unclosed_placeholder_fails() {
        let spec = RequestSpec::get("/posts/{id").with_path_param("id", 1);
        assert!(matches!(
            spec.render_path(),
            Err(DomainError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_label() {
        let spec = RequestSpec::post("/posts");
        assert_eq!(spec.label(), "POST /posts");
    }
}
