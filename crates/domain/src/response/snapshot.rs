//! Response snapshot type
//!
//! An immutable capture of an HTTP response: status, headers, body, and
//! timing. Created once per request and read-only afterward.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Immutable capture of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    /// HTTP status code.
    status: u16,
    /// Response headers.
    headers: HashMap<String, String>,
    /// Content-Type header value, extracted for convenience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    /// Response body as text.
    body: String,
    /// Time from sending the request to receiving the full body.
    #[serde(with = "duration_millis")]
    elapsed: Duration,
}

impl ResponseSnapshot {
    /// Creates a snapshot from raw response data.
    #[must_use]
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        elapsed: Duration,
    ) -> Self {
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());
        let body = String::from_utf8_lossy(&body).into_owned();

        Self {
            status,
            headers,
            content_type,
            body,
            elapsed,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the elapsed time for the exchange.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the elapsed time in whole milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Returns the Content-Type header value, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the body as text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Attempts to parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the body is not valid JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

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
            Duration::from_millis(120),
        )
    }

    #[test]
    fn test_snapshot_basics() {
        let snap = snapshot(200, r#"{"id": 1}"#);
        assert_eq!(snap.status(), 200);
        assert!(snap.is_success());
        assert_eq!(snap.elapsed_ms(), 120);
        assert_eq!(
            snap.content_type(),
            Some("application/json; charset=utf-8")
        );
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let snap = snapshot(200, "{}");
        assert!(snap.header("content-type").is_some());
        assert!(snap.header("CONTENT-TYPE").is_some());
        assert!(snap.header("x-missing").is_none());
    }

    #[test]
    fn test_body_json() {
        let snap = snapshot(200, r#"{"id": 1}"#);
        let json = snap.body_json().unwrap();
        assert_eq!(json["id"], 1);

        let snap = snapshot(200, "not json");
        assert!(snap.body_json().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let snap = snapshot(201, r#"{"id": 101}"#);
        let json = serde_json::to_string(&snap).unwrap();
        let restored: ResponseSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, restored);
    }
}
