//! HTTP client adapter built on reqwest.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};
use restprobe_domain::{
    DomainError, HttpMethod, ProbeConfig, RequestBody, RequestSpec, ResponseSnapshot,
};

use crate::error::TransportError;

/// Port for issuing HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issues the request and captures the response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on connection failure, timeout, or an
    /// unbuildable request.
    async fn send(
        &self,
        request: &RequestSpec,
        config: &ProbeConfig,
    ) -> Result<ResponseSnapshot, TransportError>;
}

/// The reqwest-backed HTTP client.
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Creates a client with the probe defaults: rustls TLS, a handful of
    /// redirects, and a stable User-Agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent("restprobe/0.1.0")
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other {
                endpoint: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn attach_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        match body {
            RequestBody::None => Ok(builder),
            RequestBody::Json { value } => Ok(builder.json(value)),
            RequestBody::Raw {
                content,
                content_type,
            } => {
                // A raw body claiming to be JSON must at least parse.
                if content_type.contains("application/json") && !content.is_empty() {
                    let _: serde_json::Value = serde_json::from_str(content).map_err(|e| {
                        TransportError::Domain(DomainError::InvalidBody(format!(
                            "invalid JSON: {e}"
                        )))
                    })?;
                }
                Ok(builder
                    .header("Content-Type", content_type)
                    .body(content.clone()))
            }
        }
    }

    fn map_error(error: &reqwest::Error, endpoint: &str, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                endpoint: endpoint.to_string(),
                timeout_ms,
            };
        }
        if error.is_connect() {
            return TransportError::ConnectionFailed {
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            };
        }
        TransportError::Other {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(
        &self,
        request: &RequestSpec,
        config: &ProbeConfig,
    ) -> Result<ResponseSnapshot, TransportError> {
        let path = request.render_path()?;
        let mut url = config.join(&path)?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query.pairs() {
                pairs.append_pair(key, value);
            }
        }
        let endpoint = url.to_string();
        let timeout_ms = request.timeout_ms.unwrap_or(config.timeout_ms);

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(timeout_ms));
        builder = Self::attach_body(builder, &request.body)?;

        tracing::debug!(method = %request.method, %endpoint, "sending request");
        let start = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, &endpoint, timeout_ms))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::ReadBody {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            })?
            .to_vec();

        let elapsed = start.elapsed();
        tracing::debug!(status, elapsed_ms = elapsed.as_millis() as u64, "response received");

        Ok(ResponseSnapshot::new(status, headers, body, elapsed))
    }
}
