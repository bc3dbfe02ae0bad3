//! HTTP transport backed by `reqwest`.
//!
//! One pooled client per transport. No retry and no rate limiting happen
//! here; the transport performs exactly one exchange per `send`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use storeapi_core::error::TransportError;
use storeapi_core::request::HttpMethod;
use storeapi_core::transport::{HttpBody, HttpRequest, HttpResponse, HttpTransport};

/// Configuration for [`ReqwestTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpTransportConfig {
    #[serde(rename = "connect_timeout_ms", with = "duration_ms")]
    pub connect_timeout: Duration,
    /// Maximum idle time between reads of one response.
    #[serde(rename = "read_timeout_ms", with = "duration_ms")]
    pub read_timeout: Duration,
    /// Idle connections kept per host.
    pub max_connections: usize,
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(60),
            max_connections: 10,
            user_agent: concat!("storeapi/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// [`HttpTransport`] over a pooled `reqwest::Client`.
pub struct ReqwestTransport {
    http: reqwest::Client,
    config: HttpTransportConfig,
}

impl ReqwestTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .pool_max_idle_per_host(config.max_connections)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self, TransportError> {
        Self::new(HttpTransportConfig::default())
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            let limit = if e.is_connect() {
                self.config.connect_timeout
            } else {
                self.config.read_timeout
            };
            TransportError::Timeout {
                ms: limit.as_millis() as u64,
            }
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Http(e.to_string())
        }
    }

    async fn attach_body(
        &self,
        builder: reqwest::RequestBuilder,
        body: HttpBody,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        let Some(mime_type) = body.mime_type().map(str::to_owned) else {
            return Ok(builder);
        };
        let builder = builder.header(reqwest::header::CONTENT_TYPE, mime_type);

        Ok(match body {
            HttpBody::Empty => builder,
            HttpBody::Text { body, .. } => builder.body(body),
            HttpBody::Bytes { bytes, .. } => builder.body(bytes),
            HttpBody::Stream { stream, .. } => builder.body(reqwest::Body::wrap_stream(stream)),
            HttpBody::LocalFile { path, .. } => {
                let file = tokio::fs::File::open(&path).await?;
                builder.body(reqwest::Body::from(file))
            }
        })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            params,
            body,
        } = req;

        let mut builder = self.http.request(to_reqwest_method(method), &url);
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        if method.allows_body() {
            builder = self.attach_body(builder, body).await?;
        }

        let resp = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_error(e))?;

        tracing::trace!(%method, %url, status = status.as_u16(), bytes = body.len(), "response received");

        if status == reqwest::StatusCode::OK {
            Ok(HttpResponse::Success { body })
        } else {
            Ok(HttpResponse::Error {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            })
        }
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}
