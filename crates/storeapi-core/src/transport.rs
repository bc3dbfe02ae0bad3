//! The `HttpTransport` trait, the boundary to whatever performs HTTP calls.

use std::path::PathBuf;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::error::TransportError;
use crate::request::HttpMethod;

/// Streamed request body.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync>>;

/// A request body in the form the transport sends it.
pub enum HttpBody {
    Empty,
    Text { body: String, mime_type: String },
    Bytes { bytes: Vec<u8>, mime_type: String },
    Stream { stream: BodyStream, mime_type: String },
    LocalFile { path: PathBuf, mime_type: String },
}

impl HttpBody {
    /// MIME type to send as `Content-Type`, `None` for an empty body.
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Text { mime_type, .. }
            | Self::Bytes { mime_type, .. }
            | Self::Stream { mime_type, .. }
            | Self::LocalFile { mime_type, .. } => Some(mime_type),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl std::fmt::Debug for HttpBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text { body, mime_type } => f
                .debug_struct("Text")
                .field("len", &body.len())
                .field("mime_type", mime_type)
                .finish(),
            Self::Bytes { bytes, mime_type } => f
                .debug_struct("Bytes")
                .field("len", &bytes.len())
                .field("mime_type", mime_type)
                .finish(),
            Self::Stream { mime_type, .. } => f
                .debug_struct("Stream")
                .field("mime_type", mime_type)
                .finish_non_exhaustive(),
            Self::LocalFile { path, mime_type } => f
                .debug_struct("LocalFile")
                .field("path", path)
                .field("mime_type", mime_type)
                .finish(),
        }
    }
}

/// One physical HTTP request.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL without query string.
    pub url: String,
    /// Query parameters, in send order.
    pub params: Vec<(String, String)>,
    pub body: HttpBody,
}

/// Outcome of a physical call that produced an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpResponse {
    /// Status 200.
    Success { body: String },
    /// Any other status.
    Error {
        status: u16,
        reason: String,
        body: String,
    },
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Success { body } | Self::Error { body, .. } => body,
        }
    }
}

/// Performs one HTTP call.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; independent callers may invoke
/// `send` concurrently from different tasks.
///
/// # Object Safety
/// The trait is object-safe and is stored as `Arc<dyn HttpTransport>`.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// Send the request. Timeouts are the implementation's concern and surface
    /// as [`TransportError::Timeout`]; implementations must not retry.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Short identifier for logs.
    fn name(&self) -> &str;
}
