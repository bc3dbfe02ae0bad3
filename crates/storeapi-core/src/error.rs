//! Error taxonomy shared by the executor and the batch pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::CodecError;

/// Errors raised by an [`HttpTransport`](crate::transport::HttpTransport)
/// before any HTTP status is available.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established (refused, DNS, TLS handshake).
    #[error("connection failed: {0}")]
    Connect(String),

    /// Request timed out after the configured duration.
    #[error("request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Local I/O failure, e.g. a file-backed body could not be opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP exchange failed mid-flight (malformed response, body read error).
    #[error("HTTP error: {0}")]
    Http(String),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if the failure is transient and a caller-side retry may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Timeout { .. } | Self::Http(_))
    }
}

/// The remote API's error payload, returned with every non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_code {
            Some(code) => write!(f, "{code}: {}", self.error_message),
            None => write!(f, "{}", self.error_message),
        }
    }
}

/// A request could not be turned into wire form. Nothing was sent.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Stream, file and binary bodies have no representation inside a batch payload.
    #[error("sub-request {id}: {kind} body cannot be embedded in a batch payload")]
    UnsupportedBatchBody { id: String, kind: &'static str },
}

/// Unified failure type of a single physical API call.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The call never produced an HTTP status.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Non-200 status with a well-formed error payload.
    #[error("API error (HTTP {status} {reason}): {error}")]
    Api {
        status: u16,
        reason: String,
        error: ApiError,
    },

    /// The response body did not decode as the expected shape.
    #[error("failed to parse response body: {source}")]
    Parse {
        body: String,
        #[source]
        source: CodecError,
    },

    #[error("failed to encode request: {0}")]
    Encode(#[from] EncodeError),
}

impl ApiClientError {
    /// Returns `true` for failures a caller-side retry policy may act on:
    /// transient transport failures, HTTP 429 and HTTP 5xx.
    ///
    /// Nothing in this workspace retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_transient(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Parse { .. } | Self::Encode(_) => false,
        }
    }

    /// The remote error payload, if the server returned one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}
