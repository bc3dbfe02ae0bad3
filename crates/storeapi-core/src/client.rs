//! Single-request executor and batch dispatcher.
//!
//! [`ApiClient`] turns a [`RequestInfo`] into one [`HttpRequest`], hands it
//! to the transport, and maps every outcome onto [`ApiClientError`]:
//!
//! | Transport outcome        | Body decodes as…   | Result                       |
//! |--------------------------|--------------------|------------------------------|
//! | `Err(TransportError)`    | (none)             | `Err(Transport)`             |
//! | `Success` (200)          | `T`                | `Ok(T)`                      |
//! | `Success` (200)          | nothing            | `Err(Parse { body, .. })`    |
//! | `Error` (non-200)        | [`ApiError`]       | `Err(Api { status, .. })`    |
//! | `Error` (non-200)        | nothing            | `Err(Parse { body, .. })`    |
//!
//! Nothing is retried here; [`ApiClientError::is_retryable`] tells the
//! caller whether its own policy should try again.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::batch::{
    BatchPayload, BatchRequest, EscapedBatchResult, TypedBatchResult, BATCH_ENDPOINT,
};
use crate::codec::{JsonCodec, WireCodec};
use crate::error::{ApiClientError, ApiError, EncodeError};
use crate::request::{ApiRequest, RequestBody, RequestInfo};
use crate::transport::{HttpBody, HttpRequest, HttpResponse, HttpTransport};

pub const DEFAULT_BASE_URL: &str = "https://app.ecwid.com/api/v3";

/// Which store to talk to and how to authenticate.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub store_id: u64,
    /// Sent as the `token` query parameter of every physical call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ApiConfig {
    pub fn new(store_id: u64) -> Self {
        Self {
            base_url: default_base_url(),
            store_id,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Root URL of the store, e.g. `https://app.ecwid.com/api/v3/1003`.
    pub fn store_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.store_id)
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.store_url(), endpoint.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("store_id", &self.store_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Typed client for one store.
///
/// Cheap to share behind an `Arc`; every call is independent.
pub struct ApiClient<C = JsonCodec> {
    transport: Arc<dyn HttpTransport>,
    config: ApiConfig,
    codec: C,
}

impl ApiClient<JsonCodec> {
    pub fn new(transport: Arc<dyn HttpTransport>, config: ApiConfig) -> Self {
        Self::with_codec(transport, config, JsonCodec)
    }
}

impl<C: WireCodec + Clone> ApiClient<C> {
    pub fn with_codec(transport: Arc<dyn HttpTransport>, config: ApiConfig, codec: C) -> Self {
        Self {
            transport,
            config,
            codec,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Execute a typed request, decoding the result as its declared `Response`.
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiClientError> {
        self.execute(request.to_request_info()).await
    }

    /// Execute one request and decode a 200 body as `T`.
    pub async fn execute<T: DeserializeOwned>(&self, info: RequestInfo) -> Result<T, ApiClientError> {
        let response = self.execute_raw(info).await?;
        self.decode_response(response)
    }

    /// Execute one request without decoding the body.
    ///
    /// Only transport and encoding failures are errors here; any HTTP status
    /// comes back as an [`HttpResponse`].
    pub async fn execute_raw(&self, info: RequestInfo) -> Result<HttpResponse, ApiClientError> {
        let request = self.build_request(info)?;
        let method = request.method;
        let url = request.url.clone();

        tracing::debug!(%method, %url, transport = self.transport.name(), "sending request");

        match self.transport.send(request).await {
            Ok(response) => {
                if let HttpResponse::Error { status, reason, .. } = &response {
                    tracing::warn!(%method, %url, status, %reason, "request returned error status");
                }
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(%method, %url, error = %e, "transport failure");
                Err(e.into())
            }
        }
    }

    /// Encode `batch` and send it as one physical call.
    ///
    /// Only the outer envelope is decoded. Any failure of the outer call fails
    /// the whole batch; no per-slot results exist in that case.
    pub async fn execute_batch(
        &self,
        batch: BatchRequest,
    ) -> Result<EscapedBatchResult, ApiClientError> {
        let stop_on_first_failure = batch.stops_on_first_failure();
        let payload = batch.encode(&self.codec)?;
        self.dispatch(&payload, stop_on_first_failure).await
    }

    /// Like [`execute_batch`](Self::execute_batch), keeping the codec for slot decoding.
    pub async fn execute_typed_batch(
        &self,
        batch: BatchRequest,
    ) -> Result<TypedBatchResult<C>, ApiClientError> {
        let escaped = self.execute_batch(batch).await?;
        Ok(TypedBatchResult::new(escaped, self.codec.clone()))
    }

    /// POST an already encoded payload to the batch endpoint.
    ///
    /// An empty payload is sent like any other.
    pub async fn dispatch(
        &self,
        payload: &BatchPayload,
        stop_on_first_failure: bool,
    ) -> Result<EscapedBatchResult, ApiClientError> {
        let body = RequestBody::json(payload).map_err(EncodeError::from)?;
        let info = RequestInfo::post(BATCH_ENDPOINT, body)
            .param_opt("stopOnFirstFailure", stop_on_first_failure.then_some(true));

        tracing::debug!(requests = payload.len(), stop_on_first_failure, "dispatching batch");

        let result: EscapedBatchResult = self.execute(info).await?;

        tracing::debug!(
            status = ?result.status,
            total = result.total_requests,
            completed = result.completed_requests,
            "batch finished"
        );
        Ok(result)
    }

    fn build_request(&self, info: RequestInfo) -> Result<HttpRequest, ApiClientError> {
        let RequestInfo {
            method,
            endpoint,
            params,
            body,
        } = info;

        let mut params: Vec<(String, String)> = params.into_iter().collect();
        if let Some(token) = &self.config.token {
            params.push(("token".to_string(), token.clone()));
        }

        let body = if method.allows_body() {
            body.into_http_body(&self.codec).map_err(EncodeError::from)?
        } else {
            if !body.is_empty() {
                tracing::trace!(%method, %endpoint, kind = body.kind(), "dropping body of bodiless method");
            }
            HttpBody::Empty
        };

        Ok(HttpRequest {
            method,
            url: self.config.endpoint_url(&endpoint),
            params,
            body,
        })
    }

    fn decode_response<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<T, ApiClientError> {
        match response {
            HttpResponse::Success { body } => match self.codec.deserialize::<T>(&body) {
                Ok(value) => Ok(value),
                Err(source) => Err(ApiClientError::Parse { body, source }),
            },
            HttpResponse::Error {
                status,
                reason,
                body,
            } => match self.codec.deserialize::<ApiError>(&body) {
                Ok(error) => Err(ApiClientError::Api {
                    status,
                    reason,
                    error,
                }),
                Err(source) => Err(ApiClientError::Parse { body, source }),
            },
        }
    }
}
