//! storeapi-http: `reqwest` transport for StoreAPI.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use storeapi_core::client::ApiConfig;
//! use storeapi_http::{connect, HttpTransportConfig};
//!
//! let client = connect(ApiConfig::new(1003).with_token("secret"), HttpTransportConfig::default())?;
//! let product: serde_json::Value = client
//!     .execute(storeapi_core::request::RequestInfo::get("products/7"))
//!     .await?;
//! # let _ = product;
//! # Ok(())
//! # }
//! ```

pub mod client;

use std::sync::Arc;

use storeapi_core::client::{ApiClient, ApiConfig};
use storeapi_core::error::TransportError;

pub use client::{HttpTransportConfig, ReqwestTransport};

/// Build an [`ApiClient`] over a fresh [`ReqwestTransport`].
pub fn connect(api: ApiConfig, http: HttpTransportConfig) -> Result<ApiClient, TransportError> {
    let transport = ReqwestTransport::new(http)?;
    tracing::debug!(store = %api.store_url(), "api client ready");
    Ok(ApiClient::new(Arc::new(transport), api))
}
