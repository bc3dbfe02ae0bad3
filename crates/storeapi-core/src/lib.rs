//! storeapi-core: foundation traits and types for StoreAPI.
//!
//! # Overview
//!
//! StoreAPI is a typed client for a store-scoped e-commerce REST API. The
//! core crate is transport-agnostic and defines:
//!
//! - [`HttpTransport`]: the async trait every transport implements
//! - [`RequestInfo`] / [`ApiRequest`]: logical requests and typed endpoints
//! - [`WireCodec`] / [`JsonCodec`]: body (de)serialization
//! - [`ApiClient`]: single-request executor and batch dispatcher
//! - [`batch`] module: encoder, escaped envelope and lazy typed decoder
//! - [`ApiClientError`]: structured error type

pub mod batch;
pub mod client;
pub mod codec;
pub mod error;
pub mod request;
pub mod transport;

pub use batch::{BatchRequest, BatchSlot, EscapedBatchResult, TypedBatchResult, TypedResult};
pub use client::{ApiClient, ApiConfig};
pub use codec::{CodecError, JsonCodec, WireCodec};
pub use error::{ApiClientError, ApiError, EncodeError, TransportError};
pub use request::{ApiRequest, HttpMethod, RequestBody, RequestInfo};
pub use transport::{HttpBody, HttpRequest, HttpResponse, HttpTransport};
