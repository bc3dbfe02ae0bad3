//! Batch pipeline: many logical requests, one physical call.
//!
//! ```text
//! BatchRequest ──encode──▶ BatchPayload ──POST batch──▶ EscapedBatchResult
//!                                                            │
//!                             to_typed::<T>(slot) ◀──────────┘
//! ```
//!
//! The dispatcher step lives on [`ApiClient`](crate::client::ApiClient)
//! because it reuses the single-request executor.

pub mod decoder;
pub mod encoder;
pub mod envelope;

pub use decoder::{TypedBatchResult, TypedResult};
pub use encoder::{encode, BatchPayload, BatchRequest, BatchSlot, SubRequest, BATCH_ENDPOINT};
pub use envelope::{BatchStatus, EscapedBatchResult, EscapedSubResponse, SubResponseStatus};
