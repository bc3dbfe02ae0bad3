//! Batch decoder: escaped sub-responses → typed results, on demand.
//!
//! A batch mixes request types, so no single shape fits the whole envelope.
//! Each slot is decoded only when the caller names the shape it expects, and
//! every decode is a pure function of the slot and the shape: nothing is
//! cached, and one slot's outcome never affects another's.

use serde::de::DeserializeOwned;

use crate::batch::encoder::BatchSlot;
use crate::batch::envelope::{BatchStatus, EscapedBatchResult, EscapedSubResponse, SubResponseStatus};
use crate::codec::{CodecError, JsonCodec, WireCodec};
use crate::error::ApiError;

/// Caller-facing outcome of one batch slot.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedResult<T> {
    Ok(T),
    /// The sub-request failed remotely with a well-formed error payload.
    ApiError(ApiError),
    /// The body did not decode as the expected shape (or as [`ApiError`]).
    ParseError(CodecError),
    /// The server never ran the sub-request.
    NotExecuted,
}

impl<T> TypedResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_not_executed(&self) -> bool {
        matches!(self, Self::NotExecuted)
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ok(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::ApiError(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TypedResult<U> {
        match self {
            Self::Ok(value) => TypedResult::Ok(f(value)),
            Self::ApiError(err) => TypedResult::ApiError(err),
            Self::ParseError(err) => TypedResult::ParseError(err),
            Self::NotExecuted => TypedResult::NotExecuted,
        }
    }
}

impl EscapedSubResponse {
    /// Decode this slot as `T`.
    ///
    /// Body absence is checked before the coarse status: a slot without a body
    /// is `NotExecuted` whatever its status says, and a `NOT_EXECUTED` slot
    /// that does carry a body is still `NotExecuted`. So is a slot whose status
    /// tag is not one this client knows.
    pub fn to_typed<T: DeserializeOwned, C: WireCodec>(&self, codec: &C) -> TypedResult<T> {
        let Some(body) = self.body.as_deref() else {
            return TypedResult::NotExecuted;
        };

        let outcome = match self.status {
            SubResponseStatus::Completed => match codec.deserialize::<T>(body) {
                Ok(value) => TypedResult::Ok(value),
                Err(err) => TypedResult::ParseError(err),
            },
            SubResponseStatus::Failed => match codec.deserialize::<ApiError>(body) {
                Ok(err) => TypedResult::ApiError(err),
                Err(err) => TypedResult::ParseError(err),
            },
            SubResponseStatus::NotExecuted | SubResponseStatus::Unknown => TypedResult::NotExecuted,
        };

        if let TypedResult::ParseError(err) = &outcome {
            tracing::debug!(id = %self.id, status = %self.status, error = %err, "batch slot failed to decode");
        }
        outcome
    }
}

/// An escaped batch result paired with the codec that decodes its slots.
#[derive(Debug, Clone)]
pub struct TypedBatchResult<C = JsonCodec> {
    escaped: EscapedBatchResult,
    codec: C,
}

impl<C: WireCodec> TypedBatchResult<C> {
    pub fn new(escaped: EscapedBatchResult, codec: C) -> Self {
        Self { escaped, codec }
    }

    pub fn status(&self) -> BatchStatus {
        self.escaped.status
    }

    pub fn total_requests(&self) -> u32 {
        self.escaped.total_requests
    }

    pub fn completed_requests(&self) -> u32 {
        self.escaped.completed_requests
    }

    pub fn escaped(&self) -> &EscapedBatchResult {
        &self.escaped
    }

    pub fn into_escaped(self) -> EscapedBatchResult {
        self.escaped
    }

    /// The raw sub-response for `id`, if the server returned one.
    pub fn response(&self, id: &str) -> Option<&EscapedSubResponse> {
        self.escaped.response(id)
    }

    /// Decode slot `id` as `T`. `None` if the envelope has no such id.
    pub fn typed<T: DeserializeOwned>(&self, id: &str) -> Option<TypedResult<T>> {
        self.response(id).map(|r| r.to_typed(&self.codec))
    }

    /// Decode the slot returned by [`BatchRequest::add`](crate::batch::BatchRequest::add).
    pub fn get<T: DeserializeOwned>(&self, slot: &BatchSlot<T>) -> Option<TypedResult<T>> {
        self.typed(slot.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Product {
        id: u64,
        name: String,
    }

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct UpdateStatus {
        update_count: u32,
    }

    fn slot(status: SubResponseStatus, body: Option<&str>) -> EscapedSubResponse {
        EscapedSubResponse {
            id: "0".into(),
            body: body.map(str::to_string),
            http_status_code: 200,
            http_status_line: "HTTP/1.1 200 OK".into(),
            status,
        }
    }

    #[test]
    fn completed_with_valid_body_is_ok() {
        let s = slot(SubResponseStatus::Completed, Some(r#"{"id":5,"name":"Hat"}"#));
        let typed: TypedResult<Product> = s.to_typed(&JsonCodec);
        assert_eq!(
            typed,
            TypedResult::Ok(Product {
                id: 5,
                name: "Hat".into()
            })
        );
    }

    #[test]
    fn completed_with_wrong_shape_is_parse_error() {
        let s = slot(SubResponseStatus::Completed, Some(r#"{"updateCount":1}"#));
        let typed: TypedResult<Product> = s.to_typed(&JsonCodec);
        assert!(matches!(typed, TypedResult::ParseError(CodecError::ShapeMismatch { .. })));

        let s = slot(SubResponseStatus::Completed, Some("<html>"));
        let typed: TypedResult<Product> = s.to_typed(&JsonCodec);
        assert!(matches!(typed, TypedResult::ParseError(CodecError::Malformed { .. })));
    }

    #[test]
    fn absent_body_is_not_executed_for_every_status() {
        for status in [
            SubResponseStatus::Completed,
            SubResponseStatus::Failed,
            SubResponseStatus::NotExecuted,
            SubResponseStatus::Unknown,
        ] {
            let typed: TypedResult<Product> = slot(status, None).to_typed(&JsonCodec);
            assert_eq!(typed, TypedResult::NotExecuted, "status {status}");
        }
    }

    #[test]
    fn not_executed_with_body_is_still_not_executed() {
        let s = slot(SubResponseStatus::NotExecuted, Some(r#"{"id":1,"name":"x"}"#));
        assert!(s.to_typed::<Product, _>(&JsonCodec).is_not_executed());
    }

    #[test]
    fn unknown_status_with_body_is_not_executed() {
        let s = slot(SubResponseStatus::Unknown, Some(r#"{"id":1,"name":"x"}"#));
        assert!(s.to_typed::<Product, _>(&JsonCodec).is_not_executed());
    }

    #[test]
    fn failed_with_error_body_is_api_error() {
        let s = slot(
            SubResponseStatus::Failed,
            Some(r#"{"errorMessage":"Product #9 not found","errorCode":"PRODUCT_NOT_FOUND"}"#),
        );
        let typed: TypedResult<Product> = s.to_typed(&JsonCodec);
        let err = typed.api_error().unwrap();
        assert_eq!(err.error_message, "Product #9 not found");
        assert_eq!(err.error_code.as_deref(), Some("PRODUCT_NOT_FOUND"));
    }

    #[test]
    fn failed_with_garbage_body_is_parse_error() {
        let s = slot(SubResponseStatus::Failed, Some("Bad Gateway"));
        assert!(matches!(
            s.to_typed::<Product, _>(&JsonCodec),
            TypedResult::ParseError(_)
        ));
    }

    #[test]
    fn decoding_is_repeatable_and_shape_specific() {
        let s = slot(SubResponseStatus::Completed, Some(r#"{"id":2,"name":"Mug","updateCount":4}"#));
        let a: TypedResult<Product> = s.to_typed(&JsonCodec);
        let b: TypedResult<Product> = s.to_typed(&JsonCodec);
        assert_eq!(a, b);

        let other: TypedResult<UpdateStatus> = s.to_typed(&JsonCodec);
        assert_eq!(other, TypedResult::Ok(UpdateStatus { update_count: 4 }));

        let raw: TypedResult<serde_json::Value> = s.to_typed(&JsonCodec);
        assert_eq!(raw.ok().unwrap()["name"], "Mug");
    }

    #[test]
    fn map_preserves_non_ok_variants() {
        let ok: TypedResult<u32> = TypedResult::Ok(2);
        assert_eq!(ok.map(|v| v * 10), TypedResult::Ok(20));
        let skipped: TypedResult<u32> = TypedResult::NotExecuted;
        assert_eq!(skipped.map(|v| v * 10), TypedResult::NotExecuted);
    }

    #[test]
    fn typed_batch_result_lookups() {
        let escaped = EscapedBatchResult {
            status: BatchStatus::Completed,
            total_requests: 1,
            completed_requests: 1,
            responses: Some(vec![slot(
                SubResponseStatus::Completed,
                Some(r#"{"id":1,"name":"Pen"}"#),
            )]),
        };
        let result = TypedBatchResult::new(escaped, JsonCodec);
        assert_eq!(result.status(), BatchStatus::Completed);
        assert_eq!(result.completed_requests(), 1);
        assert!(result.typed::<Product>("0").unwrap().is_ok());
        assert!(result.typed::<Product>("1").is_none());
    }
}
