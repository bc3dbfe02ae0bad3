//! Batch encoder: an ordered list of logical requests → one payload.
//!
//! Each request gets its zero-based position as id. The id is the only key
//! that ties a sub-response back to its request, so requests must not be
//! reordered between encoding and result lookup.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::WireCodec;
use crate::error::EncodeError;
use crate::request::{ApiRequest, HttpMethod, RequestBody, RequestInfo, MIME_JSON};

/// Endpoint of the physical batch call, relative to the store root.
pub const BATCH_ENDPOINT: &str = "batch";

/// One logical request inside a batch payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRequest {
    pub id: String,
    pub method: HttpMethod,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    /// Absent for bodiless requests; a zero-length body is `Some("")`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// The body of the physical batch call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchPayload {
    pub requests: Vec<SubRequest>,
}

impl BatchPayload {
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.requests.iter().map(|r| r.id.as_str())
    }
}

/// Id of an encoded sub-request, tagged with the shape its result decodes into.
pub struct BatchSlot<T> {
    id: String,
    _shape: PhantomData<fn() -> T>,
}

impl<T> BatchSlot<T> {
    fn new(id: String) -> Self {
        Self {
            id,
            _shape: PhantomData,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl<T> Clone for BatchSlot<T> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl<T> std::fmt::Debug for BatchSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchSlot")
            .field("id", &self.id)
            .field("shape", &std::any::type_name::<T>())
            .finish()
    }
}

/// Accumulates requests for one batch call.
///
/// ```
/// use storeapi_core::batch::BatchRequest;
/// use storeapi_core::request::RequestInfo;
///
/// let mut batch = BatchRequest::new().stop_on_first_failure(true);
/// let id = batch.add_info(RequestInfo::get("products/7"));
/// assert_eq!(id, "0");
/// assert_eq!(batch.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct BatchRequest {
    requests: Vec<RequestInfo>,
    stop_on_first_failure: bool,
}

impl BatchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the server to skip every sub-request after the first failed one.
    /// Skipped sub-requests come back as `NOT_EXECUTED`.
    pub fn stop_on_first_failure(mut self, stop: bool) -> Self {
        self.stop_on_first_failure = stop;
        self
    }

    pub fn stops_on_first_failure(&self) -> bool {
        self.stop_on_first_failure
    }

    /// Append a typed request; the returned slot decodes as its `Response`.
    pub fn add<R: ApiRequest>(&mut self, request: &R) -> BatchSlot<R::Response> {
        BatchSlot::new(self.add_info(request.to_request_info()))
    }

    /// Append an untyped request and return its id.
    pub fn add_info(&mut self, info: RequestInfo) -> String {
        let id = self.requests.len().to_string();
        self.requests.push(info);
        id
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn encode<C: WireCodec>(self, codec: &C) -> Result<BatchPayload, EncodeError> {
        encode(self.requests, codec)
    }
}

/// Encode `requests` into one payload with ids `"0"..="N-1"` in order.
pub fn encode<C: WireCodec>(
    requests: Vec<RequestInfo>,
    codec: &C,
) -> Result<BatchPayload, EncodeError> {
    let requests = requests
        .into_iter()
        .enumerate()
        .map(|(index, info)| encode_one(index.to_string(), info, codec))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(requests = requests.len(), "encoded batch payload");
    Ok(BatchPayload { requests })
}

fn encode_one<C: WireCodec>(
    id: String,
    info: RequestInfo,
    codec: &C,
) -> Result<SubRequest, EncodeError> {
    let body = if info.method.allows_body() {
        embed_body(&id, info.body, codec)?
    } else {
        if !info.body.is_empty() {
            tracing::trace!(%id, method = %info.method, endpoint = %info.endpoint, kind = info.body.kind(), "dropping body of bodiless method");
        }
        None
    };
    Ok(SubRequest {
        id,
        method: info.method,
        endpoint: info.endpoint,
        params: info.params,
        body,
    })
}

fn embed_body<C: WireCodec>(
    id: &str,
    body: RequestBody,
    codec: &C,
) -> Result<Option<Value>, EncodeError> {
    match body {
        RequestBody::Empty => Ok(None),
        RequestBody::Json(value) => Ok(Some(value)),
        RequestBody::Invalid(err) => Err(err.into()),
        RequestBody::Text { body, mime_type } if !body.is_empty() && is_json_mime(&mime_type) => {
            Ok(Some(codec.deserialize::<Value>(&body)?))
        }
        RequestBody::Text { body, .. } => Ok(Some(Value::String(body))),
        RequestBody::Bytes { bytes, .. } => match String::from_utf8(bytes) {
            Ok(text) => Ok(Some(Value::String(text))),
            Err(_) => Err(EncodeError::UnsupportedBatchBody {
                id: id.to_string(),
                kind: "binary",
            }),
        },
        other => Err(EncodeError::UnsupportedBatchBody {
            id: id.to_string(),
            kind: other.kind(),
        }),
    }
}

fn is_json_mime(mime_type: &str) -> bool {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case(MIME_JSON) || essence.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::JsonCodec;
    use serde_json::json;

    struct Lookup(u64);

    impl ApiRequest for Lookup {
        type Response = Value;

        fn to_request_info(&self) -> RequestInfo {
            RequestInfo::get(format!("products/{}", self.0))
        }
    }

    #[test]
    fn ids_follow_encode_order() {
        for n in [0usize, 1, 2, 7] {
            let requests = (0..n)
                .map(|i| RequestInfo::get(format!("products/{i}")))
                .collect();
            let payload = encode(requests, &JsonCodec).unwrap();
            assert_eq!(payload.len(), n);
            let ids: Vec<_> = payload.ids().collect();
            let expected: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            assert_eq!(ids, expected);
            for (i, sub) in payload.requests.iter().enumerate() {
                assert_eq!(sub.endpoint, format!("products/{i}"));
            }
        }
    }

    #[test]
    fn empty_batch_serializes_to_empty_list() {
        let payload = BatchRequest::new().encode(&JsonCodec).unwrap();
        assert!(payload.is_empty());
        assert_eq!(
            JsonCodec.serialize(&payload).unwrap(),
            r#"{"requests":[]}"#
        );
    }

    #[test]
    fn typed_slots_carry_position_ids() {
        let mut batch = BatchRequest::new();
        let first = batch.add(&Lookup(10));
        let second = batch.add_info(RequestInfo::delete("products/11"));
        let third = batch.add(&Lookup(12));
        assert_eq!(first.id(), "0");
        assert_eq!(second, "1");
        assert_eq!(third.id(), "2");

        let payload = batch.encode(&JsonCodec).unwrap();
        assert_eq!(payload.requests[1].method, HttpMethod::Delete);
        assert_eq!(payload.requests[2].endpoint, "products/12");
    }

    #[test]
    fn absent_and_zero_length_bodies_differ() {
        let requests = vec![
            RequestInfo::get("products/1"),
            RequestInfo::post("products", RequestBody::text("", "text/plain")),
            RequestInfo::post("products", RequestBody::text("", MIME_JSON)),
        ];
        let payload = encode(requests, &JsonCodec).unwrap();
        assert_eq!(payload.requests[0].body, None);
        assert_eq!(payload.requests[1].body, Some(json!("")));
        assert_eq!(payload.requests[2].body, Some(json!("")));

        let wire = JsonCodec.serialize(&payload.requests[0]).unwrap();
        assert!(!wire.contains("body"), "{wire}");
    }

    #[test]
    fn json_bodies_are_embedded_structurally() {
        let requests = vec![
            RequestInfo::post("products", RequestBody::json(&json!({"name": "Cap"})).unwrap()),
            RequestInfo::put(
                "products/3",
                RequestBody::text(r#"{"price":9.5}"#, "application/json; charset=utf-8"),
            )
            .param("fields", "price"),
        ];
        let payload = encode(requests, &JsonCodec).unwrap();
        assert_eq!(payload.requests[0].body, Some(json!({"name": "Cap"})));
        assert_eq!(payload.requests[1].body, Some(json!({"price": 9.5})));
        assert_eq!(payload.requests[1].params["fields"], "price");

        let wire: Value = serde_json::from_str(&JsonCodec.serialize(&payload).unwrap()).unwrap();
        assert_eq!(wire["requests"][1]["method"], "PUT");
        assert_eq!(wire["requests"][1]["id"], "1");
    }

    #[test]
    fn malformed_json_text_fails_encoding() {
        let requests = vec![RequestInfo::post(
            "products",
            RequestBody::text("{not json", MIME_JSON),
        )];
        let err = encode(requests, &JsonCodec).unwrap_err();
        assert!(matches!(err, EncodeError::Codec(_)), "{err:?}");
    }

    #[test]
    fn file_and_binary_bodies_are_rejected() {
        let requests = vec![
            RequestInfo::get("products/1"),
            RequestInfo::post("products/1/image", RequestBody::local_file("/tmp/a.png", "image/png")),
        ];
        match encode(requests, &JsonCodec).unwrap_err() {
            EncodeError::UnsupportedBatchBody { id, kind } => {
                assert_eq!(id, "1");
                assert_eq!(kind, "local-file");
            }
            other => panic!("unexpected error {other:?}"),
        }

        let requests = vec![RequestInfo::post(
            "products/1/image",
            RequestBody::bytes(vec![0xff, 0xfe], "image/png"),
        )];
        assert!(matches!(
            encode(requests, &JsonCodec).unwrap_err(),
            EncodeError::UnsupportedBatchBody { kind: "binary", .. }
        ));
    }

    #[test]
    fn bodiless_methods_drop_their_body() {
        let mut get = RequestInfo::get("products/1");
        get.body = RequestBody::Json(json!({"x": 1}));
        let mut delete = RequestInfo::delete("products/2");
        delete.body = RequestBody::LocalFile {
            path: "/nonexistent".into(),
            mime_type: "image/png".into(),
        };

        let payload = encode(vec![get, delete], &JsonCodec).unwrap();
        assert_eq!(payload.requests[0].body, None);
        assert_eq!(payload.requests[1].body, None);
    }

    #[test]
    fn stop_on_first_failure_flag() {
        let batch = BatchRequest::new();
        assert!(!batch.stops_on_first_failure());
        assert!(batch.stop_on_first_failure(true).stops_on_first_failure());
    }
}
