//! Logical request types: what a typed endpoint call reduces to.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::{CodecError, WireCodec};
use crate::transport::{BodyStream, HttpBody};

pub const MIME_JSON: &str = "application/json";

/// HTTP method of a logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Only POST and PUT carry a body on the wire.
    pub fn allows_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body as produced by a typed request.
///
/// `Json` bodies stay structured until the codec renders them, which lets the
/// batch encoder embed them in the payload instead of double-encoding.
pub enum RequestBody {
    Empty,
    Json(Value),
    Text { body: String, mime_type: String },
    Bytes { bytes: Vec<u8>, mime_type: String },
    Stream { stream: BodyStream, mime_type: String },
    LocalFile { path: PathBuf, mime_type: String },
    /// A DTO that failed to serialize. Executing it fails before anything is sent.
    Invalid(CodecError),
}

impl RequestBody {
    /// Structured JSON body from any serializable DTO.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, CodecError> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| CodecError::Serialize {
                shape: std::any::type_name::<T>(),
                message: e.to_string(),
            })
    }

    /// Like [`json`](Self::json), deferring a serialization failure to execution time.
    pub fn dto<T: Serialize + ?Sized>(value: &T) -> Self {
        Self::json(value).unwrap_or_else(Self::Invalid)
    }

    pub fn text(body: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Text {
            body: body.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self::Bytes {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn local_file(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        Self::LocalFile {
            path: path.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Short name of the variant, used in log fields and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Json(_) => "json",
            Self::Text { .. } => "text",
            Self::Bytes { .. } => "bytes",
            Self::Stream { .. } => "stream",
            Self::LocalFile { .. } => "local-file",
            Self::Invalid(_) => "invalid",
        }
    }

    /// Render into the transport's body form; `Json` goes through `codec`.
    pub fn into_http_body<C: WireCodec>(self, codec: &C) -> Result<HttpBody, CodecError> {
        Ok(match self {
            Self::Empty => HttpBody::Empty,
            Self::Json(value) => HttpBody::Text {
                body: codec.serialize(&value)?,
                mime_type: MIME_JSON.to_string(),
            },
            Self::Text { body, mime_type } => HttpBody::Text { body, mime_type },
            Self::Bytes { bytes, mime_type } => HttpBody::Bytes { bytes, mime_type },
            Self::Stream { stream, mime_type } => HttpBody::Stream { stream, mime_type },
            Self::LocalFile { path, mime_type } => HttpBody::LocalFile { path, mime_type },
            Self::Invalid(err) => return Err(err),
        })
    }
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Text { body, mime_type } => f
                .debug_struct("Text")
                .field("body", body)
                .field("mime_type", mime_type)
                .finish(),
            other => f.write_str(other.kind()),
        }
    }
}

/// A logical request reduced to method, endpoint, params and body.
///
/// `endpoint` is relative to the store root (`products/42`, `orders`) with
/// path parameters already interpolated.
#[derive(Debug)]
pub struct RequestInfo {
    pub method: HttpMethod,
    pub endpoint: String,
    pub params: BTreeMap<String, String>,
    pub body: RequestBody,
}

impl RequestInfo {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint, RequestBody::Empty)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint, RequestBody::Empty)
    }

    pub fn post(endpoint: impl Into<String>, body: RequestBody) -> Self {
        Self::new(HttpMethod::Post, endpoint, body)
    }

    pub fn put(endpoint: impl Into<String>, body: RequestBody) -> Self {
        Self::new(HttpMethod::Put, endpoint, body)
    }

    fn new(method: HttpMethod, endpoint: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
            body,
        }
    }

    /// Add one query parameter, replacing an earlier value for the same name.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Add a parameter only when `value` is present.
    pub fn param_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }
}

/// A typed endpoint call.
///
/// The associated `Response` is the shape a successful call decodes into; the
/// batch API uses it to tag each slot with its expected result type.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn to_request_info(&self) -> RequestInfo;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::JsonCodec;
    use serde_json::json;

    #[test]
    fn method_wire_names() {
        assert_eq!(serde_json::to_string(&HttpMethod::Delete).unwrap(), "\"DELETE\"");
        let m: HttpMethod = serde_json::from_str("\"PUT\"").unwrap();
        assert_eq!(m, HttpMethod::Put);
        assert!(HttpMethod::Post.allows_body());
        assert!(!HttpMethod::Get.allows_body());
    }

    #[test]
    fn get_and_delete_have_no_body() {
        assert!(RequestInfo::get("products/1").body.is_empty());
        assert!(RequestInfo::delete("products/1").body.is_empty());
    }

    #[test]
    fn params_are_ordered_and_optional() {
        let info = RequestInfo::get("products")
            .param("limit", 10)
            .param_opt("keyword", Some("shoe"))
            .param_opt::<u32>("offset", None);
        let names: Vec<_> = info.params.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["keyword", "limit"]);
        assert_eq!(info.params["limit"], "10");
    }

    #[test]
    fn json_body_renders_through_codec() {
        let body = RequestBody::json(&json!({"name": "Hat"})).unwrap();
        assert_eq!(body.kind(), "json");
        match body.into_http_body(&JsonCodec).unwrap() {
            HttpBody::Text { body, mime_type } => {
                assert_eq!(body, r#"{"name":"Hat"}"#);
                assert_eq!(mime_type, MIME_JSON);
            }
            other => panic!("expected text body, got {other:?}"),
        }
    }

    #[test]
    fn unserializable_dto_fails_at_render_time() {
        use std::collections::HashMap;
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], "non-string key");

        let body = RequestBody::dto(&bad);
        assert_eq!(body.kind(), "invalid");
        assert!(matches!(
            body.into_http_body(&JsonCodec),
            Err(CodecError::Serialize { .. })
        ));
    }

    #[test]
    fn non_json_bodies_pass_through() {
        let body = RequestBody::bytes(vec![0xff, 0x00], "image/png");
        match body.into_http_body(&JsonCodec).unwrap() {
            HttpBody::Bytes { bytes, mime_type } => {
                assert_eq!(bytes, vec![0xff, 0x00]);
                assert_eq!(mime_type, "image/png");
            }
            other => panic!("expected bytes body, got {other:?}"),
        }
    }
}
