//! Wire codec: text ⇄ typed value conversion.
//!
//! The executor and the batch decoder never call `serde_json` directly; they
//! go through a [`WireCodec`], and decode failures come back as [`CodecError`]
//! values.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use thiserror::Error;

/// Why a value could not be serialized or a text could not be decoded.
///
/// Holds rendered messages, not the underlying `serde_json::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The text is not well-formed JSON (syntax error or premature end).
    #[error("malformed JSON at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed JSON that does not fit the requested shape.
    #[error("JSON does not match `{shape}`: {message}")]
    ShapeMismatch { shape: &'static str, message: String },

    #[error("failed to serialize `{shape}`: {message}")]
    Serialize { shape: &'static str, message: String },
}

impl CodecError {
    fn from_decode<T>(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::ShapeMismatch {
                shape: std::any::type_name::<T>(),
                message: err.to_string(),
            },
            Category::Syntax | Category::Eof | Category::Io => Self::Malformed {
                line: err.line(),
                column: err.column(),
                message: err.to_string(),
            },
        }
    }
}

/// Text ⇄ value capability consumed by the executor and the batch pipeline.
pub trait WireCodec: Send + Sync {
    /// Serialize `value` to its wire text.
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError>;

    /// Decode `text` into `T`.
    fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError>;
}

/// The default `serde_json` codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl WireCodec for JsonCodec {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(|e| CodecError::Serialize {
            shape: std::any::type_name::<T>(),
            message: e.to_string(),
        })
    }

    fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError> {
        serde_json::from_str(text).map_err(CodecError::from_decode::<T>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Counter {
        count: u32,
    }

    #[test]
    fn decodes_matching_shape() {
        let c: Counter = JsonCodec.deserialize(r#"{"count":3}"#).unwrap();
        assert_eq!(c, Counter { count: 3 });
    }

    #[test]
    fn syntax_error_is_malformed() {
        let err = JsonCodec.deserialize::<Counter>(r#"{"count":"#).unwrap_err();
        assert!(matches!(err, CodecError::Malformed { line: 1, .. }), "{err:?}");
    }

    #[test]
    fn wrong_field_type_is_shape_mismatch() {
        let err = JsonCodec
            .deserialize::<Counter>(r#"{"count":"three"}"#)
            .unwrap_err();
        match err {
            CodecError::ShapeMismatch { shape, .. } => assert!(shape.ends_with("Counter")),
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn serialize_roundtrips_through_text() {
        let text = JsonCodec.serialize(&serde_json::json!({"a": [1, 2]})).unwrap();
        assert_eq!(text, r#"{"a":[1,2]}"#);
    }
}
