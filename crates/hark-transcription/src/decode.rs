//! Response decoding
//!
//! Maps a parsed JSON tree onto [`TranscriptionResult`]. Failures name the
//! offending field path (`text`, `words[2].end`, `segments[0].seek`) and abort
//! the whole response; there is no partial result.

use serde_json::{Map, Value};
use strum::Display;

use crate::{
    types::{Segment, TranscriptionResult, Word},
    wire::json as key,
};

/// Path of the document root in error messages
pub const ROOT: &str = "$";

/// Kind of a JSON value, as reported in type mismatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum JsonKind {
    Null,
    Bool,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

/// Errors produced while decoding a transcription response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A required key is absent
    #[error("missing field `{path}`")]
    MissingField { path: String },

    /// A key is present with the wrong kind of value
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: JsonKind,
        found: JsonKind,
    },

    /// An integral value does not fit a signed 64-bit integer
    #[error("integer out of range at `{path}`")]
    OutOfRange { path: String },

    /// The body is not JSON at all
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

impl DecodeError {
    /// Field path the error refers to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingField { path } | Self::TypeMismatch { path, .. } | Self::OutOfRange { path } => {
                Some(path)
            }
            Self::InvalidJson(_) => None,
        }
    }
}

/// Decode a transcription response from raw bytes
///
/// # Errors
///
/// Returns [`DecodeError::InvalidJson`] for malformed JSON, otherwise the
/// errors of [`decode_value`]
pub fn decode_slice(bytes: &[u8]) -> Result<TranscriptionResult, DecodeError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    decode_value(&value)
}

/// Decode a transcription response from a parsed JSON tree
///
/// # Errors
///
/// Returns [`DecodeError::MissingField`] when a required key is absent and
/// [`DecodeError::TypeMismatch`] when a key holds the wrong kind of value.
/// Integral values beyond `i64::MAX` give [`DecodeError::OutOfRange`]
pub fn decode_value(value: &Value) -> Result<TranscriptionResult, DecodeError> {
    TranscriptionResult::decode(value, ROOT)
}

/// Types that can be read out of a JSON tree at a given path
trait Decode: Sized {
    fn decode(value: &Value, path: &str) -> Result<Self, DecodeError>;
}

impl Decode for TranscriptionResult {
    fn decode(value: &Value, path: &str) -> Result<Self, DecodeError> {
        let object = Object::new(value, path)?;

        Ok(Self {
            text: object.required(key::TEXT, string)?,
            language: object.optional(key::LANGUAGE, string)?,
            duration: object.optional(key::DURATION, real)?,
            words: object.optional(key::WORDS, list::<Word>)?,
            segments: object.optional(key::SEGMENTS, list::<Segment>)?,
        })
    }
}

impl Decode for Word {
    fn decode(value: &Value, path: &str) -> Result<Self, DecodeError> {
        let object = Object::new(value, path)?;

        Ok(Self {
            word: object.required(key::WORD, string)?,
            start: object.required(key::START, real)?,
            end: object.required(key::END, real)?,
        })
    }
}

impl Decode for Segment {
    fn decode(value: &Value, path: &str) -> Result<Self, DecodeError> {
        let object = Object::new(value, path)?;

        Ok(Self {
            seek: object.required(key::SEEK, integer)?,
            start: object.required(key::START, real)?,
            end: object.required(key::END, real)?,
            text: object.required(key::TEXT, string)?,
            tokens: object.required(key::TOKENS, integers)?,
            temperature: object.required(key::TEMPERATURE, real)?,
            avg_logprob: object.required(key::AVG_LOGPROB, real)?,
            compression_ratio: object.required(key::COMPRESSION_RATIO, real)?,
            no_speech_prob: object.required(key::NO_SPEECH_PROB, real)?,
        })
    }
}

/// A JSON object together with the path it was found at
struct Object<'a> {
    fields: &'a Map<String, Value>,
    path: &'a str,
}

impl<'a> Object<'a> {
    fn new(value: &'a Value, path: &'a str) -> Result<Self, DecodeError> {
        match value {
            Value::Object(fields) => Ok(Self { fields, path }),
            other => Err(mismatch(path, JsonKind::Object, other)),
        }
    }

    /// Read a key that must be present
    fn required<T>(&self, name: &str, read: fn(&Value, &str) -> Result<T, DecodeError>) -> Result<T, DecodeError> {
        let path = child(self.path, name);

        match self.fields.get(name) {
            Some(value) => read(value, &path),
            None => Err(DecodeError::MissingField { path }),
        }
    }

    /// Read a key that may be absent or `null`
    fn optional<T>(
        &self,
        name: &str,
        read: fn(&Value, &str) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => read(value, &child(self.path, name)).map(Some),
        }
    }
}

fn child(parent: &str, name: &str) -> String {
    if parent == ROOT {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn element(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

fn mismatch(path: &str, expected: JsonKind, found: &Value) -> DecodeError {
    DecodeError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: JsonKind::of(found),
    }
}

fn string(value: &Value, path: &str) -> Result<String, DecodeError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(path, JsonKind::String, value))
}

/// Any JSON number, integral or not
fn real(value: &Value, path: &str) -> Result<f64, DecodeError> {
    value.as_f64().ok_or_else(|| mismatch(path, JsonKind::Number, value))
}

/// Integral JSON numbers only; `1.0` is rejected
fn integer(value: &Value, path: &str) -> Result<i64, DecodeError> {
    match value.as_i64() {
        Some(integer) => Ok(integer),
        None if value.is_u64() => Err(DecodeError::OutOfRange { path: path.to_string() }),
        None => Err(mismatch(path, JsonKind::Integer, value)),
    }
}

fn array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, DecodeError> {
    value.as_array().ok_or_else(|| mismatch(path, JsonKind::Array, value))
}

fn integers(value: &Value, path: &str) -> Result<Vec<i64>, DecodeError> {
    array(value, path)?
        .iter()
        .enumerate()
        .map(|(index, item)| integer(item, &element(path, index)))
        .collect()
}

fn list<T: Decode>(value: &Value, path: &str) -> Result<Vec<T>, DecodeError> {
    array(value, path)?
        .iter()
        .enumerate()
        .map(|(index, item)| T::decode(item, &element(path, index)))
        .collect()
}
