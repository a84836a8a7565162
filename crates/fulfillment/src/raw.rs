//! Untyped request model handed over by the transport.

use std::collections::BTreeMap;

use serde_json::{Number, Value as JsonValue};

/// Request method as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Other(String),
}

impl Method {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "OPTIONS" => Self::Options,
            _ => Self::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Other(s) => s,
        }
    }

    /// Fulfillment is only computed for the designated write operation.
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Post)
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fulfillment request exactly as received: method plus unparsed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: Method,
    pub body: Vec<u8>,
}

impl RawRequest {
    pub fn new(method: Method, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            body: body.into(),
        }
    }

    pub fn post(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Method::Post, body)
    }

    /// POST with `payload` serialized as the JSON body.
    pub fn post_json(payload: &JsonValue) -> Self {
        Self::post(payload.to_string())
    }
}

/// Closed model of a decoded payload value.
///
/// JSON `null` maps to [`RawValue::Absent`]. A missing record key is not a
/// value at all; callers see it as `None` from [`RawValue::field`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Absent,
    Bool(bool),
    Number(Number),
    Text(String),
    Sequence(Vec<RawValue>),
    Record(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Human-readable name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Sequence(_) => "list",
            Self::Record(_) => "object",
        }
    }

    /// Byte length of text, entry count of sequences and records; `None` for
    /// scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.len()),
            Self::Sequence(items) => Some(items.len()),
            Self::Record(fields) => Some(fields.len()),
            Self::Absent | Self::Bool(_) | Self::Number(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Record(fields) => fields.is_empty(),
            Self::Absent | Self::Bool(_) | Self::Number(_) => false,
        }
    }

    pub fn as_sequence(&self) -> Option<&[RawValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, RawValue>> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&RawValue> {
        self.as_record().and_then(|fields| fields.get(name))
    }

    /// Interpret the value as a signed 64-bit integer.
    ///
    /// Accepts integral numbers (`5`, `5.0`) and decimal text with optional
    /// sign and surrounding whitespace (`" 12 "`, `"-3"`). Everything else,
    /// including fractions and out-of-range values, yields `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(i);
                }
                if n.is_u64() {
                    return None;
                }
                let f = n.as_f64()?;
                let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
                (f.fract() == 0.0 && in_range).then_some(f as i64)
            }
            Self::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }
}

impl From<JsonValue> for RawValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Absent,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => Self::Number(n),
            JsonValue::String(s) => Self::Text(s),
            JsonValue::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(fields) => {
                Self::Record(fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
