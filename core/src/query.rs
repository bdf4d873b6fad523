//! Query-string encoding for endpoint options.
//!
//! The Biblia wire format renders every option as `&key=value&`, so two
//! options produce a doubled separator between them (`&mode=verse&&limit=5&`)
//! and the fragment always ends in `&` before the trailing `key=` parameter.
//! Existing fixtures assert these literal strings; the pattern is reproduced
//! exactly.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Characters left untouched by `encode_component`, matching the unreserved
/// set of `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a passage reference or search query for use as a single
/// query value.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// A scalar option value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{n}"),
            QueryValue::Float(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            QueryValue::Float(n) => write!(f, "{n}"),
            QueryValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// Insertion-ordered option mapping. Keys are neither sorted nor deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    entries: Vec<(String, QueryValue)>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten a typed option struct into its present fields, in declaration
    /// order. `None` fields are skipped; nested values are rejected.
    pub fn from_options<T: Serialize>(options: &T) -> Result<Self> {
        let value = serde_json::to_value(options).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(ApiError::Serialization("options must serialize to an object".to_string()));
        };

        let mut out = Self::new();
        for (key, value) in map {
            let scalar = match value {
                Value::Null => continue,
                Value::Bool(b) => QueryValue::Bool(b),
                Value::String(s) => QueryValue::Str(s),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => QueryValue::Int(i),
                    None => QueryValue::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                Value::Array(_) | Value::Object(_) => {
                    return Err(ApiError::Serialization(format!("option `{key}` is not a scalar")));
                }
            };
            out.entries.push((key, scalar));
        }
        Ok(out)
    }

    /// Render as `&key=value&` per entry. Values are inserted unescaped.
    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("&{key}={value}&"))
            .collect()
    }
}

/// Encode an optional option mapping; absent options encode to `""`.
pub fn encode_options(options: Option<&QueryOptions>) -> String {
    options.map(QueryOptions::encode).unwrap_or_default()
}
