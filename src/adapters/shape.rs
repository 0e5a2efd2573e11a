//! Response Shape Checks
//!
//! One place for the "is this an array / object / number" guards that every
//! JSON consumer needs. Each check returns a typed `UpstreamShape` or
//! `Parse` error instead of letting a bad document fail deep in filter logic.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::ports::FetchErrorKind;

/// JSON type name used in shape errors
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn expect_array(value: &Value) -> Result<&Vec<Value>, FetchErrorKind> {
    value.as_array().ok_or(FetchErrorKind::UpstreamShape {
        expected: "array",
        found: kind_of(value),
    })
}

pub fn expect_object(value: &Value) -> Result<&Map<String, Value>, FetchErrorKind> {
    value.as_object().ok_or(FetchErrorKind::UpstreamShape {
        expected: "object",
        found: kind_of(value),
    })
}

/// Array stored under `key`; absent or null counts as empty
pub fn optional_array<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a [Value], FetchErrorKind> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(value) => expect_array(value).map(Vec::as_slice),
    }
}

/// Follow a path of object keys down to a number
pub fn number_at(value: &Value, path: &[&str]) -> Result<f64, FetchErrorKind> {
    let mut current = value;
    for key in path {
        current = expect_object(current)?
            .get(*key)
            .ok_or_else(|| FetchErrorKind::Parse(format!("missing field '{}'", path.join("."))))?;
    }

    current.as_f64().ok_or(FetchErrorKind::UpstreamShape {
        expected: "number",
        found: kind_of(current),
    })
}

/// Decode a JSON value into a typed record
pub fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, FetchErrorKind> {
    T::deserialize(value).map_err(|e| FetchErrorKind::Parse(e.to_string()))
}
