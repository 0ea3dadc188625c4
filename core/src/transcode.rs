//! Recursive key-case transcoding of JSON values.
//!
//! # Design
//! A structural recursion over `serde_json::Value`. Only object keys are
//! rewritten; arrays keep their length and order, and scalars (including
//! strings that look like snake_case) pass through untouched.
//!
//! The borrowing functions (`to_camel`, `to_snake`) leave their input as is
//! and build a fresh value. The owning functions (`into_camel`, `into_snake`)
//! consume the input and reuse its strings and vectors; the codec uses those
//! since a freshly parsed body is discarded right after transcoding.
//!
//! When two source keys map to the same target key (`a_b` and `aB` under
//! camelCase), the later one in iteration order wins and the entry keeps
//! the position of the first.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::casing::KeyCase;

/// Rewrite every object key in `value` from snake_case to camelCase.
pub fn to_camel(value: &Value) -> Value {
    transcode(value, KeyCase::Camel)
}

/// Rewrite every object key in `value` from camelCase to snake_case.
pub fn to_snake(value: &Value) -> Value {
    transcode(value, KeyCase::Snake)
}

/// Rewrite every object key in `value` into `case`, recursing into nested
/// objects and array elements.
pub fn transcode(value: &Value, case: KeyCase) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|item| transcode(item, case)).collect()),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(case.convert(key).into_owned(), transcode(item, case));
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

/// Owning form of [`to_camel`].
pub fn into_camel(value: Value) -> Value {
    transcode_owned(value, KeyCase::Camel)
}

/// Owning form of [`to_snake`].
pub fn into_snake(value: Value) -> Value {
    transcode_owned(value, KeyCase::Snake)
}

/// Owning form of [`transcode`]. Keys that need no rewrite are moved, not
/// copied.
pub fn transcode_owned(value: Value, case: KeyCase) -> Value {
    match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| transcode_owned(item, case)).collect())
        }
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                let rewritten = match case.convert(&key) {
                    Cow::Owned(rewritten) => Some(rewritten),
                    Cow::Borrowed(_) => None,
                };
                out.insert(rewritten.unwrap_or(key), transcode_owned(item, case));
            }
            Value::Object(out)
        }
        scalar => scalar,
    }
}
