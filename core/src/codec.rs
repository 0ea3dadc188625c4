//! JSON body codec for the API boundary.
//!
//! # Design
//! The backend speaks snake_case and application state speaks camelCase.
//! Outbound payloads are transcoded to snake_case right before they become
//! JSON text; inbound bodies are transcoded to camelCase right after they
//! are parsed. Nothing else in the crate touches key casing.
//!
//! DTOs that go through this codec are written in camelCase on the serde
//! side, typically with `#[serde(rename_all = "camelCase")]`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::transcode::{into_camel, into_snake, to_snake};

/// Serialize `payload` into a snake_case JSON body.
pub fn encode_body<T: Serialize + ?Sized>(payload: &T) -> Result<String, ApiError> {
    let value = serde_json::to_value(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    let body = serde_json::to_string(&into_snake(value)).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    tracing::trace!(%body, "encoded outbound body");
    Ok(body)
}

/// Serialize an already-built camelCase `value` into a snake_case JSON body.
pub fn encode_value(value: &Value) -> Result<String, ApiError> {
    serde_json::to_string(&to_snake(value)).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Parse a snake_case JSON body into its camelCase `Value`.
pub fn decode_value(body: &str) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, "inbound body is not valid JSON");
        ApiError::DeserializationError(e.to_string())
    })?;
    Ok(into_camel(value))
}

/// Parse a snake_case JSON body and deserialize its camelCase form into `T`.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value = decode_value(body)?;
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, "inbound body does not match the expected shape");
        ApiError::DeserializationError(e.to_string())
    })
}
