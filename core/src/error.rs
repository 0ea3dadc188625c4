//! Error types for the API boundary.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. Key transcoding itself never fails,
//! so only JSON (de)serialization contributes the remaining two variants.

use thiserror::Error;

/// Errors returned by `ApiClient` and the body codec.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body is not JSON, or its camelCase form does not match
    /// the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
