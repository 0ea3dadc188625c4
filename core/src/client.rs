//! Stateless HTTP request builder and response parser for the PDV API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each round-trip is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Request bodies leave through [`encode_body`] (snake_case) and response
//! bodies come back through [`decode_body`] (camelCase), so callers only
//! ever see camelCase.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::codec::{decode_body, decode_value, encode_body, encode_value};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Synchronous, stateless client for the PDV REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get(&self, path: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Get, path)
    }

    pub fn build_delete(&self, path: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, path)
    }

    pub fn build_post<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<HttpRequest, ApiError> {
        Ok(self.with_body(HttpMethod::Post, path, encode_body(payload)?))
    }

    pub fn build_put<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<HttpRequest, ApiError> {
        Ok(self.with_body(HttpMethod::Put, path, encode_body(payload)?))
    }

    pub fn build_patch<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<HttpRequest, ApiError> {
        Ok(self.with_body(HttpMethod::Patch, path, encode_body(payload)?))
    }

    /// General form of the `build_*` methods for callers holding a raw
    /// camelCase `Value` rather than a typed payload.
    pub fn build_request(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<HttpRequest, ApiError> {
        match body {
            Some(value) => Ok(self.with_body(method, path, encode_value(value)?)),
            None => Ok(self.bodiless(method, path)),
        }
    }

    /// Parse a 2xx JSON response into `T` after camelCasing its keys.
    pub fn parse_json<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        decode_body(&response.body)
    }

    /// Parse a 2xx JSON response into its camelCase `Value`.
    ///
    /// An empty 2xx body is not JSON and yields `DeserializationError`; use
    /// [`ApiClient::parse_empty`] for bodiless responses such as 204. The C
    /// ABI's `pdv_parse_response` instead maps an empty 2xx body to `""`.
    pub fn parse_value(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        decode_value(&response.body)
    }

    /// Accept any 2xx response and discard its body.
    pub fn parse_empty(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn bodiless(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_body(&self, method: HttpMethod, path: &str, body: String) -> HttpRequest {
        HttpRequest {
            method,
            path: self.url(path),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    tracing::debug!(status = response.status, "backend returned a non-success status");
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
