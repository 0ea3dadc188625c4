//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! explicit discriminants. JSON crosses the boundary as text, so a single
//! `FfiResult` envelope covers every operation that produces a value.

use std::ffi::CString;
use std::os::raw::c_char;

use pdv_core::{ApiError, HttpMethod};

/// Opaque handle to an `ApiClient`. C callers receive a pointer to this
/// and pass it back into every client function.
pub struct FfiApiClient {
    pub(crate) inner: pdv_core::ApiClient,
}

/// Allocate a C string the caller must release with `pdv_free_string` or a
/// matching `pdv_free_*` function. Interior NUL bytes yield an empty string;
/// serde_json escapes NUL, so JSON text never hits that path.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum. Functions that take a method from C accept the
/// raw discriminant and validate it with [`method_from_raw`].
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Patch = 3,
    Delete = 4,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

pub(crate) fn method_from_raw(raw: u32) -> Option<HttpMethod> {
    match raw {
        0 => Some(HttpMethod::Get),
        1 => Some(HttpMethod::Post),
        2 => Some(HttpMethod::Put),
        3 => Some(HttpMethod::Patch),
        4 => Some(HttpMethod::Delete),
        _ => None,
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data. `body` is
/// snake_case JSON text, or null for bodiless requests.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: pdv_core::HttpRequest) -> *mut Self {
        let path = into_c_string(req.path);
        let body = req.body.map_or(std::ptr::null_mut(), into_c_string);

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing a request and passes a
/// pointer to `pdv_parse_response`. The FFI layer reads but does not free
/// these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    Panic = 5,
    NullArg = 6,
    InvalidArg = 7,
}

/// Result envelope for every operation that yields JSON.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `json`
/// holds camelCase (or, for `pdv_keys_to_snake`, snake_case) JSON text.
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `json` is null.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub json: *mut c_char,
}

impl FfiResult {
    fn boxed(error_code: FfiErrorCode, error_message: *mut c_char, http_status: u16, json: *mut c_char) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message,
            http_status,
            json,
        }))
    }

    /// Build a success result carrying JSON text.
    pub(crate) fn ok_json(json: String) -> *mut Self {
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, into_c_string(json))
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404u16),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
        };
        Self::boxed(error_code, into_c_string(err.to_string()), http_status, std::ptr::null_mut())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null argument: {name}");
        Self::boxed(FfiErrorCode::NullArg, into_c_string(msg), 0, std::ptr::null_mut())
    }

    /// Build an error result for an argument that is present but unusable.
    pub(crate) fn invalid_arg(msg: String) -> *mut Self {
        Self::boxed(FfiErrorCode::InvalidArg, into_c_string(msg), 0, std::ptr::null_mut())
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, into_c_string(msg.to_string()), 0, std::ptr::null_mut())
    }
}
