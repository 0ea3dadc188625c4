//! C-ABI wrapper around `pdv-core`.
//!
//! # Overview
//! Exposes key transcoding and the host-does-IO API client through
//! `extern "C"` functions, so a host in any language with a C FFI can
//! normalize payloads without linking serde itself. JSON crosses the
//! boundary as NUL-terminated UTF-8 text.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Operations yielding JSON return an `FfiResult` envelope; request
//!   builders return an `FfiHttpRequest` or null.
//! - The C caller owns all returned pointers and must call the matching
//!   `pdv_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use pdv_core::transcode::transcode_owned;
use pdv_core::{ApiError, HttpResponse, KeyCase};
use serde_json::Value;

use types::*;

/// Borrow a C string as UTF-8. The pointer must be non-null and valid for
/// the duration of the call.
unsafe fn borrow_str<'a>(ptr: *const c_char) -> Result<&'a str, std::str::Utf8Error> {
    unsafe { CStr::from_ptr(ptr) }.to_str()
}

// ---------------------------------------------------------------------------
// Key transcoding
// ---------------------------------------------------------------------------

fn transcode_text(json: *const c_char, case: KeyCase) -> *mut FfiResult {
    if json.is_null() {
        return FfiResult::null_arg("json");
    }
    let text = match unsafe { borrow_str(json) } {
        Ok(text) => text,
        Err(e) => return FfiResult::invalid_arg(format!("json is not valid UTF-8: {e}")),
    };
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return FfiResult::from_error(ApiError::DeserializationError(e.to_string())),
    };
    match serde_json::to_string(&transcode_owned(value, case)) {
        Ok(out) => FfiResult::ok_json(out),
        Err(e) => FfiResult::from_error(ApiError::SerializationError(e.to_string())),
    }
}

/// Rewrite every object key in `json` from snake_case to camelCase.
///
/// The caller must free the returned pointer with `pdv_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn pdv_keys_to_camel(json: *const c_char) -> *mut FfiResult {
    catch_unwind(|| transcode_text(json, KeyCase::Camel))
        .unwrap_or_else(|_| FfiResult::panic("panic in pdv_keys_to_camel"))
}

/// Rewrite every object key in `json` from camelCase to snake_case.
///
/// The caller must free the returned pointer with `pdv_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn pdv_keys_to_snake(json: *const c_char) -> *mut FfiResult {
    catch_unwind(|| transcode_text(json, KeyCase::Snake))
        .unwrap_or_else(|_| FfiResult::panic("panic in pdv_keys_to_snake"))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `ApiClient` bound to `base_url`.
///
/// Returns null if `base_url` is null, not UTF-8, or if an internal panic
/// occurs. The caller must free the returned pointer with `pdv_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn pdv_client_new(base_url: *const c_char) -> *mut FfiApiClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(url) = (unsafe { borrow_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let client = pdv_core::ApiClient::new(url);
        Box::into_raw(Box::new(FfiApiClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an `ApiClient` created by `pdv_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pdv_client_free(client: *mut FfiApiClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build / parse
// ---------------------------------------------------------------------------

/// Build an HTTP request. `method` is an `FfiHttpMethod` discriminant.
/// `body_json` may be null; otherwise it is camelCase JSON text and is
/// transcoded to snake_case in the returned request.
///
/// Returns null if `client` or `path` is null, if `method` is out of
/// range, or if a string argument is not valid UTF-8 or valid JSON.
/// The caller must free the returned pointer with `pdv_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn pdv_build_request(
    client: *const FfiApiClient,
    method: u32,
    path: *const c_char,
    body_json: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || path.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(method) = method_from_raw(method) else {
            tracing::debug!(method, "rejected unknown method discriminant");
            return std::ptr::null_mut();
        };
        let Ok(path) = (unsafe { borrow_str(path) }) else {
            tracing::debug!("rejected request path that is not UTF-8");
            return std::ptr::null_mut();
        };
        let body: Option<Value> = if body_json.is_null() {
            None
        } else {
            let parsed = unsafe { borrow_str(body_json) }
                .ok()
                .and_then(|text| serde_json::from_str(text).ok());
            match parsed {
                Some(value) => Some(value),
                None => {
                    tracing::debug!("rejected request body that is not UTF-8 JSON");
                    return std::ptr::null_mut();
                }
            }
        };
        match client.inner.build_request(method, path, body.as_ref()) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(e) => {
                tracing::debug!(error = %e, "could not build request");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as empty; a body that is not UTF-8 is rejected, never repaired.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, std::str::Utf8Error> {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { borrow_str(resp.body) }?.to_string()
    };
    Ok(HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    })
}

/// Parse an HTTP response. On a 2xx status the result holds the body as
/// camelCase JSON text, or an empty string when the body is empty. Unlike
/// `ApiClient::parse_value`, an empty 2xx body is not an error here, so one
/// entry point serves both JSON and bodiless endpoints.
///
/// A body that is not valid UTF-8 yields `InvalidArg`.
#[unsafe(no_mangle)]
pub extern "C" fn pdv_parse_response(
    client: *const FfiApiClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let core_resp = match ffi_response_to_core(unsafe { &*response }) {
            Ok(resp) => resp,
            Err(e) => return FfiResult::invalid_arg(format!("response body is not valid UTF-8: {e}")),
        };
        if core_resp.is_success() && core_resp.body.trim().is_empty() {
            return FfiResult::ok_json(String::new());
        }
        let value = match client.inner.parse_value(core_resp) {
            Ok(value) => value,
            Err(e) => return FfiResult::from_error(e),
        };
        match serde_json::to_string(&value) {
            Ok(json) => FfiResult::ok_json(json),
            Err(e) => FfiResult::from_error(ApiError::SerializationError(e.to_string())),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in pdv_parse_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `pdv_build_request`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pdv_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiResult` returned by any function in this library.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pdv_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.json);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pdv_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
