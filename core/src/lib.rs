//! Key-case transcoding core for the PDV REST boundary.
//!
//! # Overview
//! The backend speaks `snake_case` JSON; application state uses `camelCase`.
//! [`transcode`] rewrites object keys between the two conventions over any
//! `serde_json::Value`, and [`codec`] applies it at the network boundary:
//! `to_snake` right before serialization, `to_camel` right after parsing.
//!
//! # Design
//! - Transcoding is a pure structural recursion; it has no error type.
//! - `ApiClient` is stateless and never performs I/O (host-does-IO): it
//!   builds `HttpRequest` values and parses `HttpResponse` values.
//! - Logging goes through `tracing`; the crate never installs a subscriber.

pub mod casing;
pub mod client;
pub mod codec;
pub mod error;
pub mod http;
pub mod transcode;

pub use casing::{camel_to_snake, snake_to_camel, KeyCase};
pub use client::ApiClient;
pub use codec::{decode_body, decode_value, encode_body, encode_value};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transcode::{into_camel, into_snake, to_camel, to_snake, transcode};
