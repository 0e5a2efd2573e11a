//! HTTP Adapter
//!
//! Real network implementation of the `HttpSource` port.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientError, DEFAULT_USER_AGENT};
