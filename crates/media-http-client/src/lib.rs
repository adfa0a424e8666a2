//! HTTP client wrapper for the media service SDK
//!
//! This crate hides the underlying HTTP library (reqwest) from the rest of
//! the workspace. Callers get a small `HttpClient` with a fixed timeout, a
//! request builder for headers and JSON bodies, and a normalized error type.
//!
//! # Example
//!
//! ```no_run
//! use media_http_client::{HttpClient, Response};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct ApiResponse {
//!     message: String,
//! }
//!
//! async fn example() -> Response<ApiResponse> {
//!     let client = HttpClient::new();
//!     client.fetch("https://api.example.com/data").await
//! }
//! ```

mod client;
mod error;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use request::RequestBuilder;
pub use response::{RawResponse, Response};
