//! Authenticated HTTP gateway for the media service backend
//!
//! Single choke point for outbound calls to the backend: every request goes
//! out with the current login token attached, every response comes back with
//! the transport envelope stripped, and every failure is classified into one
//! error type. A 401 additionally notifies the user that the session expired
//! and fires an optional hook so the application can clear state or redirect.
//!
//! The gateway never writes credential state and never retries; both are the
//! caller's business.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use media_gateway::{Gateway, MemoryCredentials, RequestDescriptor};
//!
//! # async fn example() -> Result<(), media_gateway::Error> {
//! let credentials = Arc::new(MemoryCredentials::new());
//! let gateway = Gateway::builder()
//!     .base_url("http://localhost:8080/api")
//!     .credentials(credentials)
//!     .build()?;
//!
//! let body: serde_json::Value = gateway.send(RequestDescriptor::get("/tool/tree")).await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod credentials;
mod error;
mod gateway;
mod notify;
mod request;

pub use api::{ApiResponse, ToolCategory, CODE_SUCCESS};
pub use credentials::{
    Credential, CredentialProvider, FileCredentials, MemoryCredentials, USER_TOKEN_KEY,
};
pub use error::{Error, Result};
pub use gateway::{Gateway, GatewayBuilder, DEFAULT_TIMEOUT, TOKEN_HEADER};
pub use notify::{Notifier, NoopNotifier, SESSION_EXPIRED_MESSAGE};
pub use request::{Method, RequestDescriptor};
