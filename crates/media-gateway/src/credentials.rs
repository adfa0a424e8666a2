//! Login credential model and providers
//!
//! The gateway only ever reads credentials; creating and clearing them is
//! the login flow's business. A [`CredentialProvider`] is injected into the
//! gateway at build time, so the gateway never reaches into ambient storage
//! and stays testable without a real storage backend.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

/// Well-known storage key the serialized credential record lives under
pub const USER_TOKEN_KEY: &str = "userToken";

/// A login credential: the bearer token plus the envelope it was parsed from
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    token: String,
    envelope: Value,
}

impl Credential {
    /// Create a credential from a bare token
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let envelope = serde_json::json!({ "token": token });
        Self { token, envelope }
    }

    /// Parse a credential out of a stored envelope
    ///
    /// The envelope must carry a non-empty string under `"token"`; anything
    /// else means "not logged in" and yields `None`.
    pub fn from_envelope(envelope: Value) -> Option<Self> {
        let token = envelope.get("token")?.as_str()?;
        if token.is_empty() {
            return None;
        }
        Some(Self {
            token: token.to_string(),
            envelope,
        })
    }

    /// The bearer token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The envelope the credential was parsed from
    pub fn envelope(&self) -> &Value {
        &self.envelope
    }
}

/// Source of the current login credential
///
/// Implementations must be infallible: a storage problem is reported as
/// `None` (treated as "not logged in"), never as an error. The gateway reads
/// through this trait on every outgoing request and never writes back.
pub trait CredentialProvider: Send + Sync {
    /// Current credential, or `None` when not logged in
    fn credential(&self) -> Option<Credential>;
}

/// In-memory credential holder, for login flows and tests
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    current: RwLock<Option<Credential>>,
}

impl MemoryCredentials {
    /// Create an empty holder (not logged in)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a holder pre-filled with a credential
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            current: RwLock::new(Some(credential)),
        }
    }

    /// Replace the stored credential
    pub fn set(&self, credential: Credential) {
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(credential);
        }
    }

    /// Drop the stored credential
    pub fn clear(&self) {
        if let Ok(mut guard) = self.current.write() {
            *guard = None;
        }
    }
}

impl CredentialProvider for MemoryCredentials {
    fn credential(&self) -> Option<Credential> {
        let guard = self.current.read().ok()?;
        (*guard).clone()
    }
}

/// File-based credential storage: a JSON object of key → envelope records,
/// with the login credential under [`USER_TOKEN_KEY`]
///
/// The local-storage analog for native callers. The file is re-read on every
/// lookup so an external login flow can rewrite it at any time; a missing or
/// corrupt file reads as "not logged in".
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for FileCredentials {
    fn credential(&self) -> Option<Credential> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        let map: HashMap<String, Value> = serde_json::from_str(&data).ok()?;
        let envelope = map.get(USER_TOKEN_KEY)?.clone();
        Credential::from_envelope(envelope)
    }
}
