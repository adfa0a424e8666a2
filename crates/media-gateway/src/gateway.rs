//! The authenticated gateway

use std::sync::Arc;
use std::time::Duration;

use media_http_client::{HttpClient, RawResponse, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::credentials::CredentialProvider;
use crate::error::{Error, Result};
use crate::notify::{Notifier, NoopNotifier, SESSION_EXPIRED_MESSAGE};
use crate::request::{Method, RequestDescriptor};

/// Request timeout used when the builder is not given one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Header the backend reads the bearer token from
pub const TOKEN_HEADER: &str = "token";

type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Gateway for authenticated calls to the backend
///
/// Fixes the base address and timeout once, attaches the current login token
/// to every outgoing request, and normalizes responses: success resolves to
/// the deserialized body alone, failure to one [`Error`] value. A 401
/// notifies the user and fires the session-expired hook; the gateway itself
/// never clears credentials or retries.
///
/// Cloning is cheap; concurrent calls share no mutable state beyond the
/// read-only credential lookup.
#[derive(Clone)]
pub struct Gateway {
    base_url: Url,
    http_client: HttpClient,
    credentials: Option<Arc<dyn CredentialProvider>>,
    notifier: Arc<dyn Notifier>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Create a new gateway builder
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    /// Issue one call described by `descriptor` and deserialize the body
    ///
    /// The request phase runs before anything leaves the process: the
    /// credential is looked up and, when present with a non-empty token,
    /// attached under the [`TOKEN_HEADER`] header, replacing any value the
    /// descriptor carries under that name. Storage problems degrade to an
    /// anonymous request, they never fail the call.
    ///
    /// # Errors
    ///
    /// [`Error::Unauthorized`] on a 401 (after notifying the user),
    /// [`Error::Api`] on any other non-success status, [`Error::Http`] on
    /// network errors and timeouts, [`Error::Serde`] when the success body
    /// does not deserialize to `T`.
    pub async fn send<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Result<T> {
        if let Some(err) = descriptor.body_error() {
            return Err(Error::Custom(format!(
                "request body serialization failed: {err}"
            )));
        }

        let url = self.resolve_url(descriptor.path())?;
        let mut request = self.request_builder(descriptor.method(), &url);

        // The stored credential goes on last so it wins over any token
        // header the descriptor carries. Header setting appends, so the
        // descriptor's value must be skipped rather than shadowed.
        let token = self.current_token();
        for (key, value) in descriptor.headers() {
            if token.is_some() && key.eq_ignore_ascii_case(TOKEN_HEADER) {
                continue;
            }
            request = request.header(key, value);
        }
        if let Some(token) = &token {
            request = request.header(TOKEN_HEADER, token);
        }
        if let Some(body) = descriptor.body() {
            request = request.json(body);
        }

        tracing::debug!("Sending {} request to {}", descriptor.method(), url);
        let response = request.send().await.map_err(Error::Http)?;

        self.normalize_response(response).await
    }

    /// Like [`Gateway::send`], but returns the body as untyped JSON
    pub async fn send_value(&self, descriptor: RequestDescriptor) -> Result<Value> {
        self.send(descriptor).await
    }

    /// Resolve a relative descriptor path against the base address
    fn resolve_url(&self, path: &str) -> Result<Url> {
        if path.contains("://") {
            return Err(Error::Custom(format!(
                "descriptor path must be relative, got: {path}"
            )));
        }
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{}/{}", base, path.trim_start_matches('/'));
        Ok(Url::parse(&url)?)
    }

    fn request_builder(&self, method: Method, url: &Url) -> RequestBuilder {
        match method {
            Method::Get => self.http_client.get(url.as_str()),
            Method::Post => self.http_client.post(url.as_str()),
            Method::Put => self.http_client.put(url.as_str()),
            Method::Patch => self.http_client.patch(url.as_str()),
            Method::Delete => self.http_client.delete(url.as_str()),
        }
    }

    /// Current token, or `None` when not logged in or the token is empty
    fn current_token(&self) -> Option<String> {
        let credential = self.credentials.as_ref()?.credential()?;
        if credential.token().is_empty() {
            return None;
        }
        Some(credential.token().to_string())
    }

    /// Classify the settled response and strip the transport envelope
    async fn normalize_response<T: DeserializeOwned>(&self, response: RawResponse) -> Result<T> {
        let status = response.status();
        let text = response.text().await.map_err(Error::Http)?;

        if status == 401 {
            tracing::warn!("Backend reported an expired session (401)");
            self.notifier.notify(SESSION_EXPIRED_MESSAGE);
            if let Some(hook) = &self.on_session_expired {
                hook();
            }
            return Err(Error::Unauthorized { message: text });
        }

        if !(200..300).contains(&status) {
            tracing::debug!("Error response ({}): {}", status, text);
            return Err(Error::Api {
                message: text,
                status,
            });
        }

        serde_json::from_str(&text).map_err(|err| {
            tracing::warn!("Failed to parse response body: {}", err);
            Error::Serde(err)
        })
    }
}

/// Builder for [`Gateway`]
#[derive(Default)]
pub struct GatewayBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    notifier: Option<Arc<dyn Notifier>>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl std::fmt::Debug for GatewayBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GatewayBuilder {
    /// Set the base address all descriptor paths resolve against (required)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the process-wide request timeout (default [`DEFAULT_TIMEOUT`])
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the credential provider; without one every request is anonymous
    pub fn credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Set the notifier invoked on session expiry (default: discard)
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set a hook run after a 401 is classified, for clearing session state
    /// or redirecting to a login surface
    pub fn on_session_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    /// Build the gateway
    ///
    /// # Errors
    ///
    /// Fails when the base URL is missing or does not parse, or when the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<Gateway> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Custom("base URL is required".to_string()))?;
        let base_url = Url::parse(&base_url)?;

        let http_client = HttpClient::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(Error::Http)?;

        Ok(Gateway {
            base_url,
            http_client,
            credentials: self.credentials,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(NoopNotifier)),
            on_session_expired: self.on_session_expired,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_gateway() -> Gateway {
        Gateway::builder()
            .base_url("http://localhost:8080/api")
            .build()
            .expect("Gateway should build")
    }

    #[test]
    fn test_build_requires_base_url() {
        let result = Gateway::builder().build();
        assert!(matches!(result, Err(Error::Custom(_))));
    }

    #[test]
    fn test_build_rejects_invalid_base_url() {
        let result = Gateway::builder().base_url("not a url").build();
        assert!(matches!(result, Err(Error::Url(_))));
    }

    #[test]
    fn test_resolve_url_joins_base_and_path() {
        let gateway = test_gateway();
        let url = gateway
            .resolve_url("/tool/tree")
            .expect("Relative path should resolve");
        assert_eq!(url.as_str(), "http://localhost:8080/api/tool/tree");
    }

    #[test]
    fn test_resolve_url_without_leading_slash() {
        let gateway = test_gateway();
        let url = gateway
            .resolve_url("tool/tree")
            .expect("Relative path should resolve");
        assert_eq!(url.as_str(), "http://localhost:8080/api/tool/tree");
    }

    #[test]
    fn test_resolve_url_rejects_absolute() {
        let gateway = test_gateway();
        let result = gateway.resolve_url("http://elsewhere.example/steal");
        assert!(matches!(result, Err(Error::Custom(_))));
    }
}
