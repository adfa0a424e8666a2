//! User-facing notification capability

/// Message emitted when the backend reports an expired session
pub const SESSION_EXPIRED_MESSAGE: &str = "Login session expired, please log in again";

/// Fire-and-forget "display a user-facing message" capability
///
/// Injected into the gateway so it stays decoupled from any particular UI
/// layer. The gateway invokes it exactly once per 401 response and for
/// nothing else.
pub trait Notifier: Send + Sync {
    /// Display a message to the user
    fn notify(&self, message: &str);
}

/// Notifier that discards every message, the default for headless callers
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
}
