//! Hooks for the notification endpoint.
//!
//! Implement [`NotificationHandler`] with only the hooks you need; every
//! method has a default implementation.
//!
//! 1. The form body is verified.
//! 2. **`on_rejected`** observes a verification failure. It cannot change
//!    the outcome; the gateway is answered `failure`.
//! 3. **`on_notification`** receives the verified notification. Returning an
//!    error answers `failure`, and the gateway will deliver it again later.

use std::future::Future;
use std::pin::Pin;

use alipay::{AlipayError, Notification};

/// Error returned by a handler to refuse a notification.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Receives verified notifications.
///
/// Dyn-compatible so handlers can be stored as `Arc<dyn NotificationHandler>`.
pub trait NotificationHandler: Send + Sync {
    /// Called with every notification that passed verification.
    ///
    /// The gateway retries delivery until it is acknowledged, so this may
    /// see the same `notify_id` more than once.
    fn on_notification<'a>(
        &'a self,
        _notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send + 'a>> {
        Box::pin(async { Ok(()) })
    }

    /// Called when a notification fails verification.
    fn on_rejected<'a>(
        &'a self,
        _error: &'a AlipayError,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async {})
    }
}

/// Acknowledges every verified notification and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl NotificationHandler for NoopHandler {}
