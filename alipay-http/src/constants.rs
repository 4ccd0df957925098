//! HTTP-specific constants for the gateway protocol.

pub use alipay::config::{GATEWAY_DEVELOPMENT, GATEWAY_PRODUCTION};

/// Content type of requests posted to the gateway.
pub const CONTENT_TYPE_FORM_UTF8: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Body acknowledging a notification; anything else makes the gateway retry.
pub const NOTIFY_SUCCESS: &str = "success";

/// Body refusing a notification.
pub const NOTIFY_FAILURE: &str = "failure";

/// Default path of the notification endpoint.
pub const DEFAULT_NOTIFY_PATH: &str = "/notify";
