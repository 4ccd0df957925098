//! Error type for the notification endpoint.

use alipay::AlipayError;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use super::hooks::HandlerError;
use crate::constants::NOTIFY_FAILURE;

/// Reasons a notification is not acknowledged.
///
/// Both variants answer the gateway with the plain-text body `failure`.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The notification is addressed to another application or is not
    /// authentic.
    #[error("notification rejected: {0}")]
    Rejected(#[from] AlipayError),

    /// The handler refused a verified notification.
    #[error("notification handler failed: {0}")]
    Handler(HandlerError),
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, NOTIFY_FAILURE).into_response()
    }
}
