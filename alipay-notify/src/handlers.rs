//! Notification handler and health route of the service.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use alipay::{AlipayError, Notification};
use alipay_http::server::{HandlerError, NotificationHandler};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::config::NotifyConfig;

/// Logs every notification and acknowledges it.
///
/// Nothing is persisted; deployments that need to act on trade changes
/// supply their own [`NotificationHandler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

impl NotificationHandler for LoggingHandler {
    fn on_notification<'a>(
        &'a self,
        notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send + 'a>> {
        Box::pin(async move {
            tracing::info!(
                notify_id = notification.notify_id().unwrap_or_default(),
                notify_type = notification.notify_type().unwrap_or_default(),
                trade_no = notification.trade_no().unwrap_or_default(),
                out_trade_no = notification.out_trade_no().unwrap_or_default(),
                trade_status = notification.trade_status().unwrap_or_default(),
                total_amount = notification.total_amount().unwrap_or_default(),
                "Received trade notification"
            );
            Ok(())
        })
    }

    fn on_rejected<'a>(
        &'a self,
        error: &'a AlipayError,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            tracing::warn!(%error, "Rejected notification");
        })
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    /// Always `ok` while the process serves requests.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Application the receiver verifies notifications for.
    pub app_id: String,
    /// Route notifications are accepted on.
    pub notify_path: String,
}

impl Health {
    /// Describes the service started from `config`.
    #[must_use]
    pub fn from_config(config: &NotifyConfig) -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            app_id: config.alipay.app_id.clone(),
            notify_path: config.path.clone(),
        }
    }
}

/// `GET /health` - Reports the receiver's identity and notify route.
pub async fn get_health(State(health): State<Arc<Health>>) -> Json<Health> {
    Json(Health::clone(&health))
}

/// Creates a router serving [`get_health`] at `/health`.
pub fn health_router(health: Health) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .with_state(Arc::new(health))
}
