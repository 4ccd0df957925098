//! Axum route for the gateway's asynchronous notifications.

use std::fmt;
use std::sync::Arc;

use alipay::Credentials;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;

use super::error::NotifyError;
use super::hooks::{NoopHandler, NotificationHandler};
use crate::constants::NOTIFY_SUCCESS;

/// Shared state of the notification route.
#[derive(Clone)]
pub struct NotifyState {
    credentials: Arc<Credentials>,
    handler: Arc<dyn NotificationHandler>,
}

impl NotifyState {
    /// Creates state that verifies with `credentials` and acknowledges every
    /// authentic notification.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::from_shared(Arc::new(credentials))
    }

    /// Same as [`NotifyState::new`] for credentials already shared with a
    /// client.
    #[must_use]
    pub fn from_shared(credentials: Arc<Credentials>) -> Self {
        Self {
            credentials,
            handler: Arc::new(NoopHandler),
        }
    }

    /// Replaces the handler invoked with verified notifications.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn NotificationHandler>) -> Self {
        self.handler = handler;
        self
    }

    /// Returns the verifying credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl fmt::Debug for NotifyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyState")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// `POST <notify path>`: verifies a notification form and acknowledges it.
///
/// # Errors
///
/// Returns 400 if the notification fails verification, or 500 if the
/// handler refuses it. Either way the body is `failure`.
pub async fn post_notify(
    State(state): State<NotifyState>,
    body: Bytes,
) -> Result<&'static str, NotifyError> {
    let notification = match state.credentials.verify_notification_form(&body) {
        Ok(notification) => notification,
        Err(err) => {
            #[cfg(feature = "telemetry")]
            tracing::warn!(error = %err, "alipay.notify.rejected");
            state.handler.on_rejected(&err).await;
            return Err(err.into());
        }
    };

    #[cfg(feature = "telemetry")]
    tracing::info!(
        notify_id = notification.notify_id().unwrap_or_default(),
        out_trade_no = notification.out_trade_no().unwrap_or_default(),
        trade_status = notification.trade_status().unwrap_or_default(),
        "alipay.notify.verified"
    );

    state
        .handler
        .on_notification(&notification)
        .await
        .map_err(NotifyError::Handler)?;
    Ok(NOTIFY_SUCCESS)
}

/// Creates a router serving [`post_notify`] at `path`.
pub fn notify_router(path: &str, state: NotifyState) -> Router {
    Router::new()
        .route(path, post(post_notify))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::constants::{CONTENT_TYPE_FORM_UTF8, DEFAULT_NOTIFY_PATH, NOTIFY_FAILURE};
    use crate::fixtures::{APP_ID, credentials, signed_notification};
    use crate::server::hooks::HandlerError;
    use alipay::canonical::encode_params;
    use alipay::{AlipayError, Notification, Params};
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use std::future::Future;
    use std::pin::Pin;
    use tower::ServiceExt;

    #[derive(Default)]
    struct Recorder {
        accepted: Mutex<Vec<String>>,
        rejected: Mutex<Vec<String>>,
        refuse: bool,
    }

    impl NotificationHandler for Recorder {
        fn on_notification<'a>(
            &'a self,
            notification: &'a Notification,
        ) -> Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send + 'a>> {
            Box::pin(async move {
                if self.refuse {
                    return Err("order store unavailable".into());
                }
                let out_trade_no = notification.out_trade_no().unwrap_or_default().to_owned();
                self.accepted.lock().unwrap().push(out_trade_no);
                Ok(())
            })
        }

        fn on_rejected<'a>(
            &'a self,
            error: &'a AlipayError,
        ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
            Box::pin(async move {
                self.rejected.lock().unwrap().push(error.to_string());
            })
        }
    }

    fn form_request(params: &Params) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(DEFAULT_NOTIFY_PATH)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_FORM_UTF8)
            .body(Body::from(encode_params(params)))
            .unwrap()
    }

    async fn send(router: Router, params: &Params) -> (StatusCode, String) {
        let response = router.oneshot(form_request(params)).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn router_with(recorder: &Arc<Recorder>) -> Router {
        let state = NotifyState::new(credentials()).with_handler(recorder.clone());
        notify_router(DEFAULT_NOTIFY_PATH, state)
    }

    #[tokio::test]
    async fn test_authentic_notification_is_acknowledged() {
        let recorder = Arc::new(Recorder::default());
        let (status, body) = send(router_with(&recorder), &signed_notification(APP_ID)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, NOTIFY_SUCCESS);
        assert_eq!(*recorder.accepted.lock().unwrap(), vec!["6823789339978248"]);
        assert!(recorder.rejected.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_default_handler_acknowledges() {
        let router = notify_router(DEFAULT_NOTIFY_PATH, NotifyState::new(credentials()));
        let (status, body) = send(router, &signed_notification(APP_ID)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, NOTIFY_SUCCESS);
    }

    #[tokio::test]
    async fn test_tampered_notification_is_refused() {
        let recorder = Arc::new(Recorder::default());
        let mut params = signed_notification(APP_ID);
        params.insert("total_amount".into(), "1000.00".into());

        let (status, body) = send(router_with(&recorder), &params).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, NOTIFY_FAILURE);
        assert!(recorder.accepted.lock().unwrap().is_empty());
        assert_eq!(recorder.rejected.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_notification_for_other_app_is_refused() {
        let recorder = Arc::new(Recorder::default());
        let (status, body) =
            send(router_with(&recorder), &signed_notification("2099000000000000")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, NOTIFY_FAILURE);
        assert!(recorder.rejected.lock().unwrap()[0].contains("2099000000000000"));
    }

    #[tokio::test]
    async fn test_handler_failure_is_not_acknowledged() {
        let recorder = Arc::new(Recorder {
            refuse: true,
            ..Default::default()
        });
        let (status, body) = send(router_with(&recorder), &signed_notification(APP_ID)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, NOTIFY_FAILURE);
    }

    #[tokio::test]
    async fn test_empty_body_is_refused() {
        let router = notify_router(DEFAULT_NOTIFY_PATH, NotifyState::new(credentials()));
        let (status, _) = send(router, &Params::new()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
