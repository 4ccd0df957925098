//! Axum endpoint receiving the gateway's asynchronous notifications.
//!
//! The gateway posts an `application/x-www-form-urlencoded` form to the
//! `notify_url` of a request whenever the trade changes state, and keeps
//! retrying until the endpoint answers with the literal body `success`.
//!
//! [`notify_router`] verifies each form with the configured [`Credentials`]
//! before handing it to a [`NotificationHandler`]:
//!
//! ```rust,no_run
//! use alipay::{ClientConfig, Credentials};
//! use alipay_http::constants::DEFAULT_NOTIFY_PATH;
//! use alipay_http::server::{NotifyState, notify_router};
//!
//! # fn build(config: &ClientConfig) -> Result<axum::Router, alipay::AlipayError> {
//! let state = NotifyState::new(Credentials::from_config(config)?);
//! let app = notify_router(DEFAULT_NOTIFY_PATH, state);
//! # Ok(app)
//! # }
//! ```
//!
//! [`Credentials`]: alipay::Credentials

pub mod error;
pub mod hooks;
pub mod notify;

pub use error::NotifyError;
pub use hooks::{HandlerError, NoopHandler, NotificationHandler};
pub use notify::{NotifyState, notify_router, post_notify};
