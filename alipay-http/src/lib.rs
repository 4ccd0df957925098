#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport layer for the Alipay open platform.
//!
//! Delivers the signed parameter sets built by the [`alipay`] crate and
//! receives the gateway's asynchronous notifications.
//!
//! # Modules
//!
//! - [`constants`] - Content types and acknowledgement bodies
//! - [`error`] - Transport error types
//! - [`client`] - Gateway client: server-to-server, SDK and page execution (feature: `client`)
//! - [`server`] - Axum notification endpoint (feature: `server`)
//!
//! # Feature Flags
//!
//! - `client` - `reqwest`-based gateway client (default)
//! - `server` - `axum` notification endpoint (default)
//! - `telemetry` - Enables tracing instrumentation

pub mod constants;
pub mod error;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "client")]
pub use client::AlipayClient;
pub use error::ClientError;

#[cfg(test)]
pub(crate) mod fixtures;
