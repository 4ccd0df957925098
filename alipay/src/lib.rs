#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Alipay open platform API.
//!
//! This crate builds signed request envelopes for the gateway's trade
//! operations and verifies the authenticity of gateway responses and
//! asynchronous notifications. It performs no network I/O; see the
//! `alipay-http` crate for the transport.
//!
//! # Overview
//!
//! Every call to the gateway is a flat set of string parameters: a handful of
//! fixed protocol fields, a JSON `biz_content` field carrying the
//! operation-specific payload, and an RSA2 (`SHA256withRSA`) signature over
//! the canonical form of everything else. The same canonical form is used to
//! verify what the gateway sends back.
//!
//! # Modules
//!
//! - [`keys`] - PEM / raw base64 RSA key loading
//! - [`canonical`] - Parameter cleaning, canonical string, form encoding
//! - [`signature`] - RSA-SHA256 PKCS#1 v1.5 sign and verify
//! - [`request`] - The [`Request`] trait and envelope builder
//! - [`response`] - Response envelope parsing and verification
//! - [`notification`] - Asynchronous notification verification
//! - [`trade`] - Trade operation request and response types
//! - [`config`] - Client configuration and gateway endpoints
//! - [`timestamp`] - The gateway's `YYYY-MM-DD HH:MM:SS` timestamps
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod canonical;
pub mod config;
pub mod credentials;
pub mod error;
pub mod keys;
pub mod notification;
pub mod request;
pub mod response;
pub mod signature;
pub mod timestamp;
pub mod trade;

pub use canonical::Params;
pub use config::ClientConfig;
pub use credentials::Credentials;
pub use error::{AlipayError, KeyError};
pub use notification::Notification;
pub use request::Request;
pub use response::{ResponseCommon, VerifiedResponse};
pub use timestamp::Timestamp;

#[cfg(test)]
pub(crate) mod fixtures;
