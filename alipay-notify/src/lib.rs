//! Alipay notification receiver.
//!
//! A small service that verifies the gateway's asynchronous notifications
//! and logs them.
//!
//! # Modules
//!
//! - [`config`] - Service configuration with environment variable expansion
//! - [`error`] - Configuration error types
//! - [`handlers`] - Logging notification handler and the health route

pub mod config;
pub mod error;
pub mod handlers;

pub use config::NotifyConfig;
pub use error::ConfigError;
pub use handlers::LoggingHandler;
