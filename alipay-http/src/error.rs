//! Error types for the HTTP transport layer.

use alipay::AlipayError;

/// Errors that can occur while talking to the gateway.
///
/// Transport failures are passed through unmodified; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Signing, parsing or verification failed.
    #[error(transparent)]
    Alipay(#[from] AlipayError),

    /// The gateway URL is malformed.
    #[cfg(feature = "client")]
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// HTTP transport error.
    #[cfg(feature = "client")]
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Failed to read the response body.
    #[cfg(feature = "client")]
    #[error("Failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Returns `true` if the gateway's answer failed authentication and must
    /// be treated as untrusted.
    #[must_use]
    pub const fn is_untrusted(&self) -> bool {
        match self {
            Self::Alipay(err) => err.is_untrusted(),
            #[cfg(feature = "client")]
            _ => false,
        }
    }
}
