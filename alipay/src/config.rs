//! Client configuration.
//!
//! Provides the gateway endpoints and the identity a client signs with.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sandbox gateway endpoint.
pub const GATEWAY_DEVELOPMENT: &str = "https://openapi.alipaydev.com/gateway.do";

/// Production gateway endpoint.
pub const GATEWAY_PRODUCTION: &str = "https://openapi.alipay.com/gateway.do";

/// Configuration for an Alipay client.
///
/// Keys may be PEM or bare base64 (see [`crate::keys`]).
///
/// # Example
///
/// ```rust
/// use alipay::config::{ClientConfig, GATEWAY_PRODUCTION};
///
/// let config = ClientConfig::production("2021000000000001", "MIIE...", "MIIB...");
/// assert_eq!(config.gateway, GATEWAY_PRODUCTION);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Gateway URL requests are posted to (default: production).
    #[serde(default = "default_gateway")]
    pub gateway: String,

    /// Application identifier assigned by the open platform.
    pub app_id: String,

    /// Application private key (PKCS#1), used for signing requests.
    pub app_private_key: String,

    /// Gateway public key (PKIX), used for verifying responses and notifications.
    pub alipay_public_key: String,
}

fn default_gateway() -> String {
    GATEWAY_PRODUCTION.to_owned()
}

impl ClientConfig {
    /// Creates a config for an arbitrary gateway URL.
    #[must_use]
    pub fn new(
        gateway: impl Into<String>,
        app_id: impl Into<String>,
        app_private_key: impl Into<String>,
        alipay_public_key: impl Into<String>,
    ) -> Self {
        Self {
            gateway: gateway.into(),
            app_id: app_id.into(),
            app_private_key: app_private_key.into(),
            alipay_public_key: alipay_public_key.into(),
        }
    }

    /// Creates a config for the sandbox gateway.
    #[must_use]
    pub fn development(
        app_id: impl Into<String>,
        app_private_key: impl Into<String>,
        alipay_public_key: impl Into<String>,
    ) -> Self {
        Self::new(GATEWAY_DEVELOPMENT, app_id, app_private_key, alipay_public_key)
    }

    /// Creates a config for the production gateway.
    #[must_use]
    pub fn production(
        app_id: impl Into<String>,
        app_private_key: impl Into<String>,
        alipay_public_key: impl Into<String>,
    ) -> Self {
        Self::new(GATEWAY_PRODUCTION, app_id, app_private_key, alipay_public_key)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("gateway", &self.gateway)
            .field("app_id", &self.app_id)
            .field("app_private_key", &"<redacted>")
            .field("alipay_public_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_defaults_to_production() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"app_id":"1","app_private_key":"a","alipay_public_key":"b"}"#,
        )
        .unwrap();
        assert_eq!(config.gateway, GATEWAY_PRODUCTION);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = ClientConfig::development("1", "secret-private", "secret-public");
        let debug = format!("{config:?}");
        assert!(debug.contains(GATEWAY_DEVELOPMENT));
        assert!(!debug.contains("secret-private"));
        assert!(!debug.contains("secret-public"));
    }
}
