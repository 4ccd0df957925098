//! Error types for request signing and response verification.

/// Errors that can occur while building or verifying gateway messages.
///
/// Signature failures ([`AlipayError::SignatureDecode`] and
/// [`AlipayError::SignatureVerification`]) mean the payload is untrusted and
/// must be rejected. They are never transient.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AlipayError {
    /// Key material could not be decoded or parsed.
    #[error("key parse error: {0}")]
    KeyParse(#[from] KeyError),

    /// A notification was addressed to a different application.
    #[error("app_id does not match: expected {expected:?}, got {actual:?}")]
    AppIdMismatch {
        /// The configured application identifier.
        expected: String,
        /// The identifier carried by the notification.
        actual: String,
    },

    /// A response body or one of its fields is not the expected JSON.
    #[error("invalid JSON: {context}")]
    InvalidJson {
        /// Human-readable context.
        context: String,
        /// The underlying parse error, if any.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The signature is not valid base64.
    #[error("signature decode error: {0}")]
    SignatureDecode(#[from] base64::DecodeError),

    /// The signature does not match the signed content.
    #[error("signature verification failed")]
    SignatureVerification,

    /// Request fields could not be encoded as JSON.
    #[error("failed to serialize biz_content: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The private key failed to produce a signature.
    #[error("signing failed: {0}")]
    Signing(String),
}

impl AlipayError {
    /// Creates an [`AlipayError::InvalidJson`] without an underlying parse error.
    #[must_use]
    pub fn invalid_json(context: impl Into<String>) -> Self {
        Self::InvalidJson {
            context: context.into(),
            source: None,
        }
    }

    /// Creates an [`AlipayError::InvalidJson`] wrapping a parse error.
    #[must_use]
    pub fn invalid_json_with(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            context: context.into(),
            source: Some(source),
        }
    }

    /// Returns `true` if this error means the payload failed authentication.
    #[must_use]
    pub const fn is_untrusted(&self) -> bool {
        matches!(
            self,
            Self::AppIdMismatch { .. } | Self::SignatureDecode(_) | Self::SignatureVerification
        )
    }
}

/// Errors that can occur while loading RSA key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// No well-formed PEM block was found.
    #[error("failed to decode PEM block: {0}")]
    PemDecode(&'static str),

    /// The PEM body is not valid base64.
    #[error("PEM body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The block is not a PKCS#1 RSA private key.
    #[error("invalid PKCS#1 private key: {0}")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    /// The block is not a PKIX (SubjectPublicKeyInfo) RSA public key.
    #[error("invalid PKIX public key: {0}")]
    Spki(#[from] rsa::pkcs8::spki::Error),
}
