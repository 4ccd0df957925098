//! RSA2 signatures.
//!
//! The gateway's `RSA2` sign type is RSASSA-PKCS1-v1_5 over a SHA-256 digest,
//! carried as standard (padded) base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as b64;
use rsa::pkcs1v15;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::AlipayError;

/// The `sign_type` value for RSA-SHA256 signatures.
pub const SIGN_TYPE_RSA2: &str = "RSA2";

/// Key used to produce `RSA2` signatures.
pub type SigningKey = pkcs1v15::SigningKey<Sha256>;

/// Key used to check `RSA2` signatures.
pub type VerifyingKey = pkcs1v15::VerifyingKey<Sha256>;

/// Creates a signing key from an RSA private key.
#[must_use]
pub fn signing_key(key: RsaPrivateKey) -> SigningKey {
    SigningKey::new(key)
}

/// Creates a verifying key from an RSA public key.
#[must_use]
pub fn verifying_key(key: RsaPublicKey) -> VerifyingKey {
    VerifyingKey::new(key)
}

/// Signs `data` and returns the base64-encoded signature.
///
/// # Errors
///
/// Returns [`AlipayError::Signing`] if the key cannot produce a signature.
pub fn sign(key: &SigningKey, data: &str) -> Result<String, AlipayError> {
    let mut rng = rsa::rand_core::OsRng;
    let signature = key
        .try_sign_with_rng(&mut rng, data.as_bytes())
        .map_err(|e| AlipayError::Signing(e.to_string()))?;
    Ok(b64.encode(signature.to_bytes()))
}

/// Checks a base64-encoded signature over `data`.
///
/// # Errors
///
/// Returns [`AlipayError::SignatureDecode`] if `sign` is not valid base64 and
/// [`AlipayError::SignatureVerification`] if the signature does not match.
pub fn verify(key: &VerifyingKey, data: &str, sign: &str) -> Result<(), AlipayError> {
    let bytes = b64.decode(sign.trim())?;
    let signature = pkcs1v15::Signature::try_from(bytes.as_slice())
        .map_err(|_| AlipayError::SignatureVerification)?;
    key.verify(data.as_bytes(), &signature).map_err(|_| {
        #[cfg(feature = "telemetry")]
        tracing::warn!("alipay.signature.mismatch");
        AlipayError::SignatureVerification
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{APP_KEYS, GATEWAY_KEYS};

    fn keys() -> (SigningKey, VerifyingKey) {
        let private_key = APP_KEYS.private_key.clone();
        let public_key = private_key.to_public_key();
        (signing_key(private_key), verifying_key(public_key))
    }

    #[test]
    fn test_sign_then_verify() {
        let (signer, verifier) = keys();
        let data = "app_id=2021&charset=utf-8&method=alipay.trade.query";
        let signature = sign(&signer, data).unwrap();
        verify(&verifier, data, &signature).unwrap();
    }

    #[test]
    fn test_signature_is_base64_of_modulus_length() {
        let (signer, _) = keys();
        let signature = sign(&signer, "a=1").unwrap();
        assert_eq!(b64.decode(&signature).unwrap().len(), 256);
    }

    #[test]
    fn test_verify_rejects_modified_data() {
        let (signer, verifier) = keys();
        let signature = sign(&signer, "a=1&b=2").unwrap();
        let result = verify(&verifier, "a=1&b=3", &signature);
        assert!(matches!(result, Err(AlipayError::SignatureVerification)));
    }

    #[test]
    fn test_verify_rejects_corrupted_signature() {
        let (signer, verifier) = keys();
        let signature = sign(&signer, "a=1").unwrap();
        let mut bytes = b64.decode(&signature).unwrap();
        bytes[17] ^= 0x01;
        let corrupted = b64.encode(&bytes);
        let result = verify(&verifier, "a=1", &corrupted);
        assert!(matches!(result, Err(AlipayError::SignatureVerification)));
    }

    #[test]
    fn test_verify_rejects_foreign_key() {
        let (signer, _) = keys();
        let foreign = verifying_key(GATEWAY_KEYS.private_key.to_public_key());
        let signature = sign(&signer, "a=1").unwrap();
        let result = verify(&foreign, "a=1", &signature);
        assert!(matches!(result, Err(AlipayError::SignatureVerification)));
    }

    #[test]
    fn test_verify_rejects_malformed_base64() {
        let (_, verifier) = keys();
        let result = verify(&verifier, "a=1", "not base64!");
        assert!(matches!(result, Err(AlipayError::SignatureDecode(_))));
    }

    #[test]
    fn test_verify_rejects_empty_signature() {
        let (_, verifier) = keys();
        let result = verify(&verifier, "a=1", "");
        assert!(matches!(result, Err(AlipayError::SignatureVerification)));
    }
}
