//! RSA key loading.
//!
//! The gateway console hands out keys as bare base64 strings, while most
//! tooling produces PEM files. Both are accepted: input without
//! `-----BEGIN` / `-----END` markers is wrapped in them before decoding.
//!
//! - Application private keys are PKCS#1 (`RSA PRIVATE KEY`).
//! - Gateway public keys are PKIX `SubjectPublicKeyInfo` (`PUBLIC KEY`).

use base64::prelude::*;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::KeyError;

const PEM_DELIM: &str = "-----";
const PEM_TAG_BEGIN: &str = "-----BEGIN";
const PEM_TAG_END: &str = "-----END";

/// PEM label of a PKCS#1 RSA private key.
pub const PEM_LABEL_RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";

/// PEM label of a PKIX public key.
pub const PEM_LABEL_PUBLIC_KEY: &str = "PUBLIC KEY";

/// A decoded PEM block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    /// The label found on the `-----BEGIN` line.
    pub label: String,
    /// The DER bytes of the block body.
    pub der: Vec<u8>,
}

/// Parses a PKCS#1 RSA private key from PEM or raw base64.
///
/// # Errors
///
/// Returns [`KeyError`] if no block can be decoded or the DER is not a
/// PKCS#1 RSA private key.
pub fn parse_rsa_private_key(data: &str) -> Result<RsaPrivateKey, KeyError> {
    let block = decode_pem(data, PEM_LABEL_RSA_PRIVATE_KEY)?;
    Ok(RsaPrivateKey::from_pkcs1_der(&block.der)?)
}

/// Parses a PKIX-encoded RSA public key from PEM or raw base64.
///
/// # Errors
///
/// Returns [`KeyError`] if no block can be decoded or the DER is not an
/// RSA `SubjectPublicKeyInfo`.
pub fn parse_rsa_public_key(data: &str) -> Result<RsaPublicKey, KeyError> {
    let block = decode_pem(data, PEM_LABEL_PUBLIC_KEY)?;
    Ok(RsaPublicKey::from_public_key_der(&block.der)?)
}

/// Decodes the first PEM block in `data`, adding markers labelled `label`
/// where they are missing.
///
/// Lines are joined regardless of width. Header lines inside the block
/// (`Key: value`) are skipped.
///
/// # Errors
///
/// Returns [`KeyError::PemDecode`] if the block is malformed and
/// [`KeyError::Base64`] if its body cannot be decoded.
pub fn decode_pem(data: &str, label: &str) -> Result<PemBlock, KeyError> {
    let standardized = standardize_pem(data, label);
    let mut lines = standardized
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let begin = lines
        .find(|line| line.starts_with(PEM_TAG_BEGIN))
        .ok_or(KeyError::PemDecode("missing BEGIN line"))?;
    let block_label = begin
        .strip_prefix(PEM_TAG_BEGIN)
        .and_then(|rest| rest.strip_suffix(PEM_DELIM))
        .ok_or(KeyError::PemDecode("malformed BEGIN line"))?
        .trim()
        .to_owned();

    let mut body = String::new();
    let mut terminated = false;
    for line in lines {
        if line.starts_with(PEM_TAG_END) {
            terminated = true;
            break;
        }
        if line.contains(':') {
            continue;
        }
        body.push_str(line);
    }
    if !terminated {
        return Err(KeyError::PemDecode("missing END line"));
    }
    if body.is_empty() {
        return Err(KeyError::PemDecode("empty block"));
    }

    let der = BASE64_STANDARD.decode(body.as_bytes())?;
    Ok(PemBlock {
        label: block_label,
        der,
    })
}

/// Wraps `data` in `-----BEGIN label-----` / `-----END label-----` lines
/// unless the respective marker is already present.
#[must_use]
pub fn standardize_pem(data: &str, label: &str) -> String {
    let mut standardized = data.trim().to_owned();
    if !standardized.contains(PEM_TAG_BEGIN) {
        standardized = format!("{PEM_TAG_BEGIN} {label}{PEM_DELIM}\n{standardized}");
    }
    if !standardized.contains(PEM_TAG_END) {
        standardized.push('\n');
        standardized.push_str(&format!("{PEM_TAG_END} {label}{PEM_DELIM}"));
    }
    standardized
}
