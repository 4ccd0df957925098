//! Response envelopes.
//!
//! A gateway response is a JSON object holding the operation's result under
//! `<method with dots replaced by underscores>_response` and a top-level
//! `sign`:
//!
//! ```json
//! {
//!   "alipay_trade_precreate_response": {"code":"10000","msg":"Success","qr_code":"..."},
//!   "sign": "ERITJKEIJKJHKKKKKKKHJEREEEEEEEEEEE"
//! }
//! ```
//!
//! The signature covers the sub-object exactly as it appears in the body.
//! Parsing and re-serializing it could reorder keys or change escapes, so the
//! raw text is kept via [`serde_json::value::RawValue`] and verified as is.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::canonical::SIGN_FIELD;
use crate::error::AlipayError;
use crate::signature::{self, VerifyingKey};

/// `code` value of a successful call.
pub const SUCCESS_CODE: &str = "10000";

/// Returns the key of the response sub-object for `method`.
///
/// ```rust
/// assert_eq!(
///     alipay::response::response_key("alipay.trade.query"),
///     "alipay_trade_query_response"
/// );
/// ```
#[must_use]
pub fn response_key(method: &str) -> String {
    format!("{}_response", method.replace('.', "_"))
}

/// Status fields present in every response sub-object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseCommon {
    /// Gateway status code; `10000` on success.
    pub code: String,
    /// Gateway status message.
    pub msg: String,
    /// Business error code.
    pub sub_code: String,
    /// Business error message.
    pub sub_msg: String,
}

impl ResponseCommon {
    /// Returns `true` if the call succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// A response envelope split into its signed content and signature, borrowing
/// from the body.
#[derive(Debug, Clone, Copy)]
pub struct RawResponse<'a> {
    /// Raw text of the response sub-object.
    pub content: &'a str,
    /// Base64 signature over `content`.
    sign: &'a RawValue,
}

impl<'a> RawResponse<'a> {
    /// Locates the sub-object at `response_key` and the signature in `body`.
    ///
    /// # Errors
    ///
    /// Returns [`AlipayError::InvalidJson`] if the body is not a JSON object,
    /// the sub-object is missing, or `sign` is missing.
    pub fn parse(body: &'a [u8], response_key: &str) -> Result<Self, AlipayError> {
        let raw_map: HashMap<String, &'a RawValue> = serde_json::from_slice(body)
            .map_err(|e| AlipayError::invalid_json_with("body is not a valid JSON object", e))?;

        let content = raw_map.get(response_key).copied().ok_or_else(|| {
            AlipayError::invalid_json(format!("{response_key} is missing from the body"))
        })?;
        let sign = raw_map
            .get(SIGN_FIELD)
            .copied()
            .ok_or_else(|| AlipayError::invalid_json("sign is missing from the body"))?;

        Ok(Self {
            content: content.get(),
            sign,
        })
    }

    /// Returns the signature.
    ///
    /// # Errors
    ///
    /// Returns [`AlipayError::InvalidJson`] if `sign` is not a JSON string.
    pub fn sign(&self) -> Result<String, AlipayError> {
        serde_json::from_str(self.sign.get())
            .map_err(|e| AlipayError::invalid_json_with("sign is not a JSON string", e))
    }
}

/// A response sub-object whose signature has been checked.
///
/// Holds the exact text that was verified, so it can be deserialized into
/// any type or inspected as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedResponse {
    response_key: String,
    raw: String,
}

impl VerifiedResponse {
    /// Parses `body` and verifies the sub-object at `response_key` against
    /// its signature.
    ///
    /// # Errors
    ///
    /// Returns [`AlipayError::InvalidJson`] for malformed envelopes and a
    /// signature error if the content is not authentic.
    pub fn verify(
        key: &VerifyingKey,
        body: &[u8],
        response_key: &str,
    ) -> Result<Self, AlipayError> {
        let raw = RawResponse::parse(body, response_key)?;
        let sign = raw.sign()?;
        signature::verify(key, raw.content, &sign)?;
        Ok(Self {
            response_key: response_key.to_owned(),
            raw: raw.content.to_owned(),
        })
    }

    /// Returns the key the sub-object was found under.
    #[must_use]
    pub fn response_key(&self) -> &str {
        &self.response_key
    }

    /// Returns the verified JSON text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Deserializes the verified content.
    ///
    /// # Errors
    ///
    /// Returns [`AlipayError::InvalidJson`] if the content does not match `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, AlipayError> {
        serde_json::from_str(&self.raw).map_err(|e| {
            AlipayError::invalid_json_with(format!("failed to decode {}", self.response_key), e)
        })
    }

    /// Deserializes the status fields.
    ///
    /// # Errors
    ///
    /// Returns [`AlipayError::InvalidJson`] if the content is not an object.
    pub fn common(&self) -> Result<ResponseCommon, AlipayError> {
        self.parse()
    }
}
