//! Request envelopes.
//!
//! A [`Request`] describes one gateway operation: its dotted method name, the
//! envelope-level fields it overrides (such as `notify_url`), and the
//! business fields that are serialized into `biz_content`.
//!
//! [`build_request_params`] turns a request into the complete, signed
//! parameter set:
//!
//! | field         | value                                     |
//! |---------------|-------------------------------------------|
//! | `app_id`      | configured application identifier         |
//! | `format`      | `JSON`                                    |
//! | `charset`     | `utf-8`                                   |
//! | `sign_type`   | `RSA2`                                    |
//! | `version`     | `1.0`                                     |
//! | `method`      | [`Request::method`]                       |
//! | `timestamp`   | `YYYY-MM-DD HH:MM:SS`, local time         |
//! | `biz_content` | JSON encoding of the request              |
//! | `sign`        | signature over all of the above           |

use serde::Serialize;

use crate::canonical::{Params, SIGN_FIELD, canonicalize, clean_params};
use crate::error::AlipayError;
use crate::signature::{self, SIGN_TYPE_RSA2, SigningKey};
use crate::timestamp::Timestamp;

/// The only response format the gateway offers.
pub const FORMAT: &str = "JSON";

/// Character set of every request.
pub const CHARSET: &str = "utf-8";

/// Protocol version.
pub const VERSION: &str = "1.0";

/// A gateway operation.
///
/// The [`Serialize`] implementation produces `biz_content` and must skip the
/// fields returned by [`Request::envelope_fields`].
pub trait Request: Serialize {
    /// Dotted method name, e.g. `alipay.trade.pay`.
    fn method(&self) -> &'static str;

    /// Fields sent next to the protocol fields instead of inside `biz_content`.
    fn envelope_fields(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }

    /// Key of the response sub-object for this operation.
    fn response_key(&self) -> String {
        crate::response::response_key(self.method())
    }
}

/// Serializes the business fields of a request.
///
/// # Errors
///
/// Returns [`AlipayError::Serialization`] if the request cannot be encoded.
pub fn encode_biz_content<R: Request + ?Sized>(request: &R) -> Result<String, AlipayError> {
    serde_json::to_string(request).map_err(AlipayError::Serialization)
}

/// Builds the signed parameter set for `request`.
///
/// Envelope fields are applied first so the protocol fields always take
/// precedence. The set is cleaned before signing, so every transmitted field
/// is covered by the signature.
///
/// # Errors
///
/// Returns [`AlipayError::Serialization`] if `biz_content` cannot be encoded
/// and [`AlipayError::Signing`] if signing fails.
pub fn build_request_params<R: Request + ?Sized>(
    app_id: &str,
    key: &SigningKey,
    request: &R,
    timestamp: Timestamp,
) -> Result<Params, AlipayError> {
    let mut params: Params = request
        .envelope_fields()
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect();

    params.insert("app_id".to_owned(), app_id.to_owned());
    params.insert("format".to_owned(), FORMAT.to_owned());
    params.insert("charset".to_owned(), CHARSET.to_owned());
    params.insert("sign_type".to_owned(), SIGN_TYPE_RSA2.to_owned());
    params.insert("version".to_owned(), VERSION.to_owned());
    params.insert("method".to_owned(), request.method().to_owned());
    params.insert("timestamp".to_owned(), timestamp.to_string());
    params.insert("biz_content".to_owned(), encode_biz_content(request)?);

    let mut params = clean_params(params);
    let string_to_sign = canonicalize(&params);
    let sign = signature::sign(key, &string_to_sign)?;
    params.insert(SIGN_FIELD.to_owned(), sign);

    #[cfg(feature = "telemetry")]
    tracing::debug!(method = request.method(), app_id, "alipay.request.signed");

    Ok(params)
}
