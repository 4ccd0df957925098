//! Asynchronous notifications.
//!
//! After a trade changes state the gateway posts a form to the request's
//! `notify_url`. The form carries the envelope fields (`app_id`, `sign`,
//! `sign_type`, ...) next to the trade fields. It is authentic when:
//!
//! 1. `app_id` equals the configured application identifier, and
//! 2. `sign` verifies against the canonical string of every other field
//!    except `sign_type`.
//!
//! The app id is checked first so that a notification meant for another
//! application is rejected without touching the signature.

use crate::canonical::{Params, SIGN_FIELD, SIGN_TYPE_FIELD, canonicalize, parse_form};
use crate::error::AlipayError;
use crate::signature::{self, VerifyingKey};
use crate::timestamp::Timestamp;

/// A notification whose origin has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    params: Params,
}

impl Notification {
    /// Verifies decoded form fields.
    ///
    /// # Errors
    ///
    /// Returns [`AlipayError::AppIdMismatch`] if the notification is addressed
    /// to another application, and a signature error if it is not authentic.
    pub fn verify(key: &VerifyingKey, app_id: &str, params: Params) -> Result<Self, AlipayError> {
        let actual = params.get("app_id").map(String::as_str).unwrap_or_default();
        if actual != app_id {
            #[cfg(feature = "telemetry")]
            tracing::warn!(expected = app_id, actual, "alipay.notification.app_id_mismatch");
            return Err(AlipayError::AppIdMismatch {
                expected: app_id.to_owned(),
                actual: actual.to_owned(),
            });
        }

        let string_to_verify = canonicalize(
            params
                .iter()
                .filter(|(key, _)| key.as_str() != SIGN_FIELD && key.as_str() != SIGN_TYPE_FIELD),
        );
        let sign = params.get(SIGN_FIELD).map(String::as_str).unwrap_or_default();
        signature::verify(key, &string_to_verify, sign)?;

        Ok(Self { params })
    }

    /// Verifies a raw `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// See [`Notification::verify`].
    pub fn verify_form(key: &VerifyingKey, app_id: &str, body: &[u8]) -> Result<Self, AlipayError> {
        Self::verify(key, app_id, parse_form(body))
    }

    /// Returns a field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.params.get(field).map(String::as_str)
    }

    /// Returns all received fields.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Consumes the notification, returning its fields.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.params
    }

    /// Application the notification was sent to.
    #[must_use]
    pub fn app_id(&self) -> Option<&str> {
        self.get("app_id")
    }

    /// Gateway-assigned notification identifier.
    #[must_use]
    pub fn notify_id(&self) -> Option<&str> {
        self.get("notify_id")
    }

    /// Notification type, e.g. `trade_status_sync`.
    #[must_use]
    pub fn notify_type(&self) -> Option<&str> {
        self.get("notify_type")
    }

    /// Time the notification was sent, if present and well-formed.
    #[must_use]
    pub fn notify_time(&self) -> Option<Timestamp> {
        self.get("notify_time")?.parse().ok()
    }

    /// Gateway trade number.
    #[must_use]
    pub fn trade_no(&self) -> Option<&str> {
        self.get("trade_no")
    }

    /// Merchant order number.
    #[must_use]
    pub fn out_trade_no(&self) -> Option<&str> {
        self.get("out_trade_no")
    }

    /// Trade status, e.g. `TRADE_SUCCESS`.
    #[must_use]
    pub fn trade_status(&self) -> Option<&str> {
        self.get("trade_status")
    }

    /// Order amount in yuan.
    #[must_use]
    pub fn total_amount(&self) -> Option<&str> {
        self.get("total_amount")
    }
}
