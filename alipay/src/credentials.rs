//! Application identity and key pair.

use std::fmt;

use crate::canonical::{Params, encode_params};
use crate::config::ClientConfig;
use crate::error::AlipayError;
use crate::keys::{parse_rsa_private_key, parse_rsa_public_key};
use crate::notification::Notification;
use crate::request::{Request, build_request_params};
use crate::response::VerifiedResponse;
use crate::signature::{self, SigningKey, VerifyingKey};
use crate::timestamp::Timestamp;

/// The application identifier together with the key that signs its requests
/// and the gateway key that authenticates what comes back.
///
/// Immutable after construction; share it freely between threads.
#[derive(Clone)]
pub struct Credentials {
    app_id: String,
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Credentials {
    /// Loads credentials from PEM or raw base64 key material.
    ///
    /// # Errors
    ///
    /// Returns [`AlipayError::KeyParse`] if either key cannot be parsed.
    pub fn new(
        app_id: impl Into<String>,
        app_private_key: &str,
        alipay_public_key: &str,
    ) -> Result<Self, AlipayError> {
        let private_key = parse_rsa_private_key(app_private_key)?;
        let public_key = parse_rsa_public_key(alipay_public_key)?;
        Ok(Self {
            app_id: app_id.into(),
            signing_key: signature::signing_key(private_key),
            verifying_key: signature::verifying_key(public_key),
        })
    }

    /// Loads credentials from a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AlipayError::KeyParse`] if either key cannot be parsed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AlipayError> {
        Self::new(
            config.app_id.clone(),
            &config.app_private_key,
            &config.alipay_public_key,
        )
    }

    /// Returns the application identifier.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Builds the signed parameter set for `request`, stamped with the
    /// current local time.
    ///
    /// # Errors
    ///
    /// See [`build_request_params`].
    pub fn build_request_params<R: Request + ?Sized>(
        &self,
        request: &R,
    ) -> Result<Params, AlipayError> {
        self.build_request_params_at(request, Timestamp::now())
    }

    /// Builds the signed parameter set for `request` with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// See [`build_request_params`].
    pub fn build_request_params_at<R: Request + ?Sized>(
        &self,
        request: &R,
        timestamp: Timestamp,
    ) -> Result<Params, AlipayError> {
        build_request_params(&self.app_id, &self.signing_key, request, timestamp)
    }

    /// Builds and form-encodes the signed parameter set, as handed to the
    /// mobile SDK.
    ///
    /// # Errors
    ///
    /// See [`build_request_params`].
    pub fn encode_request<R: Request + ?Sized>(&self, request: &R) -> Result<String, AlipayError> {
        Ok(encode_params(&self.build_request_params(request)?))
    }

    /// Signs an arbitrary canonical string.
    ///
    /// # Errors
    ///
    /// Returns [`AlipayError::Signing`] if signing fails.
    pub fn sign(&self, data: &str) -> Result<String, AlipayError> {
        signature::sign(&self.signing_key, data)
    }

    /// Verifies a signature made by the gateway.
    ///
    /// # Errors
    ///
    /// Returns a signature error if `sign` does not authenticate `data`.
    pub fn verify(&self, data: &str, sign: &str) -> Result<(), AlipayError> {
        signature::verify(&self.verifying_key, data, sign)
    }

    /// Verifies a gateway response body for `request`.
    ///
    /// # Errors
    ///
    /// See [`VerifiedResponse::verify`].
    pub fn verify_response<R: Request + ?Sized>(
        &self,
        request: &R,
        body: &[u8],
    ) -> Result<VerifiedResponse, AlipayError> {
        VerifiedResponse::verify(&self.verifying_key, body, &request.response_key())
    }

    /// Verifies decoded notification fields.
    ///
    /// # Errors
    ///
    /// See [`Notification::verify`].
    pub fn verify_notification(&self, params: Params) -> Result<Notification, AlipayError> {
        Notification::verify(&self.verifying_key, &self.app_id, params)
    }

    /// Verifies a raw `application/x-www-form-urlencoded` notification body.
    ///
    /// # Errors
    ///
    /// See [`Notification::verify`].
    pub fn verify_notification_form(&self, body: &[u8]) -> Result<Notification, AlipayError> {
        Notification::verify_form(&self.verifying_key, &self.app_id, body)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}
