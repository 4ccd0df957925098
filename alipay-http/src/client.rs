//! Gateway client.
//!
//! [`AlipayClient`] delivers a signed parameter set in one of three ways:
//!
//! - [`AlipayClient::execute`] posts it to the gateway, verifies the signed
//!   response and deserializes it.
//! - [`AlipayClient::sdk_execute`] returns the form-encoded parameters for a
//!   mobile SDK call. Nothing is sent.
//! - [`AlipayClient::page_execute`] returns the gateway URL to redirect a
//!   browser to. Nothing is sent.
//!
//! With the `telemetry` feature, each gateway call runs inside an
//! `alipay.client.execute` span tagged with the API method.
//!
//! One request is issued per call. There is no retry, backoff or rate
//! limiting; a transport error is returned as is.

use std::sync::Arc;
use std::time::Duration;

use alipay::canonical::encode_params;
use alipay::{ClientConfig, Credentials, Request, VerifiedResponse};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::constants::CONTENT_TYPE_FORM_UTF8;
use crate::error::ClientError;

/// A client for the Alipay open platform gateway.
///
/// Cheap to clone; clones share the credentials and the connection pool of
/// the underlying [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct AlipayClient {
    /// Gateway endpoint.
    gateway: Url,
    /// Gateway as configured, prefixed to page redirect URLs unchanged.
    gateway_str: String,
    /// Application identity and keys.
    credentials: Arc<Credentials>,
    /// Shared Reqwest HTTP client.
    client: Client,
    /// Optional request timeout.
    timeout: Option<Duration>,
}

impl AlipayClient {
    /// Constructs a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the gateway URL or either key is malformed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let gateway = Url::parse(&config.gateway).map_err(|e| ClientError::UrlParse {
            context: "Failed to parse gateway url",
            source: e,
        })?;
        let credentials = Credentials::from_config(config)?;
        let mut client = Self::with_credentials(gateway, credentials);
        client.gateway_str.clone_from(&config.gateway);
        Ok(client)
    }

    /// Constructs a client from an already parsed gateway URL and credentials.
    #[must_use]
    pub fn with_credentials(gateway: Url, credentials: Credentials) -> Self {
        Self {
            gateway_str: gateway.to_string(),
            gateway,
            credentials: Arc::new(credentials),
            client: Client::new(),
            timeout: None,
        }
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Returns the gateway URL.
    #[must_use]
    pub const fn gateway(&self) -> &Url {
        &self.gateway
    }

    /// Returns the credentials used for signing and verification.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Posts `request` to the gateway and returns the verified response
    /// deserialized as `T`.
    ///
    /// The signature is checked before deserialization, so an unverified
    /// payload is never returned.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failure, and
    /// [`ClientError::Alipay`] if the body is malformed, fails verification
    /// or does not match `T`.
    pub async fn execute<T, R>(&self, request: &R) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        R: Request + Sync + ?Sized,
    {
        let verified = self.execute_raw(request).await?;
        Ok(verified.parse()?)
    }

    /// Posts `request` to the gateway and returns the verified response
    /// sub-object without deserializing it.
    ///
    /// # Errors
    ///
    /// See [`AlipayClient::execute`].
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "alipay.client.execute", skip_all, fields(method = request.method()), err)
    )]
    pub async fn execute_raw<R>(&self, request: &R) -> Result<VerifiedResponse, ClientError>
    where
        R: Request + Sync + ?Sized,
    {
        let params = self.credentials.build_request_params(request)?;
        let body = self.post_form(encode_params(&params), "POST gateway").await?;
        let verified = self.credentials.verify_response(request, &body)?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(response_key = verified.response_key(), "alipay.client.verified");

        Ok(verified)
    }

    /// Returns the signed, form-encoded parameters for a mobile SDK call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Alipay`] if the request cannot be signed.
    pub fn sdk_execute<R: Request + ?Sized>(&self, request: &R) -> Result<String, ClientError> {
        Ok(self.credentials.encode_request(request)?)
    }

    /// Returns the gateway URL carrying the signed parameters, for a browser
    /// redirect.
    ///
    /// The gateway is prefixed exactly as configured, without URL
    /// normalization.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Alipay`] if the request cannot be signed.
    pub fn page_execute<R: Request + ?Sized>(&self, request: &R) -> Result<String, ClientError> {
        let query = self.credentials.encode_request(request)?;
        Ok(format!("{}?{query}", self.gateway_str))
    }

    /// Posts a form body to the gateway and returns the raw response body.
    ///
    /// The HTTP status is not inspected: the gateway reports failures inside
    /// the signed body.
    async fn post_form(
        &self,
        form: String,
        context: &'static str,
    ) -> Result<Vec<u8>, ClientError> {
        let mut req = self
            .client
            .post(self.gateway.clone())
            .header(CONTENT_TYPE, CONTENT_TYPE_FORM_UTF8)
            .body(form);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let http_response = req
            .send()
            .await
            .map_err(|e| ClientError::Http { context, source: e })?;
        let body = http_response
            .bytes()
            .await
            .map_err(|e| ClientError::ResponseBodyRead { context, source: e })?;
        Ok(body.to_vec())
    }
}

/// Converts a [`ClientConfig`] into an [`AlipayClient`].
impl TryFrom<&ClientConfig> for AlipayClient {
    type Error = ClientError;

    fn try_from(config: &ClientConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}
