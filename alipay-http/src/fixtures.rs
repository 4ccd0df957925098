//! Key fixtures shared by the client and server tests.

use std::sync::LazyLock;

use alipay::config::{ClientConfig, GATEWAY_DEVELOPMENT};
use alipay::{Credentials, Params};
use rsa::RsaPrivateKey;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};

pub(crate) const APP_ID: &str = "2021000000000001";

pub(crate) struct KeyPem {
    pub private_pem: String,
    pub public_pem: String,
}

fn generate() -> KeyPem {
    let key = RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048).unwrap();
    KeyPem {
        private_pem: key.to_pkcs1_pem(LineEnding::LF).unwrap().to_string(),
        public_pem: key.to_public_key().to_public_key_pem(LineEnding::LF).unwrap(),
    }
}

static APP_KEYS: LazyLock<KeyPem> = LazyLock::new(generate);
static GATEWAY_KEYS: LazyLock<KeyPem> = LazyLock::new(generate);

/// Configuration of the merchant application, pointed at `gateway`.
pub(crate) fn config(gateway: &str) -> ClientConfig {
    ClientConfig::new(
        gateway,
        APP_ID,
        APP_KEYS.private_pem.clone(),
        GATEWAY_KEYS.public_pem.clone(),
    )
}

/// Credentials of the merchant application.
pub(crate) fn credentials() -> Credentials {
    Credentials::from_config(&config(GATEWAY_DEVELOPMENT)).unwrap()
}

/// The gateway's side: signs with the gateway key, verifies with the app key.
pub(crate) fn gateway() -> Credentials {
    Credentials::new(APP_ID, &GATEWAY_KEYS.private_pem, &APP_KEYS.public_pem).unwrap()
}

/// A notification form signed by the gateway.
pub(crate) fn signed_notification(app_id: &str) -> Params {
    let mut params = Params::new();
    params.insert("app_id".into(), app_id.into());
    params.insert("notify_id".into(), "ac05099524730693a8b330c5ecf72da9786".into());
    params.insert("notify_time".into(), "2024-03-01 09:05:07".into());
    params.insert("notify_type".into(), "trade_status_sync".into());
    params.insert("out_trade_no".into(), "6823789339978248".into());
    params.insert("trade_no".into(), "2013112011001004330000121536".into());
    params.insert("trade_status".into(), "TRADE_SUCCESS".into());
    params.insert("total_amount".into(), "0.01".into());

    let sign = gateway()
        .sign(&alipay::canonical::canonicalize(&params))
        .unwrap();
    params.insert("sign".into(), sign);
    params.insert("sign_type".into(), "RSA2".into());
    params
}
