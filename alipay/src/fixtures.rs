//! Shared RSA key fixtures for unit tests.

use std::sync::LazyLock;

use rsa::RsaPrivateKey;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};

use crate::Credentials;
use crate::config::{ClientConfig, GATEWAY_DEVELOPMENT};

pub(crate) const APP_ID: &str = "2021000000000001";

pub(crate) struct TestKeys {
    pub private_key: RsaPrivateKey,
    pub private_pem: String,
    pub public_pem: String,
}

impl TestKeys {
    fn generate() -> Self {
        let private_key = RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048).unwrap();
        let private_pem = private_key.to_pkcs1_pem(LineEnding::LF).unwrap().to_string();
        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap();
        Self {
            private_key,
            private_pem,
            public_pem,
        }
    }
}

/// Keys of the merchant application.
pub(crate) static APP_KEYS: LazyLock<TestKeys> = LazyLock::new(TestKeys::generate);

/// Keys of the gateway.
pub(crate) static GATEWAY_KEYS: LazyLock<TestKeys> = LazyLock::new(TestKeys::generate);

/// Removes PEM markers, leaving the body on a single line.
pub(crate) fn strip_pem(pem: &str) -> String {
    pem.lines()
        .filter(|line| !line.starts_with("-----"))
        .map(str::trim)
        .collect()
}

/// Credentials signing with the app key and verifying with the gateway key.
pub(crate) fn credentials() -> Credentials {
    let config = ClientConfig::new(
        GATEWAY_DEVELOPMENT,
        APP_ID,
        strip_pem(&APP_KEYS.private_pem),
        GATEWAY_KEYS.public_pem.clone(),
    );
    Credentials::from_config(&config).unwrap()
}

/// Credentials as seen from the gateway: signing with the gateway key and
/// verifying with the app key.
pub(crate) fn gateway_credentials() -> Credentials {
    let config = ClientConfig::new(
        GATEWAY_DEVELOPMENT,
        APP_ID,
        GATEWAY_KEYS.private_pem.clone(),
        APP_KEYS.public_pem.clone(),
    );
    Credentials::from_config(&config).unwrap()
}
