use base64::{URL_SAFE_NO_PAD, decode_config, encode_config};
use jwt_simple::prelude::ES256KeyPair;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::config;

#[derive(Debug, Clone)]
pub struct VapidConfig {
    pub private_key: String,
    pub public_key: String,
    pub subject: String,
}

#[derive(Debug, Clone)]
pub struct VapidCredentials {
    pub private_key: String,
    pub public_key: String,
}

#[derive(Debug, Clone)]
pub enum VapidConfigStatus {
    Missing,
    Incomplete,
    Ready(VapidConfig),
}

pub fn load_vapid_config(config: &config::AppConfig) -> VapidConfigStatus {
    let private_key = config.vapid_private_key.as_ref();
    let public_key = config.vapid_public_key.as_ref();
    let subject = config.vapid_subject.as_ref();
    let has_any = private_key.is_some() || public_key.is_some() || subject.is_some();

    match (private_key, public_key, subject) {
        (Some(private_key), Some(public_key), Some(subject)) => {
            VapidConfigStatus::Ready(VapidConfig {
                private_key: private_key.clone(),
                public_key: public_key.clone(),
                subject: subject.clone(),
            })
        }
        _ if has_any => VapidConfigStatus::Incomplete,
        _ => VapidConfigStatus::Missing,
    }
}

pub fn generate_vapid_credentials() -> Result<VapidCredentials, web_push::WebPushError> {
    let mut rng = OsRng;
    generate_vapid_credentials_with_rng(&mut rng)
}

pub(crate) fn generate_vapid_credentials_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<VapidCredentials, web_push::WebPushError> {
    let key_pair = generate_es256_keypair_with_rng(rng);
    let private_key = encode_config(key_pair.to_bytes(), URL_SAFE_NO_PAD);
    let public_key =
        web_push::VapidSignatureBuilder::from_base64_no_sub(&private_key, URL_SAFE_NO_PAD)?
            .get_public_key();
    let public_key = encode_config(public_key, URL_SAFE_NO_PAD);

    Ok(VapidCredentials {
        private_key,
        public_key,
    })
}

fn generate_es256_keypair_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> ES256KeyPair {
    let mut key_bytes = [0u8; 32];
    loop {
        rng.fill_bytes(&mut key_bytes);
        if let Ok(key_pair) = ES256KeyPair::from_bytes(&key_bytes) {
            return key_pair;
        }
    }
}

/// Decodes the URL-safe base64 application-server key into the raw bytes the
/// platform subscribe call expects: substitute `-`/`_` with `+`/`/`,
/// right-pad with `=` to a multiple of four, then standard base64 decoding.
/// A VAPID public key decodes to a 65-byte uncompressed P-256 point.
pub fn decode_server_key(key: &str) -> Result<Vec<u8>, ServerKeyError> {
    if key.is_empty() {
        return Err(ServerKeyError::Empty);
    }
    let mut standard: String = key
        .chars()
        .map(|ch| match ch {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while standard.len() % 4 != 0 {
        standard.push('=');
    }
    decode_config(&standard, base64::STANDARD).map_err(ServerKeyError::Encoding)
}

#[derive(Debug)]
pub enum ServerKeyError {
    Empty,
    Encoding(base64::DecodeError),
}

impl std::fmt::Display for ServerKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerKeyError::Empty => f.write_str("application server key is empty"),
            ServerKeyError::Encoding(err) => {
                write!(f, "application server key is not valid base64url: {err}")
            }
        }
    }
}

impl std::error::Error for ServerKeyError {}
