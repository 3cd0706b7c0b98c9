// src/signature.rs
use hmac::{digest::InvalidLength, Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

use crate::{config::Secret, error::WebhookError};

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_HEADER: &str = "x-hub-signature";
pub const ALGORITHM: &str = "sha1";

/// A parsed `algorithm=digest` header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    pub algorithm: &'a str,
    pub digest: &'a str,
}

impl<'a> SignatureHeader<'a> {
    /// Splits on the first `=` and checks the algorithm name.
    pub fn parse(value: &'a str) -> Result<Self, WebhookError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(WebhookError::SignatureMissing);
        }

        let (algorithm, digest) = value
            .split_once('=')
            .ok_or(WebhookError::SignatureMalformed)?;
        if algorithm.is_empty() || digest.is_empty() {
            return Err(WebhookError::SignatureMalformed);
        }
        if !algorithm.eq_ignore_ascii_case(ALGORITHM) {
            return Err(WebhookError::UnsupportedAlgorithm(algorithm.to_string()));
        }

        Ok(Self { algorithm, digest })
    }
}

/// Lowercase hex HMAC-SHA1 of `payload` keyed by `secret`.
pub fn generate_hmac_hex(payload: &[u8], secret: &[u8]) -> Result<String, InvalidLength> {
    let mut mac = HmacSha1::new_from_slice(secret)?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Checks a parsed header against the body. Uppercase hex digits in the
/// supplied digest are accepted.
pub fn verify(
    header: &SignatureHeader<'_>,
    payload: &[u8],
    secret: &Secret,
) -> Result<(), WebhookError> {
    let expected = generate_hmac_hex(payload, secret.as_bytes())
        .map_err(|_| WebhookError::SignatureMismatch)?;
    let supplied = header.digest.to_ascii_lowercase();

    if bool::from(supplied.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(WebhookError::SignatureMismatch)
    }
}
