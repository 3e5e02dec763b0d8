//! Gateway MAC schemes.
//!
//! Two independent schemes, selected by call site and never interchangeable:
//! inbound notifications are verified with hex-encoded HMAC-SHA512, outbound
//! payment links are signed with HMAC-SHA1, Base64-encoded and form-encoded
//! for query-string embedding.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use sha2::Sha512;
use subtle::ConstantTimeEq;

use super::errors::EncodingError;

type HmacSha512 = Hmac<Sha512>;
type HmacSha1 = Hmac<Sha1>;

/// Computes the inbound-notification signature over a canonical string.
///
/// HMAC-SHA512, keyed with the provider hash secret, rendered as a
/// lowercase hex digest.
pub fn notification_signature(secret: &SecretString, canonical: &str) -> String {
    hex::encode(notification_mac_bytes(secret, canonical))
}

/// Verifies a received signature against the canonical string.
///
/// The received value is hex-decoded and compared byte-wise in constant
/// time; invalid hex or any length mismatch is a failure, never a partial
/// match.
pub fn verify_notification_signature(
    secret: &SecretString,
    canonical: &str,
    received: &str,
) -> bool {
    let Ok(received) = hex::decode(received) else {
        return false;
    };
    let expected = notification_mac_bytes(secret, canonical);
    constant_time_compare(&expected, &received)
}

/// Computes the outbound payment-link checksum.
///
/// HMAC-SHA1 over the fixed-order concatenation, Base64-encoded, then
/// form-encoded so the result embeds directly into a query string.
///
/// # Errors
///
/// Returns [`EncodingError`] if the secret or the checksum input is not
/// ASCII; this indicates a misconfigured secret, not a transient fault.
pub fn payment_link_checksum(
    secret: &SecretString,
    input: &str,
) -> Result<String, EncodingError> {
    let key = secret.expose_secret();
    if !key.is_ascii() {
        return Err(EncodingError("hash secret"));
    }
    if !input.is_ascii() {
        return Err(EncodingError("checksum input"));
    }

    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key");
    mac.update(input.as_bytes());
    let digest = BASE64.encode(mac.finalize().into_bytes());

    Ok(form_urlencoded::byte_serialize(digest.as_bytes()).collect())
}

fn notification_mac_bytes(secret: &SecretString, canonical: &str) -> Vec<u8> {
    let mut mac = HmacSha512::new_from_slice(secret.expose_secret().as_bytes())
        .expect("HMAC accepts any key");
    mac.update(canonical.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Constant-time comparison of two byte slices.
///
/// Prevents timing attacks that could leak information about the expected
/// signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
