//! GitHub webhook signature verification.
//!
//! GitHub signs the raw request body with HMAC-SHA256 and sends the result
//! in `X-Hub-Signature-256` as `sha256=<hex>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex HMAC-SHA256 of a payload.
pub fn compute_signature(secret: &str, body: &[u8]) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a `sha256=<hex>` header value against the raw body.
///
/// Constant-time comparison; a missing or malformed header fails closed.
pub fn verify_signature(header_value: &str, secret: &str, body: &[u8]) -> bool {
    let Some(received) = header_value.strip_prefix("sha256=") else {
        return false;
    };
    let computed = compute_signature(secret, body);
    received
        .as_bytes()
        .ct_eq(computed.as_bytes())
        .into()
}
