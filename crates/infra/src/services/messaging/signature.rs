use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// base64(HMAC-SHA256(channel secret, body)), the value the platform sends in
/// the `x-line-signature` header
pub fn sign_body(channel_secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .expect("HMAC to accept keys of any length");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Constant time comparison of the given signature against the body
pub fn verify_signature(channel_secret: &str, signature: &str, body: &[u8]) -> bool {
    let decoded = match STANDARD.decode(signature.trim()) {
        Ok(decoded) => decoded,
        Err(_) => return false,
    };
    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(body);
    mac.verify_slice(&decoded).is_ok()
}
