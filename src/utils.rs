// For signature verification
use hex::decode as hex_decode;
use hmac::{Hmac, Mac};
use sha2::Sha256;
type HmacSha256 = Hmac<Sha256>;

/// Helper function for verifying the Cal.com webhook signature
///
/// Cal.com sends the hex-encoded HMAC-SHA256 digest of the raw request body
/// in the `x-cal-signature-256` header, with no prefix. The digest must be
/// computed over the exact bytes received, never a re-serialization.
pub fn verify_cal_signature(secret: &str, payload: &[u8], signature_header: &str) -> bool {
    // Compute HMAC SHA256
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload);

    match hex_decode(signature_header) {
        // Constant-time comparison
        Ok(signature_bytes) => mac.verify_slice(&signature_bytes).is_ok(),
        Err(_) => false,
    }
}

/// Computes the hex digest a sender is expected to attach to `payload`.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
