//! Token secret fingerprinting.
//!
//! A truncated SHA-256 digest lets operators confirm which secret a running
//! instance uses without the secret reaching the logs.

use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 digest of `secret`, as lowercase hex.
///
/// # Examples
///
/// ```rust
/// use staybook::inbound::http::identity_config::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(b"correct horse battery staple");
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
