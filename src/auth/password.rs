//! Credential digests and comparison
//! Unsalted SHA-256 with a fixed prefix marker, plus a legacy path for
//! records that still hold plaintext passwords

use sha2::{Digest, Sha256};

/// Marker distinguishing digested values from legacy plaintext records
pub const HASH_PREFIX: &str = "sha256:";

/// Password hashing and comparison
pub struct CredentialVerifier;

impl CredentialVerifier {
    /// Digest a plaintext password into its stored form
    pub fn hash(plain: &str) -> String {
        let digest = Sha256::digest(plain.as_bytes());
        format!("{HASH_PREFIX}{}", hex::encode(digest))
    }

    /// Compare a plaintext password against a stored value.
    ///
    /// Stored values without the prefix marker are legacy plaintext and
    /// are compared directly.
    pub fn verify(plain: &str, stored: &str) -> bool {
        if stored.starts_with(HASH_PREFIX) {
            Self::hash(plain) == stored
        } else {
            plain == stored
        }
    }
}
