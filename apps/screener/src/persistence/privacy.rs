//! Salted one-way hashing for contact details.
//!
//! Each value gets its own 16-byte salt from the OS RNG, so the same email hashed for two
//! candidates (or twice for one) never produces the same stored digest.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SALT_SIZE: usize = 16;

/// A sensitive value as stored: hex SHA-256 of `salt || value`, plus the hex salt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedField {
    pub digest: String,
    pub salt: String,
}

impl HashedField {
    /// True when `value` hashes to this digest under the stored salt.
    #[cfg(test)]
    pub fn matches(&self, value: &str) -> bool {
        digest_with_salt(&self.salt, value) == self.digest
    }
}

/// Hashes `value` under a freshly generated salt.
pub fn hash_sensitive(value: &str) -> HashedField {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    let salt = hex_encode(&salt);

    HashedField {
        digest: digest_with_salt(&salt, value),
        salt,
    }
}

fn digest_with_salt(salt_hex: &str, value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
