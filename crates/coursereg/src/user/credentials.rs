//! Password hashing.

use std::fmt;

use sha2::{Digest, Sha256};

use super::error::UserError;

/// SHA-256 digest of a password, hex encoded.
///
/// Plaintext is hashed on entry and never stored or compared directly.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes a plaintext password.
    pub fn from_plaintext(password: &str) -> Result<Self, UserError> {
        if password.is_empty() {
            return Err(UserError::InvalidPassword);
        }
        Ok(Self(digest(password)))
    }

    /// Wraps a digest that was hashed elsewhere (e.g. loaded from a record).
    pub fn from_digest(hash: &str) -> Result<Self, UserError> {
        if hash.is_empty() {
            return Err(UserError::InvalidPassword);
        }
        Ok(Self(hash.to_string()))
    }

    /// Returns true if `password` hashes to this digest.
    pub fn verify(&self, password: &str) -> bool {
        digest(password) == self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the digest.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

fn digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..])
}

mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
