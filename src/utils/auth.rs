use crate::core::config::AuthConfig;
use crate::core::error::HelpCenterError;
use anyhow::{anyhow, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Compare two strings in constant time
pub fn constant_time_eq(provided: &str, expected: &str) -> bool {
    provided.as_bytes().len() == expected.as_bytes().len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Whether a stored password is an Argon2 PHC string rather than legacy plaintext
pub fn is_password_hash(stored: &str) -> bool {
    stored.starts_with("$argon2")
}

/// Password storage policy.
///
/// New passwords are stored as salted Argon2id hashes unless hashing is
/// disabled, in which case they are kept verbatim. Verification accepts both
/// forms so records written before hashing was enabled keep working.
#[derive(Clone)]
pub struct Passwords {
    hash_new: bool,
    argon2: Argon2<'static>,
}

impl Passwords {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let params = Params::new(config.argon2_memory_kib, config.argon2_iterations, 1, None)
            .map_err(|e| anyhow!("Invalid argon2 parameters: {}", e))?;

        Ok(Self {
            hash_new: config.hash_passwords,
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Prepare a password for storage
    pub fn hash(&self, password: &str) -> Result<String, HelpCenterError> {
        if !self.hash_new {
            return Ok(password.to_string());
        }

        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HelpCenterError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Check a login attempt against the stored value
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        if !is_password_hash(stored) {
            return constant_time_eq(password, stored);
        }

        match PasswordHash::new(stored) {
            // Cost parameters come from the PHC string itself
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                false
            }
        }
    }

    /// Stored plaintext that should be replaced by a hash
    pub fn needs_upgrade(&self, stored: &str) -> bool {
        self.hash_new && !is_password_hash(stored)
    }
}

#[cfg(test)]
pub(crate) fn test_passwords() -> Passwords {
    Passwords::new(&AuthConfig {
        hash_passwords: true,
        argon2_memory_kib: 64,
        argon2_iterations: 1,
    })
    .unwrap()
}
