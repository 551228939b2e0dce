use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;

#[derive(Debug)]
pub enum Error {
    HashingFailed,
}

// Slow, salted hashing for secrets we must be able to check but never store
// in plaintext: OTP codes and refresh tokens.
pub fn hash_secret(secret: &str) -> Result<String, Error> {
    let mut salt_bytes = [0_u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| {
        tracing::error!("Failed to generate hash salt: {}", err);
        Error::HashingFailed
    })?;

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("Failed to hash secret: {}", err);
            Error::HashingFailed
        })
}

// Constant-time comparison; an unparseable hash is treated as a mismatch.
pub fn verify_secret(secret: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_the_hashed_secret() {
        let hash = hash_secret("482913").unwrap();
        assert!(verify_secret("482913", &hash));
    }

    #[test]
    fn rejects_a_different_secret() {
        let hash = hash_secret("482913").unwrap();
        assert!(!verify_secret("482914", &hash));
    }

    #[test]
    fn salts_are_unique_per_hash() {
        let first = hash_secret("482913").unwrap();
        let second = hash_secret("482913").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_secret("482913", "not-a-phc-string"));
    }
}
