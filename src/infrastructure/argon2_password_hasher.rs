use argon2::{
    Argon2, PasswordHash as Argon2Hash,
    password_hash::{PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::error;

use crate::domain::{
    error::DomainError,
    models::admin::HashedPassword,
    services::password_service::{MIN_PASSWORD_LENGTH, PasswordHasher},
};

#[derive(Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        if plain_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::WeakPassword);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hashing failed");
                DomainError::AuthenticationFailed
            })?
            .to_string();

        Ok(HashedPassword::new(hash))
    }

    /// A stored hash that cannot be parsed counts as a failed login.
    fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> Result<bool, DomainError> {
        let parsed_hash = Argon2Hash::new(hashed_password.as_str())
            .map_err(|_| DomainError::AuthenticationFailed)?;

        Ok(Argon2::default()
            .verify_password(plain_password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
