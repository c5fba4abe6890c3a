use crate::domain::{error::DomainError, models::admin::HashedPassword};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Service for hashing and verifying admin passwords
pub trait PasswordHasher: Clone {
    /// Hash a plain text password, rejecting ones shorter than `MIN_PASSWORD_LENGTH`
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError>;

    /// Verify a plain text password against a stored hash
    fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> Result<bool, DomainError>;
}
