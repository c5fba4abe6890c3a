use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::admin::{Admin, AdminRole},
};

pub type Token = String;

/// Identity carried by an admin session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminClaims {
    pub admin_id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

pub trait TokenGenerator: Send + Sync {
    fn generate(&self, admin: &Admin) -> Result<Token, DomainError>;
}

pub trait TokenVerifier: Send + Sync {
    /// Decode and validate a token, failing with `DomainError::InvalidToken`.
    fn verify(&self, token: &str) -> Result<AdminClaims, DomainError>;
}
