use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::{
        admin::{Admin, AdminRole, HashedPassword},
        registration::normalize_email,
    },
    repositories::admin_repository::AdminRepository,
    services::{password_service::PasswordHasher, token_service::TokenGenerator},
};

/// Hashed once at start-up and verified against when the email is unknown,
/// so both failure paths pay for one password verification.
const TIMING_PASSWORD: &str = "stage-entry-unknown-admin";

#[derive(Debug)]
pub struct LoginResult {
    pub token: String,
    pub admin: Admin,
}

pub struct AdminLoginUsecase<A: AdminRepository, P: PasswordHasher, T: TokenGenerator> {
    admin_repository: A,
    password_hasher: P,
    token_generator: T,
    timing_hash: Option<HashedPassword>,
}

impl<A: AdminRepository, P: PasswordHasher, T: TokenGenerator> AdminLoginUsecase<A, P, T> {
    pub fn new(admin_repository: A, password_hasher: P, token_generator: T) -> Self {
        let timing_hash = match password_hasher.hash(TIMING_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!(error = %e, "could not prepare timing hash for unknown admin logins");
                None
            }
        };
        Self {
            admin_repository,
            password_hasher,
            token_generator,
            timing_hash,
        }
    }

    /// Spend the same verification work as a known admin before rejecting.
    fn reject_unknown(&self, password: &str) -> DomainError {
        if let Some(hash) = &self.timing_hash {
            let _ = self.password_hasher.verify(password, hash);
        }
        DomainError::AuthenticationFailed
    }

    pub async fn login(&self, email: String, password: String) -> Result<LoginResult, DomainError>
    where
        A: Send + Sync,
        P: Send + Sync,
        T: Send + Sync,
    {
        let email = normalize_email(&email).map_err(|_| self.reject_unknown(&password))?;

        let Some(admin) = self.admin_repository.find_by_email(&email).await? else {
            warn!(email = %email, "login attempt for unknown admin");
            return Err(self.reject_unknown(&password));
        };

        if !self.password_hasher.verify(&password, admin.password_hash())? {
            warn!(email = %email, "admin login failed");
            return Err(DomainError::AuthenticationFailed);
        }

        let token = self.token_generator.generate(&admin)?;
        info!(admin_id = %admin.id(), "admin logged in");

        Ok(LoginResult { token, admin })
    }

    /// Create the first admin account. Returns `false` when the email is already registered.
    pub async fn bootstrap_admin(
        &self,
        email: String,
        name: String,
        password: String,
    ) -> Result<bool, DomainError>
    where
        A: Send + Sync,
        P: Send + Sync,
        T: Send + Sync,
    {
        let email = normalize_email(&email)?;
        if self.admin_repository.find_by_email(&email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = self.password_hasher.hash(&password)?;
        let admin = Admin::new(Uuid::new_v4(), email, name, password_hash, AdminRole::SuperAdmin)?;
        self.admin_repository.create(&admin).await?;

        info!(admin_id = %admin.id(), email = %admin.email(), "bootstrap admin created");
        Ok(true)
    }
}
