use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{error::RepositoryError, models::confirmed_registration::ConfirmedRegistration};

/// Read and review access to confirmed registrations.
#[async_trait]
pub trait RegistrationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ConfirmedRegistration>, RepositoryError>;

    /// Most recently created registration with this (lower-cased) email.
    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ConfirmedRegistration>, RepositoryError>;

    /// Most recently created registration with this mobile number.
    async fn find_latest_by_mobile(
        &self,
        mobile: &str,
    ) -> Result<Option<ConfirmedRegistration>, RepositoryError>;

    async fn list_newest_first(&self) -> Result<Vec<ConfirmedRegistration>, RepositoryError>;

    /// Persist audition status, admin notes and `updated_at`.
    async fn save_review(&self, registration: &ConfirmedRegistration) -> Result<(), RepositoryError>;

    /// Persist the video reference and `updated_at`.
    async fn save_video(&self, registration: &ConfirmedRegistration) -> Result<(), RepositoryError>;
}
