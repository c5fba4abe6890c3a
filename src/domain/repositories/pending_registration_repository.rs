use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::pending_registration::PendingRegistration,
};

#[async_trait]
pub trait PendingRegistrationRepository {
    async fn insert(&self, pending: &PendingRegistration) -> Result<(), RepositoryError>;

    /// Store the gateway's payment session id on a pending registration.
    async fn attach_payment_session(
        &self,
        id: Uuid,
        payment_session_id: &str,
    ) -> Result<(), RepositoryError>;

    /// Mark the registration failed in a single conditional write. Returns
    /// `false` when the row is already paid, leaving it untouched.
    async fn mark_failed_unless_paid(&self, id: Uuid) -> Result<bool, RepositoryError>;

    async fn find_by_payment_session_id(
        &self,
        payment_session_id: &str,
    ) -> Result<Option<PendingRegistration>, RepositoryError>;

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PendingRegistration>, RepositoryError>;
}
