use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{error::RepositoryError, models::confirmed_registration::ConfirmedRegistration};

#[derive(Debug)]
pub enum ConfirmationOutcome {
    Created,
    /// The pending registration was confirmed earlier; holds the existing confirmed id.
    AlreadyConfirmed(Uuid),
}

/// Moves a paid pending registration into the confirmed table.
#[async_trait]
pub trait PaymentConfirmationRepository {
    /// Insert `confirmed` and mark its pending registration paid in a single
    /// transaction. Nothing is written when a confirmed registration already
    /// exists for the same pending registration.
    async fn confirm(
        &self,
        confirmed: &ConfirmedRegistration,
    ) -> Result<ConfirmationOutcome, RepositoryError>;
}
