use async_trait::async_trait;
use entity::{pre_registrations, registrations};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, SqlErr,
    TransactionTrait, sea_query::Expr,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    domain::{
        error::RepositoryError,
        models::{confirmed_registration::ConfirmedRegistration, pending_registration::PendingStatus},
        repositories::payment_confirmation_repository::{
            ConfirmationOutcome, PaymentConfirmationRepository,
        },
    },
    infrastructure::record_mapping::{confirmed_row, db_error},
};

#[derive(Clone)]
pub struct PostgresPaymentConfirmationRepository {
    db: DatabaseConnection,
}

impl PostgresPaymentConfirmationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn existing_confirmation(&self, pending_id: Uuid) -> Result<Option<Uuid>, RepositoryError> {
        Ok(registrations::Entity::find()
            .filter(registrations::Column::PreRegistrationId.eq(pending_id))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(|r| r.id))
    }
}

#[async_trait]
impl PaymentConfirmationRepository for PostgresPaymentConfirmationRepository {
    async fn confirm(
        &self,
        confirmed: &ConfirmedRegistration,
    ) -> Result<ConfirmationOutcome, RepositoryError> {
        let pending_id = confirmed.pending_registration_id();

        // Begin transaction
        let txn = self.db.begin().await.map_err(db_error)?;

        // Row lock serializes concurrent deliveries for the same pending registration
        pre_registrations::Entity::find_by_id(pending_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(RepositoryError::NotFound)?;

        if let Some(existing) = registrations::Entity::find()
            .filter(registrations::Column::PreRegistrationId.eq(pending_id))
            .one(&txn)
            .await
            .map_err(db_error)?
        {
            txn.rollback().await.map_err(db_error)?;
            return Ok(ConfirmationOutcome::AlreadyConfirmed(existing.id));
        }

        // Insert confirmed registration
        if let Err(e) = registrations::Entity::insert(confirmed_row(confirmed))
            .exec_without_returning(&txn)
            .await
        {
            if let Some(SqlErr::UniqueConstraintViolation(detail)) = e.sql_err() {
                // Lost a race against another delivery outside the row lock
                warn!(pending_id = %pending_id, %detail, "confirmed registration already exists");
                txn.rollback().await.map_err(db_error)?;
                return match self.existing_confirmation(pending_id).await? {
                    Some(id) => Ok(ConfirmationOutcome::AlreadyConfirmed(id)),
                    None => Err(RepositoryError::DatabaseError(detail)),
                };
            }
            return Err(db_error(e));
        }

        // Update pre-registration status
        pre_registrations::Entity::update_many()
            .col_expr(
                pre_registrations::Column::Status,
                Expr::value(PendingStatus::Paid.as_str()),
            )
            .filter(pre_registrations::Column::Id.eq(pending_id))
            .exec(&txn)
            .await
            .map_err(db_error)?;

        // Commit transaction
        txn.commit().await.map_err(db_error)?;

        Ok(ConfirmationOutcome::Created)
    }
}
