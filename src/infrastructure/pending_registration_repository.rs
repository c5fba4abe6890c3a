use async_trait::async_trait;
use entity::pre_registrations;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    domain::{
        error::RepositoryError,
        models::pending_registration::{PendingRegistration, PendingStatus},
        repositories::pending_registration_repository::PendingRegistrationRepository,
    },
    infrastructure::record_mapping::{db_error, pending_from_model, pending_row},
};

#[derive(Clone)]
pub struct PostgresPendingRegistrationRepository {
    db: DatabaseConnection,
}

impl PostgresPendingRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PendingRegistrationRepository for PostgresPendingRegistrationRepository {
    async fn insert(&self, pending: &PendingRegistration) -> Result<(), RepositoryError> {
        pre_registrations::Entity::insert(pending_row(pending))
            .exec_without_returning(&self.db)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn attach_payment_session(
        &self,
        id: Uuid,
        payment_session_id: &str,
    ) -> Result<(), RepositoryError> {
        pre_registrations::ActiveModel {
            id: Set(id),
            payment_session_id: Set(Some(payment_session_id.to_string())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn mark_failed_unless_paid(&self, id: Uuid) -> Result<bool, RepositoryError> {
        // The status predicate keeps a concurrent confirmation from being overwritten
        let result = pre_registrations::Entity::update_many()
            .col_expr(
                pre_registrations::Column::Status,
                Expr::value(PendingStatus::Failed.as_str()),
            )
            .filter(pre_registrations::Column::Id.eq(id))
            .filter(pre_registrations::Column::Status.ne(PendingStatus::Paid.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_payment_session_id(
        &self,
        payment_session_id: &str,
    ) -> Result<Option<PendingRegistration>, RepositoryError> {
        pre_registrations::Entity::find()
            .filter(pre_registrations::Column::PaymentSessionId.eq(payment_session_id))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(pending_from_model)
            .transpose()
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PendingRegistration>, RepositoryError> {
        pre_registrations::Entity::find()
            .filter(pre_registrations::Column::OrderId.eq(order_id))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(pending_from_model)
            .transpose()
    }
}
