use async_trait::async_trait;
use entity::registrations;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::{
    domain::{
        error::RepositoryError, models::confirmed_registration::ConfirmedRegistration,
        repositories::registration_repository::RegistrationRepository,
    },
    infrastructure::record_mapping::{confirmed_from_model, db_error},
};

#[derive(Clone)]
pub struct PostgresRegistrationRepository {
    db: DatabaseConnection,
}

impl PostgresRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn latest_where(
        &self,
        column: registrations::Column,
        value: &str,
    ) -> Result<Option<ConfirmedRegistration>, RepositoryError> {
        registrations::Entity::find()
            .filter(column.eq(value))
            .order_by_desc(registrations::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(confirmed_from_model)
            .transpose()
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ConfirmedRegistration>, RepositoryError> {
        registrations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(confirmed_from_model)
            .transpose()
    }

    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ConfirmedRegistration>, RepositoryError> {
        self.latest_where(registrations::Column::Email, email).await
    }

    async fn find_latest_by_mobile(
        &self,
        mobile: &str,
    ) -> Result<Option<ConfirmedRegistration>, RepositoryError> {
        self.latest_where(registrations::Column::Mobile, mobile).await
    }

    async fn list_newest_first(&self) -> Result<Vec<ConfirmedRegistration>, RepositoryError> {
        registrations::Entity::find()
            .order_by_desc(registrations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(confirmed_from_model)
            .collect()
    }

    async fn save_review(&self, registration: &ConfirmedRegistration) -> Result<(), RepositoryError> {
        registrations::ActiveModel {
            id: Set(registration.id()),
            audition_status: Set(registration.audition_status().as_str().to_string()),
            admin_notes: Set(registration.admin_notes().map(str::to_string)),
            updated_at: Set(registration.updated_at().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn save_video(&self, registration: &ConfirmedRegistration) -> Result<(), RepositoryError> {
        registrations::ActiveModel {
            id: Set(registration.id()),
            video_url: Set(registration.application().video_url.as_str().to_string()),
            updated_at: Set(registration.updated_at().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_error)?;
        Ok(())
    }
}
