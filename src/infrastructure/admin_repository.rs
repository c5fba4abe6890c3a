use async_trait::async_trait;
use chrono::Utc;
use entity::admins;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    domain::{
        error::RepositoryError,
        models::admin::{Admin, AdminRole, HashedPassword},
        repositories::admin_repository::AdminRepository,
    },
    infrastructure::record_mapping::db_error,
};

#[derive(Clone)]
pub struct PostgresAdminRepository {
    db: DatabaseConnection,
}

impl PostgresAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        let admin = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        match admin {
            Some(model) => {
                let role = model
                    .role
                    .parse::<AdminRole>()
                    .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
                let admin = Admin::new(
                    model.id,
                    model.email,
                    model.name,
                    HashedPassword::new(model.password_hash),
                    role,
                )
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

                Ok(Some(admin))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, admin: &Admin) -> Result<(), RepositoryError> {
        let model = admins::ActiveModel {
            id: Set(admin.id()),
            email: Set(admin.email().to_string()),
            name: Set(admin.name().to_string()),
            password_hash: Set(admin.password_hash().as_str().to_string()),
            role: Set(admin.role().as_str().to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        };
        admins::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
