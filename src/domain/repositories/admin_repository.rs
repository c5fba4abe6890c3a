use async_trait::async_trait;

use crate::domain::{error::RepositoryError, models::admin::Admin};

#[async_trait]
pub trait AdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError>;
    async fn create(&self, admin: &Admin) -> Result<(), RepositoryError>;
}
