pub use sea_orm_migration::prelude::*;

mod iden;
mod m20250701_000001_create_registration_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250701_000001_create_registration_tables::Migration)]
    }
}
