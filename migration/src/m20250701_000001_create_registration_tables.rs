use sea_orm_migration::prelude::*;

use crate::iden::{Admins, Application, PreRegistrations, Registrations};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(pre_registrations_table()).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pre_registrations_payment_session_id")
                    .table(PreRegistrations::Table)
                    .col(PreRegistrations::PaymentSessionId)
                    .to_owned(),
            )
            .await?;

        manager.create_table(registrations_table()).await?;
        for (name, column) in [
            ("idx_registrations_email", Application::Email),
            ("idx_registrations_mobile", Application::Mobile),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Registrations::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager.create_table(admins_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admins::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Registrations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PreRegistrations::Table).if_exists().to_owned())
            .await
    }
}

fn application_columns(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(ColumnDef::new(Application::Name).string().not_null())
        .col(ColumnDef::new(Application::DateOfBirth).date().not_null())
        .col(ColumnDef::new(Application::Age).integer().not_null())
        .col(ColumnDef::new(Application::Gender).string().not_null())
        .col(ColumnDef::new(Application::Address).text().not_null())
        .col(ColumnDef::new(Application::Mobile).string().not_null())
        .col(ColumnDef::new(Application::AlternateMobile).string().null())
        .col(ColumnDef::new(Application::Email).string().not_null())
        .col(ColumnDef::new(Application::SchoolCollege).string().not_null())
        .col(ColumnDef::new(Application::TeacherName).string().null())
        .col(
            ColumnDef::new(Application::DanceType)
                .string()
                .not_null()
                .check(Expr::col(Application::DanceType).is_in(["solo", "duo", "group"])),
        )
        .col(ColumnDef::new(Application::AgeGroup).string().not_null())
        .col(ColumnDef::new(Application::Theme).string().not_null())
        .col(ColumnDef::new(Application::Category).string().not_null())
        .col(ColumnDef::new(Application::Participant1Name).string().null())
        .col(ColumnDef::new(Application::Participant2Name).string().null())
        .col(ColumnDef::new(Application::GroupMembers).json_binary().null())
        .col(ColumnDef::new(Application::VideoUrl).text().not_null())
}

pub(crate) fn pre_registrations_table() -> TableCreateStatement {
    let mut table = Table::create();
    table.table(PreRegistrations::Table).if_not_exists().col(
        ColumnDef::new(PreRegistrations::Id)
            .uuid()
            .not_null()
            .primary_key(),
    );
    application_columns(&mut table)
        .col(
            ColumnDef::new(PreRegistrations::Amount)
                .decimal_len(10, 2)
                .not_null(),
        )
        .col(
            ColumnDef::new(PreRegistrations::OrderId)
                .string()
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(PreRegistrations::PaymentSessionId).string().null())
        .col(
            ColumnDef::new(PreRegistrations::Status)
                .string()
                .not_null()
                .default("pending")
                .check(Expr::col(PreRegistrations::Status).is_in(["pending", "paid", "failed"])),
        )
        .col(
            ColumnDef::new(PreRegistrations::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

/// The unique `pre_registration_id` is what makes payment confirmation idempotent.
pub(crate) fn registrations_table() -> TableCreateStatement {
    let mut table = Table::create();
    table
        .table(Registrations::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Registrations::Id)
                .uuid()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Registrations::PreRegistrationId)
                .uuid()
                .not_null()
                .unique_key(),
        );
    application_columns(&mut table)
        .col(
            ColumnDef::new(Registrations::Amount)
                .decimal_len(10, 2)
                .not_null(),
        )
        .col(ColumnDef::new(Registrations::PaymentId).string().not_null())
        .col(ColumnDef::new(Registrations::PaymentStatus).string().not_null())
        .col(
            ColumnDef::new(Registrations::AuditionStatus)
                .string()
                .not_null()
                .default("under_review")
                .check(
                    Expr::col(Registrations::AuditionStatus)
                        .is_in(["under_review", "approved", "rejected"]),
                ),
        )
        .col(ColumnDef::new(Registrations::AdminNotes).text().null())
        .col(
            ColumnDef::new(Registrations::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Registrations::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_registrations_pre_registration_id")
                .from(Registrations::Table, Registrations::PreRegistrationId)
                .to(PreRegistrations::Table, PreRegistrations::Id),
        )
        .to_owned()
}

pub(crate) fn admins_table() -> TableCreateStatement {
    Table::create()
        .table(Admins::Table)
        .if_not_exists()
        .col(ColumnDef::new(Admins::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Admins::Email).string().not_null().unique_key())
        .col(ColumnDef::new(Admins::Name).string().not_null())
        .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
        .col(
            ColumnDef::new(Admins::Role)
                .string()
                .not_null()
                .default("admin")
                .check(Expr::col(Admins::Role).is_in(["admin", "super_admin"])),
        )
        .col(
            ColumnDef::new(Admins::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_table_constraints() {
        let sql = pre_registrations_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""order_id" varchar NOT NULL UNIQUE"#), "{sql}");
        assert!(sql.contains("'pending', 'paid', 'failed'"), "{sql}");
        assert!(sql.contains("'solo', 'duo', 'group'"), "{sql}");
        assert!(sql.contains(r#""participant1_name""#), "{sql}");
    }

    #[test]
    fn test_registrations_table_links_pending() {
        let sql = registrations_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""pre_registration_id" uuid NOT NULL UNIQUE"#), "{sql}");
        assert!(sql.contains(r#"REFERENCES "pre_registrations" ("id")"#), "{sql}");
        assert!(sql.contains("'under_review', 'approved', 'rejected'"), "{sql}");
    }

    #[test]
    fn test_admin_roles_checked() {
        let sql = admins_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""email" varchar NOT NULL UNIQUE"#), "{sql}");
        assert!(sql.contains("'admin', 'super_admin'"), "{sql}");
    }
}
