use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum PreRegistrations {
    Table,
    Id,
    Amount,
    OrderId,
    PaymentSessionId,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Registrations {
    Table,
    Id,
    PreRegistrationId,
    Amount,
    PaymentId,
    PaymentStatus,
    AuditionStatus,
    AdminNotes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Admins {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
    Role,
    CreatedAt,
}

/// Form columns carried by both registration tables
#[derive(DeriveIden)]
pub enum Application {
    Name,
    DateOfBirth,
    Age,
    Gender,
    Address,
    Mobile,
    AlternateMobile,
    Email,
    SchoolCollege,
    TeacherName,
    DanceType,
    AgeGroup,
    Theme,
    Category,
    #[sea_orm(iden = "participant1_name")]
    Participant1Name,
    #[sea_orm(iden = "participant2_name")]
    Participant2Name,
    GroupMembers,
    VideoUrl,
}
