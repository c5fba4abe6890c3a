use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Paid registration visible to the audition review workflow.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// One confirmed row per pending row
    #[sea_orm(unique)]
    pub pre_registration_id: Uuid,
    pub name: String,
    pub date_of_birth: Date,
    pub age: i32,
    pub gender: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub mobile: String,
    #[sea_orm(nullable)]
    pub alternate_mobile: Option<String>,
    pub email: String,
    pub school_college: String,
    #[sea_orm(nullable)]
    pub teacher_name: Option<String>,
    pub dance_type: String,
    pub age_group: String,
    pub theme: String,
    pub category: String,
    #[sea_orm(nullable)]
    pub participant1_name: Option<String>,
    #[sea_orm(nullable)]
    pub participant2_name: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub group_members: Option<Json>,
    #[sea_orm(column_type = "Text")]
    pub video_url: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub payment_id: String,
    pub payment_status: String,
    /// under_review | approved | rejected
    pub audition_status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pre_registrations::Entity",
        from = "Column::PreRegistrationId",
        to = "super::pre_registrations::Column::Id"
    )]
    PreRegistration,
}

impl Related<super::pre_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PreRegistration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
