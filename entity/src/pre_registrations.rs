use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Submitted registration awaiting payment confirmation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pre_registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
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
    /// JSON array of member names, group entries only
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub group_members: Option<Json>,
    #[sea_orm(column_type = "Text")]
    pub video_url: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    #[sea_orm(unique)]
    pub order_id: String,
    #[sea_orm(nullable, indexed)]
    pub payment_session_id: Option<String>,
    /// pending | paid | failed
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::registrations::Entity")]
    Registration,
}

impl Related<super::registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
