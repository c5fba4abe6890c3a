use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::{
    admin::{Admin, AdminRole},
    confirmed_registration::{AuditionStatus, ConfirmedRegistration},
    registration::{AgeGroup, DanceCategory, DanceType, Gender, Theme},
};

/// json for a confirmed registration, shaped like the registrations table row
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationView {
    pub id: Uuid,
    pub pre_registration_id: Uuid,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub age: u32,
    pub gender: Gender,
    pub address: String,
    pub mobile: String,
    pub alternate_mobile: Option<String>,
    pub email: String,
    pub school_college: String,
    pub teacher_name: Option<String>,
    pub dance_type: DanceType,
    pub age_group: AgeGroup,
    pub theme: Theme,
    pub category: DanceCategory,
    pub participant1_name: Option<String>,
    pub participant2_name: Option<String>,
    pub group_members: Option<Vec<String>>,
    pub participant_count: usize,
    pub video_url: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub payment_id: String,
    pub payment_status: String,
    pub audition_status: AuditionStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ConfirmedRegistration> for RegistrationView {
    fn from(registration: &ConfirmedRegistration) -> Self {
        let application = registration.application();
        let personal = &application.personal;
        let participants = &application.entry.participants;
        let duo = participants.duo_names();

        Self {
            id: registration.id(),
            pre_registration_id: registration.pending_registration_id(),
            name: personal.name.clone(),
            date_of_birth: personal.date_of_birth,
            age: personal.age,
            gender: personal.gender,
            address: personal.address.clone(),
            mobile: personal.mobile.clone(),
            alternate_mobile: personal.alternate_mobile.clone(),
            email: personal.email.clone(),
            school_college: personal.school_college.clone(),
            teacher_name: personal.teacher_name.clone(),
            dance_type: participants.dance_type(),
            age_group: application.entry.age_group,
            theme: application.entry.theme,
            category: application.entry.category,
            participant1_name: duo.map(|(first, _)| first.to_string()),
            participant2_name: duo.map(|(_, second)| second.to_string()),
            group_members: participants.group_members().map(<[String]>::to_vec),
            participant_count: participants.head_count(),
            video_url: application.video_url.as_str().to_string(),
            amount: registration.amount(),
            payment_id: registration.payment_id().to_string(),
            payment_status: registration.payment_status().to_string(),
            audition_status: registration.audition_status(),
            admin_notes: registration.admin_notes().map(str::to_string),
            created_at: registration.created_at(),
            updated_at: registration.updated_at(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
}

impl From<&Admin> for AdminInfo {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id(),
            email: admin.email().to_string(),
            name: admin.name().to_string(),
            role: admin.role(),
        }
    }
}
