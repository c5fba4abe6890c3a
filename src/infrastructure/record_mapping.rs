//! Conversions between table rows and domain registrations. Both tables
//! share the application columns, so they go through `ApplicationColumns`.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use entity::{pre_registrations, registrations};
use sea_orm::{ActiveValue::Set, DbErr};

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::{
        confirmed_registration::ConfirmedRegistration,
        pending_registration::PendingRegistration,
        registration::{
            CompetitionEntry, DanceType, Participants, PersonalInfo, RegistrationApplication,
            VideoUrl,
        },
    },
};

pub(crate) fn db_error(e: DbErr) -> RepositoryError {
    match e {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepositoryError::NotFound,
        e => RepositoryError::DatabaseError(e.to_string()),
    }
}

fn corrupt(e: DomainError) -> RepositoryError {
    RepositoryError::DatabaseError(format!("stored registration is invalid: {e}"))
}

pub(crate) fn to_utc(at: DateTime<FixedOffset>) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

pub(crate) struct ApplicationColumns {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub gender: String,
    pub address: String,
    pub mobile: String,
    pub alternate_mobile: Option<String>,
    pub email: String,
    pub school_college: String,
    pub teacher_name: Option<String>,
    pub dance_type: String,
    pub age_group: String,
    pub theme: String,
    pub category: String,
    pub participant1_name: Option<String>,
    pub participant2_name: Option<String>,
    pub group_members: Option<serde_json::Value>,
    pub video_url: String,
}

impl ApplicationColumns {
    pub fn from_application(application: &RegistrationApplication) -> Self {
        let personal = &application.personal;
        let entry = &application.entry;
        let (participant1_name, participant2_name) = entry
            .participants
            .duo_names()
            .map(|(first, second)| (Some(first.to_string()), Some(second.to_string())))
            .unwrap_or((None, None));

        Self {
            name: personal.name.clone(),
            date_of_birth: personal.date_of_birth,
            age: i32::try_from(personal.age).unwrap_or(i32::MAX),
            gender: personal.gender.as_str().to_string(),
            address: personal.address.clone(),
            mobile: personal.mobile.clone(),
            alternate_mobile: personal.alternate_mobile.clone(),
            email: personal.email.clone(),
            school_college: personal.school_college.clone(),
            teacher_name: personal.teacher_name.clone(),
            dance_type: entry.dance_type().as_str().to_string(),
            age_group: entry.age_group.as_str().to_string(),
            theme: entry.theme.as_str().to_string(),
            category: entry.category.as_str().to_string(),
            participant1_name,
            participant2_name,
            group_members: entry
                .participants
                .group_members()
                .map(|members| serde_json::json!(members)),
            video_url: application.video_url.as_str().to_string(),
        }
    }

    pub fn into_application(self) -> Result<RegistrationApplication, RepositoryError> {
        let dance_type: DanceType = self.dance_type.parse().map_err(corrupt)?;
        let group_members: Vec<String> = match self.group_members {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?,
            None => Vec::new(),
        };
        let participants = Participants::new(
            dance_type,
            self.participant1_name,
            self.participant2_name,
            group_members,
        )
        .map_err(corrupt)?;

        let personal = PersonalInfo {
            name: self.name,
            date_of_birth: self.date_of_birth,
            age: u32::try_from(self.age)
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?,
            gender: self.gender.parse().map_err(corrupt)?,
            address: self.address,
            mobile: self.mobile,
            alternate_mobile: self.alternate_mobile,
            email: self.email,
            school_college: self.school_college,
            teacher_name: self.teacher_name,
        };

        Ok(RegistrationApplication {
            personal,
            entry: CompetitionEntry {
                age_group: self.age_group.parse().map_err(corrupt)?,
                theme: self.theme.parse().map_err(corrupt)?,
                category: self.category.parse().map_err(corrupt)?,
                participants,
            },
            video_url: VideoUrl::new(self.video_url).map_err(corrupt)?,
        })
    }
}

impl From<pre_registrations::Model> for ApplicationColumns {
    fn from(m: pre_registrations::Model) -> Self {
        Self {
            name: m.name,
            date_of_birth: m.date_of_birth,
            age: m.age,
            gender: m.gender,
            address: m.address,
            mobile: m.mobile,
            alternate_mobile: m.alternate_mobile,
            email: m.email,
            school_college: m.school_college,
            teacher_name: m.teacher_name,
            dance_type: m.dance_type,
            age_group: m.age_group,
            theme: m.theme,
            category: m.category,
            participant1_name: m.participant1_name,
            participant2_name: m.participant2_name,
            group_members: m.group_members,
            video_url: m.video_url,
        }
    }
}

impl From<registrations::Model> for ApplicationColumns {
    fn from(m: registrations::Model) -> Self {
        Self {
            name: m.name,
            date_of_birth: m.date_of_birth,
            age: m.age,
            gender: m.gender,
            address: m.address,
            mobile: m.mobile,
            alternate_mobile: m.alternate_mobile,
            email: m.email,
            school_college: m.school_college,
            teacher_name: m.teacher_name,
            dance_type: m.dance_type,
            age_group: m.age_group,
            theme: m.theme,
            category: m.category,
            participant1_name: m.participant1_name,
            participant2_name: m.participant2_name,
            group_members: m.group_members,
            video_url: m.video_url,
        }
    }
}

pub(crate) fn pending_row(pending: &PendingRegistration) -> pre_registrations::ActiveModel {
    let c = ApplicationColumns::from_application(pending.application());
    pre_registrations::ActiveModel {
        id: Set(pending.id()),
        name: Set(c.name),
        date_of_birth: Set(c.date_of_birth),
        age: Set(c.age),
        gender: Set(c.gender),
        address: Set(c.address),
        mobile: Set(c.mobile),
        alternate_mobile: Set(c.alternate_mobile),
        email: Set(c.email),
        school_college: Set(c.school_college),
        teacher_name: Set(c.teacher_name),
        dance_type: Set(c.dance_type),
        age_group: Set(c.age_group),
        theme: Set(c.theme),
        category: Set(c.category),
        participant1_name: Set(c.participant1_name),
        participant2_name: Set(c.participant2_name),
        group_members: Set(c.group_members),
        video_url: Set(c.video_url),
        amount: Set(pending.amount()),
        order_id: Set(pending.order_id().to_string()),
        payment_session_id: Set(pending.payment_session_id().map(str::to_string)),
        status: Set(pending.status().as_str().to_string()),
        created_at: Set(pending.created_at().fixed_offset()),
    }
}

pub(crate) fn confirmed_row(confirmed: &ConfirmedRegistration) -> registrations::ActiveModel {
    let c = ApplicationColumns::from_application(confirmed.application());
    registrations::ActiveModel {
        id: Set(confirmed.id()),
        pre_registration_id: Set(confirmed.pending_registration_id()),
        name: Set(c.name),
        date_of_birth: Set(c.date_of_birth),
        age: Set(c.age),
        gender: Set(c.gender),
        address: Set(c.address),
        mobile: Set(c.mobile),
        alternate_mobile: Set(c.alternate_mobile),
        email: Set(c.email),
        school_college: Set(c.school_college),
        teacher_name: Set(c.teacher_name),
        dance_type: Set(c.dance_type),
        age_group: Set(c.age_group),
        theme: Set(c.theme),
        category: Set(c.category),
        participant1_name: Set(c.participant1_name),
        participant2_name: Set(c.participant2_name),
        group_members: Set(c.group_members),
        video_url: Set(c.video_url),
        amount: Set(confirmed.amount()),
        payment_id: Set(confirmed.payment_id().to_string()),
        payment_status: Set(confirmed.payment_status().to_string()),
        audition_status: Set(confirmed.audition_status().as_str().to_string()),
        admin_notes: Set(confirmed.admin_notes().map(str::to_string)),
        created_at: Set(confirmed.created_at().fixed_offset()),
        updated_at: Set(confirmed.updated_at().fixed_offset()),
    }
}

pub(crate) fn pending_from_model(
    model: pre_registrations::Model,
) -> Result<PendingRegistration, RepositoryError> {
    let id = model.id;
    let amount = model.amount;
    let order_id = model.order_id.clone();
    let payment_session_id = model.payment_session_id.clone();
    let status = model.status.parse().map_err(corrupt)?;
    let created_at = to_utc(model.created_at);
    let application = ApplicationColumns::from(model).into_application()?;

    Ok(PendingRegistration::reconstruct(
        id,
        application,
        amount,
        order_id,
        payment_session_id,
        status,
        created_at,
    ))
}

pub(crate) fn confirmed_from_model(
    model: registrations::Model,
) -> Result<ConfirmedRegistration, RepositoryError> {
    let id = model.id;
    let pending_registration_id = model.pre_registration_id;
    let amount = model.amount;
    let payment_id = model.payment_id.clone();
    let payment_status = model.payment_status.clone();
    let audition_status = model.audition_status.parse().map_err(corrupt)?;
    let admin_notes = model.admin_notes.clone();
    let created_at = to_utc(model.created_at);
    let updated_at = to_utc(model.updated_at);
    let application = ApplicationColumns::from(model).into_application()?;

    Ok(ConfirmedRegistration::reconstruct(
        id,
        pending_registration_id,
        application,
        amount,
        payment_id,
        payment_status,
        audition_status,
        admin_notes,
        created_at,
        updated_at,
    ))
}
