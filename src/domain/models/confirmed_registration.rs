use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::{
        pending_registration::PendingRegistration,
        registration::{RegistrationApplication, VideoUrl},
    },
};

/// Payment status recorded on every confirmed registration.
pub const PAYMENT_STATUS_PAID: &str = "paid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditionStatus {
    UnderReview,
    Approved,
    Rejected,
}

impl AuditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for AuditionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under_review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidChoice {
                field: "audition status",
                value: s.to_string(),
            }),
        }
    }
}

/// Outcome an admin can assign to an audition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditionDecision {
    Approved,
    Rejected,
}

impl From<AuditionDecision> for AuditionStatus {
    fn from(decision: AuditionDecision) -> Self {
        match decision {
            AuditionDecision::Approved => Self::Approved,
            AuditionDecision::Rejected => Self::Rejected,
        }
    }
}

/// Paid registration. Only built from a pending registration whose payment succeeded.
#[derive(Debug, Clone)]
pub struct ConfirmedRegistration {
    id: Uuid,
    pending_registration_id: Uuid,
    application: RegistrationApplication,
    amount: Decimal,
    payment_id: String,
    payment_status: String,
    audition_status: AuditionStatus,
    admin_notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ConfirmedRegistration {
    pub fn from_pending(pending: &PendingRegistration, payment_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            pending_registration_id: pending.id(),
            application: pending.application().clone(),
            amount: pending.amount(),
            payment_id,
            payment_status: PAYMENT_STATUS_PAID.to_string(),
            audition_status: AuditionStatus::UnderReview,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: Uuid,
        pending_registration_id: Uuid,
        application: RegistrationApplication,
        amount: Decimal,
        payment_id: String,
        payment_status: String,
        audition_status: AuditionStatus,
        admin_notes: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
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
        }
    }

    /// Record an admin decision. Blank notes are stored as none.
    pub fn review(&mut self, decision: AuditionDecision, notes: Option<String>) {
        self.audition_status = decision.into();
        self.admin_notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.updated_at = Utc::now();
    }

    pub fn replace_video(&mut self, video_url: VideoUrl) {
        self.application.video_url = video_url;
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pending_registration_id(&self) -> Uuid {
        self.pending_registration_id
    }

    pub fn application(&self) -> &RegistrationApplication {
        &self.application
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    pub fn payment_status(&self) -> &str {
        &self.payment_status
    }

    pub fn audition_status(&self) -> AuditionStatus {
        self.audition_status
    }

    pub fn admin_notes(&self) -> Option<&str> {
        self.admin_notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
