use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{error::DomainError, models::registration::RegistrationApplication};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingStatus {
    Pending,
    Paid,
    Failed,
}

impl PendingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for PendingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            _ => Err(DomainError::InvalidChoice {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// Registration submitted for payment but not yet confirmed by the gateway.
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    id: Uuid,
    application: RegistrationApplication,
    amount: Decimal,
    order_id: String,
    payment_session_id: Option<String>,
    status: PendingStatus,
    created_at: DateTime<Utc>,
}

impl PendingRegistration {
    pub fn new(application: RegistrationApplication, amount: Decimal, order_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            application,
            amount,
            order_id,
            payment_session_id: None,
            status: PendingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn reconstruct(
        id: Uuid,
        application: RegistrationApplication,
        amount: Decimal,
        order_id: String,
        payment_session_id: Option<String>,
        status: PendingStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            application,
            amount,
            order_id,
            payment_session_id,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn application(&self) -> &RegistrationApplication {
        &self.application
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn payment_session_id(&self) -> Option<&str> {
        self.payment_session_id.as_deref()
    }

    pub fn status(&self) -> PendingStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
