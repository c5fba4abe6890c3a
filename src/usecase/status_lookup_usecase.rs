use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    error::DomainError, models::confirmed_registration::ConfirmedRegistration,
    repositories::registration_repository::RegistrationRepository,
};

/// One key to look a registration up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusQuery {
    Email(String),
    Mobile(String),
    Id(String),
}

impl StatusQuery {
    /// Email takes precedence over mobile, mobile over id. Blank values are ignored.
    pub fn from_parts(
        email: Option<String>,
        mobile: Option<String>,
        id: Option<String>,
    ) -> Result<Self, DomainError> {
        let present = |v: Option<String>| v.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(email) = present(email) {
            Ok(Self::Email(email.to_lowercase()))
        } else if let Some(mobile) = present(mobile) {
            Ok(Self::Mobile(mobile))
        } else if let Some(id) = present(id) {
            Ok(Self::Id(id))
        } else {
            Err(DomainError::MissingLookupKey)
        }
    }
}

pub struct StatusLookupUsecase<R: RegistrationRepository> {
    registration_repository: R,
}

impl<R: RegistrationRepository> StatusLookupUsecase<R> {
    pub fn new(registration_repository: R) -> Self {
        Self {
            registration_repository,
        }
    }

    /// `Ok(None)` when nothing matches, including ids that are not UUIDs.
    pub async fn lookup(&self, query: StatusQuery) -> Result<Option<ConfirmedRegistration>, DomainError>
    where
        R: Send + Sync,
    {
        let found = match &query {
            StatusQuery::Email(email) => {
                self.registration_repository
                    .find_latest_by_email(&email.to_lowercase())
                    .await?
            }
            StatusQuery::Mobile(mobile) => {
                self.registration_repository
                    .find_latest_by_mobile(mobile)
                    .await?
            }
            StatusQuery::Id(id) => match Uuid::parse_str(id) {
                Ok(id) => self.registration_repository.find_by_id(id).await?,
                Err(_) => None,
            },
        };

        if found.is_none() {
            debug!(?query, "no registration matched");
        }
        Ok(found)
    }
}
