use uuid::Uuid;

use crate::domain::error::DomainError;

pub mod admin_handler;
pub mod payment_handler;
pub mod registration_handler;

/// Path ids are taken as strings so a malformed id gets the same json 404
/// as an unknown one instead of axum's plain-text rejection.
pub(crate) fn registration_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::RegistrationNotFound)
}
