use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::domain::error::{DomainError, RepositoryError};

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            DomainError::AuthenticationFailed | DomainError::InvalidToken => StatusCode::UNAUTHORIZED,
            DomainError::RegistrationNotFound
            | DomainError::PendingRegistrationNotFound
            | DomainError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            DomainError::Gateway(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self.0, "request failed");
            // internal details stay in the log
            match status {
                StatusCode::BAD_GATEWAY => "Payment gateway unavailable".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::domain::error::GatewayError;

    #[rstest]
    #[case(DomainError::GroupSize(3), StatusCode::BAD_REQUEST)]
    #[case(DomainError::InvalidChoice { field: "theme", value: "x".into() }, StatusCode::BAD_REQUEST)]
    #[case(DomainError::InvalidToken, StatusCode::UNAUTHORIZED)]
    #[case(DomainError::RegistrationNotFound, StatusCode::NOT_FOUND)]
    #[case(DomainError::Gateway(GatewayError::Request("timeout".into())), StatusCode::BAD_GATEWAY)]
    #[case(DomainError::Repository(RepositoryError::DatabaseError("down".into())), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_mapping(#[case] error: DomainError, #[case] expected: StatusCode) {
        assert_eq!(ApiError(error).status(), expected);
    }
}
