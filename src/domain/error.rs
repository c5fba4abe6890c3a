use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Please fill in the required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {value}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid date of birth")]
    InvalidDateOfBirth,

    #[error("Please enter names for both participants")]
    DuoParticipantsRequired,

    #[error("Group must have between 4 and 12 members (got {0})")]
    GroupSize(usize),

    #[error("Invalid video URL")]
    InvalidVideoUrl,

    #[error("Please enter either email, mobile number or registration id")]
    MissingLookupKey,

    #[error("Registration not found")]
    RegistrationNotFound,

    #[error("Pre-registration not found")]
    PendingRegistrationNotFound,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Weak password (minimum 8 characters required)")]
    WeakPassword,
}

impl DomainError {
    /// Errors caused by the submitted input rather than by the system.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_)
                | Self::InvalidChoice { .. }
                | Self::InvalidEmail
                | Self::InvalidDateOfBirth
                | Self::DuoParticipantsRequired
                | Self::GroupSize(_)
                | Self::InvalidVideoUrl
                | Self::MissingLookupKey
                | Self::WeakPassword
        )
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("order rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}
