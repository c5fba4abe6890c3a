use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{
    domain::{error::DomainError, services::token_service::TokenVerifier},
    presentation::error::ApiError,
};

/// Middleware guarding admin routes. Puts the verified `AdminClaims` into
/// the request extensions.
pub async fn require_admin<V: TokenVerifier + Clone + 'static>(
    State(verifier): State<V>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            debug!(path = %request.uri().path(), "missing bearer token");
            DomainError::InvalidToken
        })?;

    let claims = verifier.verify(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
