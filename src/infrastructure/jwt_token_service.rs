use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::admin::Admin,
    services::token_service::{AdminClaims, Token, TokenGenerator, TokenVerifier},
};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,   // Subject (admin ID)
    email: String, // Admin email
    role: String,  // admin | super_admin
    exp: i64,      // Expiration time
    iat: i64,      // Issued at
}

/// HS256 admin session tokens.
#[derive(Clone)]
pub struct JwtTokenService {
    secret: String,
    expiration_hours: i64,
}

impl JwtTokenService {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_hours: 24, // 24h
        }
    }

    pub fn with_expiration(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret,
            expiration_hours,
        }
    }
}

impl TokenGenerator for JwtTokenService {
    fn generate(&self, admin: &Admin) -> Result<Token, DomainError> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: admin.id().to_string(),
            email: admin.email().to_string(),
            role: admin.role().as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            debug!(error = %e, "failed to encode token");
            DomainError::InvalidToken
        })
    }
}

impl TokenVerifier for JwtTokenService {
    fn verify(&self, token: &str) -> Result<AdminClaims, DomainError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            debug!(error = %e, "rejected admin token");
            DomainError::InvalidToken
        })?;

        let claims = data.claims;
        Ok(AdminClaims {
            admin_id: Uuid::parse_str(&claims.sub).map_err(|_| DomainError::InvalidToken)?,
            email: claims.email,
            role: claims.role.parse().map_err(|_| DomainError::InvalidToken)?,
        })
    }
}
