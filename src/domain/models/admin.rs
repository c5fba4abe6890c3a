use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Value object representing a hashed password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Create a new HashedPassword from an already hashed string
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl FromStr for AdminRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(DomainError::InvalidChoice {
                field: "role",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Admin {
    id: Uuid,
    email: String,
    name: String,
    password_hash: HashedPassword,
    role: AdminRole,
}

impl Admin {
    pub fn new(
        id: Uuid,
        email: String,
        name: String,
        password_hash: HashedPassword,
        role: AdminRole,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        let email = crate::domain::models::registration::normalize_email(&email)?;

        Ok(Self {
            id,
            email,
            name,
            password_hash,
            role,
        })
    }

    // getters only
    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
    pub fn role(&self) -> AdminRole {
        self.role
    }
}
