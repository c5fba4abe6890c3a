use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    domain::models::fee::FeeSchedule,
    infrastructure::cashfree_gateway::{CashfreeCredentials, DEFAULT_API_VERSION, SANDBOX_BASE_URL},
    usecase::create_payment_session_usecase::CheckoutUrls,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is required")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// First admin account, created at start-up when absent.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub sql_logging: bool,
    pub cashfree: CashfreeCredentials,
    pub checkout: CheckoutUrls,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub fees: FeeSchedule,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Config {
    /// Read the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);
        let defaults = FeeSchedule::default();

        Ok(Self {
            port: env.try_load("PORT", "8080")?,
            database_url: env.required("DATABASE_URL")?,
            db_max_connections: env.try_load("DB_MAX_CONNECTIONS", "10")?,
            sql_logging: env.try_load("SQL_LOGGING", "false")?,
            cashfree: CashfreeCredentials {
                app_id: env.required("CASHFREE_APP_ID")?,
                secret_key: env.required("CASHFREE_SECRET_KEY")?,
                base_url: env.try_load("CASHFREE_BASE_URL", SANDBOX_BASE_URL)?,
                api_version: env.try_load("CASHFREE_API_VERSION", DEFAULT_API_VERSION)?,
            },
            checkout: CheckoutUrls {
                site_url: env.try_load("PUBLIC_SITE_URL", "http://localhost:5173")?,
                notify_url: env.optional("WEBHOOK_URL"),
            },
            jwt_secret: env.required("JWT_SECRET")?,
            jwt_expiration_hours: env.try_load("JWT_EXPIRATION_HOURS", "24")?,
            fees: FeeSchedule::new(
                env.try_load("FEE_SOLO", &defaults.solo.to_string())?,
                env.try_load("FEE_DUO", &defaults.duo.to_string())?,
                env.try_load("FEE_GROUP", &defaults.group.to_string())?,
            ),
            bootstrap_admin: env.bootstrap_admin(),
        })
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Set and non-blank.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn try_load<T: FromStr>(&self, key: &'static str, default: &str) -> Result<T, ConfigError>
    where
        T::Err: Display,
    {
        self.optional(key)
            .unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
            .parse()
            .map_err(|e: T::Err| {
                warn!("Invalid {key} value: {e}");
                ConfigError::Invalid {
                    key,
                    reason: e.to_string(),
                }
            })
    }

    fn bootstrap_admin(&self) -> Option<BootstrapAdmin> {
        match (
            self.optional("ADMIN_BOOTSTRAP_EMAIL"),
            self.optional("ADMIN_BOOTSTRAP_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                email,
                name: self
                    .optional("ADMIN_BOOTSTRAP_NAME")
                    .unwrap_or_else(|| "Administrator".to_string()),
                password,
            }),
            (None, None) => None,
            _ => {
                warn!("ADMIN_BOOTSTRAP_EMAIL and ADMIN_BOOTSTRAP_PASSWORD must be set together, skipping bootstrap");
                None
            }
        }
    }
}
