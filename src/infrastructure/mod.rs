pub mod admin_repository;
pub mod argon2_password_hasher;
pub mod cashfree_gateway;
pub mod jwt_token_service;
pub mod payment_confirmation_repository;
pub mod pending_registration_repository;
mod record_mapping;
pub mod registration_repository;
