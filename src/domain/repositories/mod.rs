pub mod admin_repository;
pub mod payment_confirmation_repository;
pub mod pending_registration_repository;
pub mod registration_repository;
