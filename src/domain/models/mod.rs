pub mod admin;
pub mod confirmed_registration;
pub mod fee;
pub mod pending_registration;
pub mod registration;
