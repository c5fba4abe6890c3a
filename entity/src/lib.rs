//! sea-orm table models for the registration database.

pub mod admins;
pub mod pre_registrations;
pub mod registrations;

pub mod prelude {
    pub use super::admins::Entity as Admins;
    pub use super::pre_registrations::Entity as PreRegistrations;
    pub use super::registrations::Entity as Registrations;
}
