pub mod password_service;
pub mod payment_gateway;
pub mod token_service;
