use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::error::GatewayError;

pub const CURRENCY_INR: &str = "INR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub order_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub customer: CustomerDetails,
    /// where the checkout widget sends the payer afterwards
    pub return_url: String,
    /// webhook endpoint for payment notifications
    pub notify_url: Option<String>,
}

/// Checkout session handed back by the gateway for the requested order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    pub payment_session_id: String,
}

#[async_trait]
pub trait PaymentGateway {
    async fn create_order(&self, order: &OrderRequest) -> Result<PaymentSession, GatewayError>;
}
