use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{
    error::GatewayError,
    services::payment_gateway::{OrderRequest, PaymentGateway, PaymentSession},
};

pub const SANDBOX_BASE_URL: &str = "https://sandbox.cashfree.com/pg";
pub const DEFAULT_API_VERSION: &str = "2023-08-01";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct CashfreeCredentials {
    pub app_id: String,
    pub secret_key: String,
    pub base_url: String,
    pub api_version: String,
}

/// Cashfree PG order API client.
#[derive(Clone)]
pub struct CashfreeGateway {
    client: reqwest::Client,
    credentials: CashfreeCredentials,
}

impl CashfreeGateway {
    pub fn new(credentials: CashfreeCredentials) -> Result<Self, GatewayError> {
        let client = reqwest::ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        Ok(Self {
            client,
            credentials,
        })
    }

    fn orders_url(&self) -> String {
        format!("{}/orders", self.credentials.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    order_id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    order_amount: Decimal,
    order_currency: &'a str,
    customer_details: CustomerDetailsBody<'a>,
    order_meta: OrderMetaBody<'a>,
}

#[derive(Debug, Serialize)]
struct CustomerDetailsBody<'a> {
    customer_id: &'a str,
    customer_name: &'a str,
    customer_email: &'a str,
    customer_phone: &'a str,
}

#[derive(Debug, Serialize)]
struct OrderMetaBody<'a> {
    return_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notify_url: Option<&'a str>,
}

impl<'a> From<&'a OrderRequest> for CreateOrderBody<'a> {
    fn from(order: &'a OrderRequest) -> Self {
        Self {
            order_id: &order.order_id,
            order_amount: order.amount,
            order_currency: &order.currency,
            customer_details: CustomerDetailsBody {
                customer_id: &order.customer.customer_id,
                customer_name: &order.customer.name,
                customer_email: &order.customer.email,
                customer_phone: &order.customer.phone,
            },
            order_meta: OrderMetaBody {
                return_url: &order.return_url,
                notify_url: order.notify_url.as_deref(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    order_id: String,
    payment_session_id: String,
}

impl CreateOrderResponse {
    /// The session is only usable for the order we asked for.
    fn into_session(self, requested_order_id: &str) -> Result<PaymentSession, GatewayError> {
        if self.order_id != requested_order_id {
            warn!(
                requested = requested_order_id,
                returned = %self.order_id,
                "cashfree returned a different order"
            );
            return Err(GatewayError::InvalidResponse(format!(
                "order id mismatch: expected {requested_order_id}, got {}",
                self.order_id
            )));
        }
        Ok(PaymentSession {
            payment_session_id: self.payment_session_id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    code: Option<String>,
}

#[async_trait]
impl PaymentGateway for CashfreeGateway {
    async fn create_order(&self, order: &OrderRequest) -> Result<PaymentSession, GatewayError> {
        debug!(order_id = %order.order_id, "creating cashfree order");

        let response = self
            .client
            .post(self.orders_url())
            .header("x-api-version", &self.credentials.api_version)
            .header("x-client-id", &self.credentials.app_id)
            .header("x-client-secret", &self.credentials.secret_key)
            .json(&CreateOrderBody::from(order))
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| match (e.code, e.message) {
                    (Some(code), Some(message)) => Some(format!("{code}: {message}")),
                    (None, Some(message)) => Some(message),
                    (Some(code), None) => Some(code),
                    (None, None) => None,
                })
                .unwrap_or(body);
            warn!(order_id = %order.order_id, status = status.as_u16(), %message, "cashfree rejected order");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreateOrderResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        created.into_session(&order.order_id)
    }
}
