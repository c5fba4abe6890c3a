use std::{fmt, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, header::ORIGIN},
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        models::registration::RegistrationForm,
        repositories::{
            payment_confirmation_repository::PaymentConfirmationRepository,
            pending_registration_repository::PendingRegistrationRepository,
        },
        services::payment_gateway::PaymentGateway,
    },
    presentation::error::ApiError,
    usecase::{
        create_payment_session_usecase::CreatePaymentSessionUsecase,
        payment_webhook_usecase::{PaymentEvent, PaymentWebhookUsecase, WebhookOutcome},
    },
};

// Request

/// json for create payment session request
#[derive(Serialize, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(rename = "registrationData", alias = "registration_data")]
    pub registration_data: RegistrationForm,
}

/// Cashfree webhook notification. Only the fields used for confirmation are read.
#[derive(Serialize, Deserialize)]
pub struct WebhookNotification {
    pub data: WebhookData,
}

#[derive(Serialize, Deserialize)]
pub struct WebhookData {
    pub order: WebhookOrder,
    pub payment: WebhookPayment,
}

#[derive(Serialize, Deserialize)]
pub struct WebhookOrder {
    pub order_id: String,
}

#[derive(Serialize, Deserialize)]
pub struct WebhookPayment {
    pub payment_status: String,
    pub cf_payment_id: GatewayPaymentId,
    #[serde(default)]
    pub payment_session_id: Option<String>,
}

/// Cashfree sends payment ids as numbers on some API versions and strings on others.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum GatewayPaymentId {
    Number(u64),
    Text(String),
}

impl fmt::Display for GatewayPaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<WebhookNotification> for PaymentEvent {
    fn from(notification: WebhookNotification) -> Self {
        let WebhookData { order, payment } = notification.data;
        Self {
            order_id: order.order_id,
            payment_status: payment.payment_status,
            payment_id: payment.cf_payment_id.to_string(),
            payment_session_id: payment.payment_session_id,
        }
    }
}

// Response

/// json for create payment session response
#[derive(Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub success: bool,
    pub payment_session_id: String,
    pub order_id: String,
    pub pre_registration_id: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Serialize, Deserialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub outcome: String,
}

/* Router Function and Handler Function */

/// Payment routes, nested under `/payments` by the main router.
pub fn create_payment_router<
    P: PendingRegistrationRepository + Send + Sync + 'static + Clone,
    G: PaymentGateway + Send + Sync + 'static + Clone,
    C: PaymentConfirmationRepository + Send + Sync + 'static + Clone,
>(
    session_service: CreatePaymentSessionUsecase<P, G>,
    webhook_service: PaymentWebhookUsecase<P, C>,
) -> Router {
    let state = AppState {
        session_service: Arc::new(session_service),
        webhook_service: Arc::new(webhook_service),
    };

    Router::new()
        .route("/session", post(create_session::<P, G, C>))
        .route("/webhook", post(payment_webhook::<P, G, C>))
        .with_state(state)
}

pub struct AppState<P, G, C>
where
    P: PendingRegistrationRepository,
    G: PaymentGateway,
    C: PaymentConfirmationRepository,
{
    pub session_service: Arc<CreatePaymentSessionUsecase<P, G>>,
    pub webhook_service: Arc<PaymentWebhookUsecase<P, C>>,
}

impl<P, G, C> Clone for AppState<P, G, C>
where
    P: PendingRegistrationRepository,
    G: PaymentGateway,
    C: PaymentConfirmationRepository,
{
    fn clone(&self) -> Self {
        Self {
            session_service: Arc::clone(&self.session_service),
            webhook_service: Arc::clone(&self.webhook_service),
        }
    }
}

// handler function

/// handler function for creating a pre-registration and its gateway order
async fn create_session<
    P: PendingRegistrationRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
    C: PaymentConfirmationRepository + Send + Sync,
>(
    State(state): State<AppState<P, G, C>>,
    headers: HeaderMap,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    let origin = headers
        .get(ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let result = state
        .session_service
        .create_session(payload.registration_data, origin)
        .await?;

    Ok(Json(CreateSessionResponse {
        success: true,
        payment_session_id: result.payment_session_id,
        order_id: result.order_id,
        pre_registration_id: result.pre_registration_id,
        amount: result.amount,
    }))
}

/// handler function for gateway payment notifications
async fn payment_webhook<
    P: PendingRegistrationRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
    C: PaymentConfirmationRepository + Send + Sync,
>(
    State(state): State<AppState<P, G, C>>,
    Json(notification): Json<WebhookNotification>,
) -> Result<Json<WebhookResponse>, ApiError> {
    let event = PaymentEvent::from(notification);
    debug!(order_id = %event.order_id, status = %event.payment_status, "payment webhook received");

    let outcome = match state.webhook_service.handle(event).await? {
        WebhookOutcome::Confirmed(_) => "confirmed",
        WebhookOutcome::AlreadyConfirmed(_) => "already_confirmed",
        WebhookOutcome::MarkedFailed => "failed",
        WebhookOutcome::Ignored => "ignored",
    };

    Ok(Json(WebhookResponse {
        success: true,
        outcome: outcome.to_string(),
    }))
}
