use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::{
        fee::FeeSchedule,
        pending_registration::PendingRegistration,
        registration::{RegistrationApplication, RegistrationForm},
    },
    repositories::pending_registration_repository::PendingRegistrationRepository,
    services::payment_gateway::{CURRENCY_INR, CustomerDetails, OrderRequest, PaymentGateway},
};

/// Where the gateway sends the payer and its notifications.
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// used for the return URL when the request carries no origin
    pub site_url: String,
    pub notify_url: Option<String>,
}

#[derive(Debug)]
pub struct PaymentSessionResult {
    pub payment_session_id: String,
    pub order_id: String,
    pub pre_registration_id: Uuid,
    pub amount: Decimal,
}

pub struct CreatePaymentSessionUsecase<P: PendingRegistrationRepository, G: PaymentGateway> {
    pending_repository: P,
    payment_gateway: G,
    fees: FeeSchedule,
    urls: CheckoutUrls,
}

impl<P: PendingRegistrationRepository, G: PaymentGateway> CreatePaymentSessionUsecase<P, G> {
    pub fn new(pending_repository: P, payment_gateway: G, fees: FeeSchedule, urls: CheckoutUrls) -> Self {
        Self {
            pending_repository,
            payment_gateway,
            fees,
            urls,
        }
    }

    pub async fn create_session(
        &self,
        form: RegistrationForm,
        origin: Option<String>,
    ) -> Result<PaymentSessionResult, DomainError>
    where
        P: Send + Sync,
        G: Send + Sync,
    {
        self.create_session_on(form, origin, Utc::now().date_naive())
            .await
    }

    pub async fn create_session_on(
        &self,
        form: RegistrationForm,
        origin: Option<String>,
        today: NaiveDate,
    ) -> Result<PaymentSessionResult, DomainError>
    where
        P: Send + Sync,
        G: Send + Sync,
    {
        let application = RegistrationApplication::from_form(form, today)?;
        let amount = self.fees.fee_for(application.entry.dance_type());

        let now_millis = Utc::now().timestamp_millis();
        let order_id = new_order_id(now_millis);
        let customer = CustomerDetails {
            customer_id: format!("CUST_{now_millis}"),
            name: application.personal.name.clone(),
            email: application.personal.email.clone(),
            phone: application.personal.mobile.clone(),
        };

        // Store the pending row first so every gateway order has a local record
        let pending = PendingRegistration::new(application, amount, order_id.clone());
        self.pending_repository.insert(&pending).await?;

        let order = OrderRequest {
            order_id: order_id.clone(),
            amount,
            currency: CURRENCY_INR.to_string(),
            customer,
            return_url: format!("{}/payment-success", self.return_origin(origin)),
            notify_url: self.urls.notify_url.clone(),
        };

        let session = match self.payment_gateway.create_order(&order).await {
            Ok(session) => session,
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "gateway order creation failed");
                if let Err(mark_err) = self
                    .pending_repository
                    .mark_failed_unless_paid(pending.id())
                    .await
                {
                    error!(pending_id = %pending.id(), error = %mark_err, "could not mark pending registration failed");
                }
                return Err(e.into());
            }
        };

        self.pending_repository
            .attach_payment_session(pending.id(), &session.payment_session_id)
            .await?;

        info!(
            pending_id = %pending.id(),
            order_id = %order_id,
            amount = %amount,
            "payment session created"
        );

        Ok(PaymentSessionResult {
            payment_session_id: session.payment_session_id,
            order_id,
            pre_registration_id: pending.id(),
            amount,
        })
    }

    fn return_origin(&self, origin: Option<String>) -> String {
        origin
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| self.urls.site_url.clone())
            .trim_end_matches('/')
            .to_string()
    }
}

/// `ORDER_<unix millis>_<9 lowercase alphanumerics>`
fn new_order_id(now_millis: i64) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("ORDER_{now_millis}_{suffix}")
}
