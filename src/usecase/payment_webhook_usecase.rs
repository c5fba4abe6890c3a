use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::{
        confirmed_registration::ConfirmedRegistration,
        pending_registration::{PendingRegistration, PendingStatus},
    },
    repositories::{
        payment_confirmation_repository::{ConfirmationOutcome, PaymentConfirmationRepository},
        pending_registration_repository::PendingRegistrationRepository,
    },
};

/// Gateway payment status that confirms a registration.
pub const PAYMENT_SUCCESS: &str = "SUCCESS";

/// Payment notification as reported by the gateway.
#[derive(Debug, Clone)]
pub struct PaymentEvent {
    pub order_id: String,
    pub payment_status: String,
    pub payment_id: String,
    pub payment_session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A confirmed registration was created with this id.
    Confirmed(Uuid),
    /// Redelivered success; the existing confirmed registration is kept.
    AlreadyConfirmed(Uuid),
    MarkedFailed,
    /// Failure reported for a registration that is already paid.
    Ignored,
}

pub struct PaymentWebhookUsecase<P: PendingRegistrationRepository, C: PaymentConfirmationRepository> {
    pending_repository: P,
    confirmation_repository: C,
}

impl<P: PendingRegistrationRepository, C: PaymentConfirmationRepository> PaymentWebhookUsecase<P, C> {
    pub fn new(pending_repository: P, confirmation_repository: C) -> Self {
        Self {
            pending_repository,
            confirmation_repository,
        }
    }

    pub async fn handle(&self, event: PaymentEvent) -> Result<WebhookOutcome, DomainError>
    where
        P: Send + Sync,
        C: Send + Sync,
    {
        let pending = self.find_pending(&event).await?;

        if event.payment_status == PAYMENT_SUCCESS {
            let confirmed = ConfirmedRegistration::from_pending(&pending, event.payment_id);
            let outcome = match self.confirmation_repository.confirm(&confirmed).await? {
                ConfirmationOutcome::Created => WebhookOutcome::Confirmed(confirmed.id()),
                ConfirmationOutcome::AlreadyConfirmed(id) => {
                    info!(pending_id = %pending.id(), registration_id = %id, "duplicate success webhook ignored");
                    WebhookOutcome::AlreadyConfirmed(id)
                }
            };
            info!(
                pending_id = %pending.id(),
                email = %pending.application().personal.email,
                "payment successful"
            );
            return Ok(outcome);
        }

        if pending.status() == PendingStatus::Paid {
            warn!(
                pending_id = %pending.id(),
                payment_status = %event.payment_status,
                "payment already confirmed, ignoring status"
            );
            return Ok(WebhookOutcome::Ignored);
        }

        // The snapshot may be stale; the write itself refuses to touch a paid row
        if !self
            .pending_repository
            .mark_failed_unless_paid(pending.id())
            .await?
        {
            warn!(
                pending_id = %pending.id(),
                payment_status = %event.payment_status,
                "payment confirmed concurrently, ignoring status"
            );
            return Ok(WebhookOutcome::Ignored);
        }
        info!(
            pending_id = %pending.id(),
            payment_status = %event.payment_status,
            "payment failed"
        );
        Ok(WebhookOutcome::MarkedFailed)
    }

    /// Session id first, then order id.
    async fn find_pending(&self, event: &PaymentEvent) -> Result<PendingRegistration, DomainError>
    where
        P: Send + Sync,
    {
        if let Some(session_id) = event.payment_session_id.as_deref() {
            if let Some(pending) = self
                .pending_repository
                .find_by_payment_session_id(session_id)
                .await?
            {
                return Ok(pending);
            }
        }

        self.pending_repository
            .find_by_order_id(&event.order_id)
            .await?
            .ok_or_else(|| {
                warn!(order_id = %event.order_id, "pre-registration not found");
                DomainError::PendingRegistrationNotFound
            })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rstest::*;

    use super::*;
    use crate::{
        domain::{error::RepositoryError, models::confirmed_registration::AuditionStatus},
        test_support::{InMemoryStore, pending_for},
    };

    const ORDER_ID: &str = "ORDER_1_abc";
    const SESSION_ID: &str = "session_ORDER_1_abc";

    #[fixture]
    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.add_pending(pending_for("duo@example.com", ORDER_ID, Some(SESSION_ID)));
        store
    }

    fn event(status: &str, session: Option<&str>) -> PaymentEvent {
        PaymentEvent {
            order_id: ORDER_ID.to_string(),
            payment_status: status.to_string(),
            payment_id: "5114910329145".to_string(),
            payment_session_id: session.map(str::to_string),
        }
    }

    fn usecase(store: &InMemoryStore) -> PaymentWebhookUsecase<InMemoryStore, InMemoryStore> {
        PaymentWebhookUsecase::new(store.clone(), store.clone())
    }

    #[rstest]
    #[tokio::test]
    async fn test_success_confirms_registration(store: InMemoryStore) {
        let outcome = usecase(&store)
            .handle(event(PAYMENT_SUCCESS, Some(SESSION_ID)))
            .await
            .unwrap();

        let confirmed = store.confirmed();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(outcome, WebhookOutcome::Confirmed(confirmed[0].id()));
        assert_eq!(confirmed[0].payment_id(), "5114910329145");
        assert_eq!(confirmed[0].payment_status(), "paid");
        assert_eq!(confirmed[0].audition_status(), AuditionStatus::UnderReview);
        assert_eq!(store.pending()[0].status(), PendingStatus::Paid);
    }

    #[rstest]
    #[tokio::test]
    async fn test_redelivered_success_creates_one_record(store: InMemoryStore) {
        let usecase = usecase(&store);
        let first = usecase.handle(event(PAYMENT_SUCCESS, Some(SESSION_ID))).await.unwrap();
        let second = usecase.handle(event(PAYMENT_SUCCESS, None)).await.unwrap();

        let WebhookOutcome::Confirmed(id) = first else {
            panic!("expected first delivery to confirm, got {first:?}");
        };
        assert_eq!(second, WebhookOutcome::AlreadyConfirmed(id));
        assert_eq!(store.confirmed().len(), 1);
    }

    #[rstest]
    #[case("FAILED")]
    #[case("USER_DROPPED")]
    #[tokio::test]
    async fn test_failure_marks_pending_failed(store: InMemoryStore, #[case] status: &str) {
        let outcome = usecase(&store).handle(event(status, None)).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::MarkedFailed);
        assert_eq!(store.pending()[0].status(), PendingStatus::Failed);
        assert!(store.confirmed().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_failure_after_success_ignored(store: InMemoryStore) {
        let usecase = usecase(&store);
        usecase.handle(event(PAYMENT_SUCCESS, None)).await.unwrap();
        let outcome = usecase.handle(event("FAILED", None)).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::Ignored);
        assert_eq!(store.pending()[0].status(), PendingStatus::Paid);
    }

    /// Serves lookups from a snapshot taken before a concurrent confirmation.
    struct StaleSnapshot {
        store: InMemoryStore,
        snapshot: PendingRegistration,
    }

    #[async_trait]
    impl PendingRegistrationRepository for StaleSnapshot {
        async fn insert(&self, pending: &PendingRegistration) -> Result<(), RepositoryError> {
            self.store.insert(pending).await
        }

        async fn attach_payment_session(&self, id: Uuid, payment_session_id: &str) -> Result<(), RepositoryError> {
            self.store.attach_payment_session(id, payment_session_id).await
        }

        async fn mark_failed_unless_paid(&self, id: Uuid) -> Result<bool, RepositoryError> {
            self.store.mark_failed_unless_paid(id).await
        }

        async fn find_by_payment_session_id(&self, _: &str) -> Result<Option<PendingRegistration>, RepositoryError> {
            Ok(Some(self.snapshot.clone()))
        }

        async fn find_by_order_id(&self, _: &str) -> Result<Option<PendingRegistration>, RepositoryError> {
            Ok(Some(self.snapshot.clone()))
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_failure_racing_success_keeps_paid(store: InMemoryStore) {
        let snapshot = store.pending()[0].clone();
        usecase(&store).handle(event(PAYMENT_SUCCESS, None)).await.unwrap();

        // failure delivery read the row while it was still pending
        let racing = PaymentWebhookUsecase::new(
            StaleSnapshot {
                store: store.clone(),
                snapshot,
            },
            store.clone(),
        );
        let outcome = racing.handle(event("FAILED", Some(SESSION_ID))).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::Ignored);
        assert_eq!(store.pending()[0].status(), PendingStatus::Paid);
        assert_eq!(store.confirmed().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_order_negative(store: InMemoryStore) {
        let mut unknown = event(PAYMENT_SUCCESS, Some("session_other"));
        unknown.order_id = "ORDER_2_zzz".to_string();

        let err = usecase(&store).handle(unknown).await.unwrap_err();
        assert!(matches!(err, DomainError::PendingRegistrationNotFound));
        assert!(store.confirmed().is_empty());
    }
}
