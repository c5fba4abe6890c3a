//! In-memory fakes of the repositories and external services, shared by
//! usecase and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    error::{DomainError, GatewayError, RepositoryError},
    models::{
        admin::{Admin, AdminRole, HashedPassword},
        confirmed_registration::ConfirmedRegistration,
        pending_registration::{PendingRegistration, PendingStatus},
        registration::{RegistrationApplication, RegistrationForm},
    },
    repositories::{
        admin_repository::AdminRepository,
        payment_confirmation_repository::{ConfirmationOutcome, PaymentConfirmationRepository},
        pending_registration_repository::PendingRegistrationRepository,
        registration_repository::RegistrationRepository,
    },
    services::{
        password_service::{MIN_PASSWORD_LENGTH, PasswordHasher},
        payment_gateway::{OrderRequest, PaymentGateway, PaymentSession},
        token_service::{AdminClaims, Token, TokenGenerator, TokenVerifier},
    },
};

pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";
pub const TEST_ADMIN_PASSWORD: &str = "correct-horse";
pub const TEST_TOKEN: &str = "mock_token";

#[derive(Default)]
struct Tables {
    pending: Vec<PendingRegistration>,
    confirmed: Vec<ConfirmedRegistration>,
    admins: Vec<Admin>,
}

/// Shared in-memory store implementing every repository trait.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Vec<PendingRegistration> {
        self.tables.lock().unwrap().pending.clone()
    }

    pub fn confirmed(&self) -> Vec<ConfirmedRegistration> {
        self.tables.lock().unwrap().confirmed.clone()
    }

    pub fn add_pending(&self, pending: PendingRegistration) {
        self.tables.lock().unwrap().pending.push(pending);
    }

    pub fn add_confirmed(&self, confirmed: ConfirmedRegistration) {
        self.tables.lock().unwrap().confirmed.push(confirmed);
    }

    pub fn add_admin(&self, admin: Admin) {
        self.tables.lock().unwrap().admins.push(admin);
    }

    fn update_pending(&self, id: Uuid, f: impl FnOnce(&PendingRegistration) -> PendingRegistration) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .pending
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(RepositoryError::NotFound)?;
        *row = f(row);
        Ok(())
    }

    fn latest_confirmed(&self, pred: impl Fn(&ConfirmedRegistration) -> bool) -> Option<ConfirmedRegistration> {
        self.tables
            .lock()
            .unwrap()
            .confirmed
            .iter()
            .filter(|r| pred(r))
            .max_by_key(|r| r.created_at())
            .cloned()
    }
}

fn rebuild_pending(
    pending: &PendingRegistration,
    payment_session_id: Option<String>,
    status: PendingStatus,
) -> PendingRegistration {
    PendingRegistration::reconstruct(
        pending.id(),
        pending.application().clone(),
        pending.amount(),
        pending.order_id().to_string(),
        payment_session_id,
        status,
        pending.created_at(),
    )
}

#[async_trait]
impl PendingRegistrationRepository for InMemoryStore {
    async fn insert(&self, pending: &PendingRegistration) -> Result<(), RepositoryError> {
        if pending.application().personal.email.contains("dberror") {
            return Err(RepositoryError::DatabaseError("insert failed".to_string()));
        }
        self.add_pending(pending.clone());
        Ok(())
    }

    async fn attach_payment_session(&self, id: Uuid, payment_session_id: &str) -> Result<(), RepositoryError> {
        self.update_pending(id, |p| {
            rebuild_pending(p, Some(payment_session_id.to_string()), p.status())
        })
    }

    async fn mark_failed_unless_paid(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut marked = false;
        self.update_pending(id, |p| {
            if p.status() == PendingStatus::Paid {
                return p.clone();
            }
            marked = true;
            rebuild_pending(p, p.payment_session_id().map(str::to_string), PendingStatus::Failed)
        })?;
        Ok(marked)
    }

    async fn find_by_payment_session_id(&self, payment_session_id: &str) -> Result<Option<PendingRegistration>, RepositoryError> {
        Ok(self
            .pending()
            .into_iter()
            .find(|p| p.payment_session_id() == Some(payment_session_id)))
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<PendingRegistration>, RepositoryError> {
        Ok(self.pending().into_iter().find(|p| p.order_id() == order_id))
    }
}

#[async_trait]
impl PaymentConfirmationRepository for InMemoryStore {
    async fn confirm(&self, confirmed: &ConfirmedRegistration) -> Result<ConfirmationOutcome, RepositoryError> {
        if confirmed.application().personal.email.contains("dberror") {
            return Err(RepositoryError::DatabaseError("confirm failed".to_string()));
        }
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables
            .confirmed
            .iter()
            .find(|r| r.pending_registration_id() == confirmed.pending_registration_id())
        {
            return Ok(ConfirmationOutcome::AlreadyConfirmed(existing.id()));
        }
        let pending = tables
            .pending
            .iter_mut()
            .find(|p| p.id() == confirmed.pending_registration_id())
            .ok_or(RepositoryError::NotFound)?;
        *pending = rebuild_pending(
            pending,
            pending.payment_session_id().map(str::to_string),
            PendingStatus::Paid,
        );
        tables.confirmed.push(confirmed.clone());
        Ok(ConfirmationOutcome::Created)
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ConfirmedRegistration>, RepositoryError> {
        Ok(self.latest_confirmed(|r| r.id() == id))
    }

    async fn find_latest_by_email(&self, email: &str) -> Result<Option<ConfirmedRegistration>, RepositoryError> {
        Ok(self.latest_confirmed(|r| r.application().personal.email == email))
    }

    async fn find_latest_by_mobile(&self, mobile: &str) -> Result<Option<ConfirmedRegistration>, RepositoryError> {
        Ok(self.latest_confirmed(|r| r.application().personal.mobile == mobile))
    }

    async fn list_newest_first(&self) -> Result<Vec<ConfirmedRegistration>, RepositoryError> {
        let mut all = self.confirmed();
        all.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        Ok(all)
    }

    async fn save_review(&self, registration: &ConfirmedRegistration) -> Result<(), RepositoryError> {
        self.replace_confirmed(registration)
    }

    async fn save_video(&self, registration: &ConfirmedRegistration) -> Result<(), RepositoryError> {
        self.replace_confirmed(registration)
    }
}

impl InMemoryStore {
    fn replace_confirmed(&self, registration: &ConfirmedRegistration) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .confirmed
            .iter_mut()
            .find(|r| r.id() == registration.id())
            .ok_or(RepositoryError::NotFound)?;
        *row = registration.clone();
        Ok(())
    }
}

#[async_trait]
impl AdminRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .admins
            .iter()
            .find(|a| a.email() == email)
            .cloned())
    }

    async fn create(&self, admin: &Admin) -> Result<(), RepositoryError> {
        self.add_admin(admin.clone());
        Ok(())
    }
}

/// Gateway fake that records orders and answers with a session derived from the order id.
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    pub orders: Arc<Mutex<Vec<OrderRequest>>>,
    pub fail: bool,
}

impl MockPaymentGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn orders(&self) -> Vec<OrderRequest> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(&self, order: &OrderRequest) -> Result<PaymentSession, GatewayError> {
        self.orders.lock().unwrap().push(order.clone());
        if self.fail {
            return Err(GatewayError::Rejected {
                status: 401,
                message: "authentication Failed".to_string(),
            });
        }
        Ok(PaymentSession {
            payment_session_id: format!("session_{}", order.order_id),
        })
    }
}

#[derive(Clone)]
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        if plain_password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::WeakPassword);
        }
        Ok(HashedPassword::new(format!("hashed:{plain_password}")))
    }

    fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> Result<bool, DomainError> {
        Ok(hashed_password.as_str() == format!("hashed:{plain_password}"))
    }
}

#[derive(Clone)]
pub struct MockTokenService;

impl TokenGenerator for MockTokenService {
    fn generate(&self, _admin: &Admin) -> Result<Token, DomainError> {
        Ok(TEST_TOKEN.to_string())
    }
}

impl TokenVerifier for MockTokenService {
    fn verify(&self, token: &str) -> Result<AdminClaims, DomainError> {
        if token == TEST_TOKEN {
            Ok(AdminClaims {
                admin_id: Uuid::nil(),
                email: TEST_ADMIN_EMAIL.to_string(),
                role: AdminRole::Admin,
            })
        } else {
            Err(DomainError::InvalidToken)
        }
    }
}

pub fn test_admin() -> Admin {
    Admin::new(
        Uuid::nil(),
        TEST_ADMIN_EMAIL.to_string(),
        "Festival Admin".to_string(),
        HashedPassword::new(format!("hashed:{TEST_ADMIN_PASSWORD}")),
        AdminRole::Admin,
    )
    .unwrap()
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
}

/// A complete duo registration form.
pub fn duo_form(email: &str) -> RegistrationForm {
    RegistrationForm {
        name: Some("Rohan Kulkarni".to_string()),
        date_of_birth: Some("2012-03-21".to_string()),
        gender: Some("male".to_string()),
        address: Some("4 Gangapur Road, Nashik".to_string()),
        mobile: Some("9822012345".to_string()),
        email: Some(email.to_string()),
        school_college: Some("Ryan International".to_string()),
        teacher_name: Some("Guru Smita".to_string()),
        dance_type: Some("duo".to_string()),
        age_group: Some("12-17".to_string()),
        theme: Some("Mythology".to_string()),
        category: Some("Folk".to_string()),
        participant1_name: Some("Rohan Kulkarni".to_string()),
        participant2_name: Some("Isha Joshi".to_string()),
        video_url: Some("https://youtube.com/watch?v=duo".to_string()),
        ..Default::default()
    }
}

pub fn pending_for(email: &str, order_id: &str, session: Option<&str>) -> PendingRegistration {
    let application = RegistrationApplication::from_form(duo_form(email), today()).unwrap();
    let pending = PendingRegistration::new(application, Decimal::from(800), order_id.to_string());
    rebuild_pending(&pending, session.map(str::to_string), PendingStatus::Pending)
}

pub fn confirmed_for(email: &str, order_id: &str) -> ConfirmedRegistration {
    let pending = pending_for(email, order_id, None);
    ConfirmedRegistration::from_pending(&pending, format!("pay_{order_id}"))
}
