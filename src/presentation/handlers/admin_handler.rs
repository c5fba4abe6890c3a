use std::{str::FromStr, sync::Arc};

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    domain::{
        error::DomainError,
        models::confirmed_registration::AuditionDecision,
        repositories::{
            admin_repository::AdminRepository, registration_repository::RegistrationRepository,
        },
        services::{
            password_service::PasswordHasher,
            token_service::{AdminClaims, TokenGenerator, TokenVerifier},
        },
    },
    presentation::{
        auth::require_admin,
        dto::{AdminInfo, RegistrationView},
        error::ApiError,
        handlers::registration_id,
    },
    usecase::{
        admin_login_usecase::AdminLoginUsecase,
        registration_review_usecase::{RegistrationFilter, RegistrationReviewUsecase, ReviewStats},
    },
};

// Request

/// json for admin login request
#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// dashboard filters; empty or missing values mean "all"
#[derive(Serialize, Deserialize, Default)]
pub struct ListParams {
    pub dance_type: Option<String>,
    pub age_group: Option<String>,
    pub theme: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<ListParams> for RegistrationFilter {
    type Error = DomainError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        Ok(Self {
            dance_type: choice(params.dance_type)?,
            age_group: choice(params.age_group)?,
            theme: choice(params.theme)?,
            category: choice(params.category)?,
            status: choice(params.status)?,
            search: params
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

fn choice<T: FromStr<Err = DomainError>>(value: Option<String>) -> Result<Option<T>, DomainError> {
    match value.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// json for audition review request
#[derive(Serialize, Deserialize)]
pub struct ReviewRequest {
    pub status: AuditionDecision,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

// Response

/// json for admin login response
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}

#[derive(Serialize, Deserialize)]
pub struct RegistrationListResponse {
    pub registrations: Vec<RegistrationView>,
    pub count: usize,
    pub stats: StatsView,
}

#[derive(Serialize, Deserialize)]
pub struct StatsView {
    pub total: usize,
    pub under_review: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl From<ReviewStats> for StatsView {
    fn from(stats: ReviewStats) -> Self {
        Self {
            total: stats.total,
            under_review: stats.under_review,
            approved: stats.approved,
            rejected: stats.rejected,
        }
    }
}

/* Router Function and Handler Function */

/// Admin routes, nested under `/admin` by the main router.
/// Everything except `/login` requires a bearer token.
pub fn create_admin_router<
    A: AdminRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static + Clone,
    T: TokenGenerator + Send + Sync + 'static + Clone,
    V: TokenVerifier + Send + Sync + 'static + Clone,
    R: RegistrationRepository + Send + Sync + 'static + Clone,
>(
    login_service: AdminLoginUsecase<A, P, T>,
    review_service: RegistrationReviewUsecase<R>,
    token_verifier: V,
) -> Router {
    let state = AppState {
        login_service: Arc::new(login_service),
        review_service: Arc::new(review_service),
    };

    let protected = Router::new()
        .route("/registrations", get(list_registrations::<A, P, T, R>))
        .route("/registrations/{id}", get(get_registration::<A, P, T, R>))
        .route("/registrations/{id}/review", put(review_registration::<A, P, T, R>))
        .route_layer(middleware::from_fn_with_state(token_verifier, require_admin::<V>));

    Router::new()
        .route("/login", post(login::<A, P, T, R>))
        .merge(protected)
        .with_state(state)
}

pub struct AppState<A, P, T, R>
where
    A: AdminRepository,
    P: PasswordHasher,
    T: TokenGenerator,
    R: RegistrationRepository,
{
    pub login_service: Arc<AdminLoginUsecase<A, P, T>>,
    pub review_service: Arc<RegistrationReviewUsecase<R>>,
}

impl<A, P, T, R> Clone for AppState<A, P, T, R>
where
    A: AdminRepository,
    P: PasswordHasher,
    T: TokenGenerator,
    R: RegistrationRepository,
{
    fn clone(&self) -> Self {
        Self {
            login_service: Arc::clone(&self.login_service),
            review_service: Arc::clone(&self.review_service),
        }
    }
}

// handler function

/// handler function for admin login
async fn login<
    A: AdminRepository + Send + Sync,
    P: PasswordHasher + Send + Sync,
    T: TokenGenerator + Send + Sync,
    R: RegistrationRepository + Send + Sync,
>(
    State(state): State<AppState<A, P, T, R>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state
        .login_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(LoginResponse {
        token: result.token,
        admin: AdminInfo::from(&result.admin),
    }))
}

/// handler function for the dashboard listing
async fn list_registrations<
    A: AdminRepository + Send + Sync,
    P: PasswordHasher + Send + Sync,
    T: TokenGenerator + Send + Sync,
    R: RegistrationRepository + Send + Sync,
>(
    State(state): State<AppState<A, P, T, R>>,
    Extension(claims): Extension<AdminClaims>,
    Query(params): Query<ListParams>,
) -> Result<Json<RegistrationListResponse>, ApiError> {
    let filter = RegistrationFilter::try_from(params)?;
    let listing = state.review_service.list(&filter).await?;
    debug!(admin = %claims.email, count = listing.registrations.len(), "registrations listed");

    let registrations: Vec<RegistrationView> =
        listing.registrations.iter().map(RegistrationView::from).collect();
    Ok(Json(RegistrationListResponse {
        count: registrations.len(),
        registrations,
        stats: listing.stats.into(),
    }))
}

/// handler function for a single registration
async fn get_registration<
    A: AdminRepository + Send + Sync,
    P: PasswordHasher + Send + Sync,
    T: TokenGenerator + Send + Sync,
    R: RegistrationRepository + Send + Sync,
>(
    State(state): State<AppState<A, P, T, R>>,
    Path(id): Path<String>,
) -> Result<Json<RegistrationView>, ApiError> {
    let registration = state.review_service.get(registration_id(&id)?).await?;
    Ok(Json(RegistrationView::from(&registration)))
}

/// handler function for approving or rejecting an audition
async fn review_registration<
    A: AdminRepository + Send + Sync,
    P: PasswordHasher + Send + Sync,
    T: TokenGenerator + Send + Sync,
    R: RegistrationRepository + Send + Sync,
>(
    State(state): State<AppState<A, P, T, R>>,
    Extension(claims): Extension<AdminClaims>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<RegistrationView>, ApiError> {
    let registration = state
        .review_service
        .review(registration_id(&id)?, payload.status, payload.admin_notes, &claims)
        .await?;
    Ok(Json(RegistrationView::from(&registration)))
}
