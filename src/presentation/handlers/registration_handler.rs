use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use crate::{
    domain::{error::DomainError, repositories::registration_repository::RegistrationRepository},
    presentation::{dto::RegistrationView, error::ApiError, handlers::registration_id},
    usecase::{
        status_lookup_usecase::{StatusLookupUsecase, StatusQuery},
        video_submission_usecase::VideoSubmissionUsecase,
    },
};

// Request

/// query for status lookup; one of the keys is required
#[derive(Serialize, Deserialize, Default)]
pub struct StatusParams {
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub id: Option<String>,
}

/// json for video update request
#[derive(Serialize, Deserialize)]
pub struct VideoRequest {
    pub video_url: String,
}

/* Router Function and Handler Function */

/// Public registration routes, nested under `/registrations` by the main router.
pub fn create_registration_router<R: RegistrationRepository + Send + Sync + 'static + Clone>(
    lookup_service: StatusLookupUsecase<R>,
    video_service: VideoSubmissionUsecase<R>,
) -> Router {
    let state = AppState {
        lookup_service: Arc::new(lookup_service),
        video_service: Arc::new(video_service),
    };

    Router::new()
        .route("/status", get(registration_status::<R>))
        .route("/{id}", get(registration_details::<R>))
        .route("/{id}/video", put(update_video::<R>))
        .with_state(state)
}

pub struct AppState<R: RegistrationRepository> {
    pub lookup_service: Arc<StatusLookupUsecase<R>>,
    pub video_service: Arc<VideoSubmissionUsecase<R>>,
}

impl<R: RegistrationRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            lookup_service: Arc::clone(&self.lookup_service),
            video_service: Arc::clone(&self.video_service),
        }
    }
}

async fn find<R: RegistrationRepository + Send + Sync>(
    state: &AppState<R>,
    query: StatusQuery,
) -> Result<Json<RegistrationView>, ApiError> {
    let registration = state
        .lookup_service
        .lookup(query)
        .await?
        .ok_or(DomainError::RegistrationNotFound)?;
    Ok(Json(RegistrationView::from(&registration)))
}

// handler function

/// handler function for the public status check
async fn registration_status<R: RegistrationRepository + Send + Sync>(
    State(state): State<AppState<R>>,
    Query(params): Query<StatusParams>,
) -> Result<Json<RegistrationView>, ApiError> {
    let query = StatusQuery::from_parts(params.email, params.mobile, params.id)?;
    find(&state, query).await
}

/// handler function for registration details by id
async fn registration_details<R: RegistrationRepository + Send + Sync>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<RegistrationView>, ApiError> {
    find(&state, StatusQuery::Id(id)).await
}

/// handler function for replacing the audition video link
async fn update_video<R: RegistrationRepository + Send + Sync>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(payload): Json<VideoRequest>,
) -> Result<Json<RegistrationView>, ApiError> {
    let registration = state
        .video_service
        .submit_video(registration_id(&id)?, payload.video_url)
        .await?;
    Ok(Json(RegistrationView::from(&registration)))
}
