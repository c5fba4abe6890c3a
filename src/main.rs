mod config;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;
mod usecase;

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json, Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    config::Config,
    infrastructure::{
        admin_repository::PostgresAdminRepository,
        argon2_password_hasher::Argon2PasswordHasher, cashfree_gateway::CashfreeGateway,
        jwt_token_service::JwtTokenService,
        payment_confirmation_repository::PostgresPaymentConfirmationRepository,
        pending_registration_repository::PostgresPendingRegistrationRepository,
        registration_repository::PostgresRegistrationRepository,
    },
    presentation::handlers::{
        admin_handler::create_admin_router, payment_handler::create_payment_router,
        registration_handler::create_registration_router,
    },
    usecase::{
        admin_login_usecase::AdminLoginUsecase,
        create_payment_session_usecase::CreatePaymentSessionUsecase,
        payment_webhook_usecase::PaymentWebhookUsecase,
        registration_review_usecase::RegistrationReviewUsecase,
        status_lookup_usecase::StatusLookupUsecase,
        video_submission_usecase::VideoSubmissionUsecase,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional, real deployments set the environment directly
    let _ = dotenvy::dotenv();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(1)
        .sqlx_logging(config.sql_logging);
    let db = Database::connect(opt).await?;
    info!("Connected to database");

    Migrator::up(&db, None).await?;
    info!("Database schema up to date");

    let pending_repository = PostgresPendingRegistrationRepository::new(db.clone());
    let confirmation_repository = PostgresPaymentConfirmationRepository::new(db.clone());
    let registration_repository = PostgresRegistrationRepository::new(db.clone());
    let admin_repository = PostgresAdminRepository::new(db.clone());
    let password_hasher = Argon2PasswordHasher::new();
    let token_service =
        JwtTokenService::with_expiration(config.jwt_secret.clone(), config.jwt_expiration_hours);
    let payment_gateway = CashfreeGateway::new(config.cashfree.clone())?;

    let login_service = AdminLoginUsecase::new(
        admin_repository.clone(),
        password_hasher.clone(),
        token_service.clone(),
    );
    if let Some(admin) = config.bootstrap_admin.clone() {
        match login_service
            .bootstrap_admin(admin.email.clone(), admin.name, admin.password)
            .await
        {
            Ok(true) => {}
            Ok(false) => debug!(email = %admin.email, "bootstrap admin already exists"),
            Err(e) => warn!(email = %admin.email, error = %e, "could not create bootstrap admin"),
        }
    }

    let session_service = CreatePaymentSessionUsecase::new(
        pending_repository.clone(),
        payment_gateway,
        config.fees,
        config.checkout.clone(),
    );
    let webhook_service =
        PaymentWebhookUsecase::new(pending_repository.clone(), confirmation_repository);
    let lookup_service = StatusLookupUsecase::new(registration_repository.clone());
    let video_service = VideoSubmissionUsecase::new(registration_repository.clone());
    let review_service = RegistrationReviewUsecase::new(registration_repository.clone());

    let api = Router::new()
        .nest(
            "/payments",
            create_payment_router(session_service, webhook_service),
        )
        .nest(
            "/registrations",
            create_registration_router(lookup_service, video_service),
        )
        .nest(
            "/admin",
            create_admin_router(login_service, review_service, token_service),
        );
    let app = create_app(api);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on {addr}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Mounts the api under `/api` with the health check and shared layers.
fn create_app(api: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use rstest::*;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        domain::models::fee::FeeSchedule,
        presentation::dto::RegistrationView,
        test_support::{
            InMemoryStore, MockPasswordHasher, MockPaymentGateway, MockTokenService, TEST_TOKEN,
            duo_form, test_admin,
        },
        usecase::create_payment_session_usecase::CheckoutUrls,
    };

    #[fixture]
    fn test_app() -> Router {
        let store = InMemoryStore::new();
        store.add_admin(test_admin());

        let session_service = CreatePaymentSessionUsecase::new(
            store.clone(),
            MockPaymentGateway::default(),
            FeeSchedule::default(),
            CheckoutUrls {
                site_url: "https://festival.example.com".to_string(),
                notify_url: None,
            },
        );
        let webhook_service = PaymentWebhookUsecase::new(store.clone(), store.clone());
        let login_service =
            AdminLoginUsecase::new(store.clone(), MockPasswordHasher, MockTokenService);

        // setup router: sync settings of main.app
        create_app(
            Router::new()
                .nest(
                    "/payments",
                    create_payment_router(session_service, webhook_service),
                )
                .nest(
                    "/registrations",
                    create_registration_router(
                        StatusLookupUsecase::new(store.clone()),
                        VideoSubmissionUsecase::new(store.clone()),
                    ),
                )
                .nest(
                    "/admin",
                    create_admin_router(
                        login_service,
                        RegistrationReviewUsecase::new(store.clone()),
                        MockTokenService,
                    ),
                ),
        )
    }

    async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
        app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_health(test_app: Router) {
        let response = send(&test_app, "GET", "/health", None, None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = read_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[rstest]
    #[tokio::test]
    async fn test_cors_preflight(test_app: Router) {
        let response = test_app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/payments/session")
                    .header(header::ORIGIN, "https://festival.example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_registration_flow(test_app: Router) {
        // pay for a duo entry
        let response = send(
            &test_app,
            "POST",
            "/api/payments/session",
            None,
            Some(json!({ "registrationData": duo_form("lead@example.com") })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let session: Value = read_json(response).await;
        let order_id = session["order_id"].as_str().unwrap().to_string();

        // nothing is visible before the gateway confirms
        let response = send(
            &test_app,
            "GET",
            "/api/registrations/status?email=lead@example.com",
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let webhook = json!({
            "data": {
                "order": { "order_id": order_id },
                "payment": {
                    "cf_payment_id": 991,
                    "payment_status": "SUCCESS",
                    "payment_session_id": session["payment_session_id"]
                }
            }
        });
        let response = send(&test_app, "POST", "/api/payments/webhook", None, Some(webhook)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &test_app,
            "GET",
            "/api/registrations/status?mobile=9822012345",
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let registration: RegistrationView = read_json(response).await;
        assert_eq!(registration.payment_id, "991");
        assert_eq!(registration.amount, rust_decimal::Decimal::from(800));

        // admin approves the audition
        let response = send(
            &test_app,
            "PUT",
            &format!("/api/admin/registrations/{}/review", registration.id),
            Some(TEST_TOKEN),
            Some(json!({ "status": "approved" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &test_app,
            "GET",
            &format!("/api/registrations/{}", registration.id),
            None,
            None,
        )
        .await;
        let registration: Value = read_json(response).await;
        assert_eq!(registration["audition_status"], "approved");
    }

    #[rstest]
    #[tokio::test]
    async fn test_admin_routes_require_token(test_app: Router) {
        let response = send(&test_app, "GET", "/api/admin/registrations", None, None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
