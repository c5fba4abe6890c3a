pub mod admin_login_usecase;
pub mod create_payment_session_usecase;
pub mod payment_webhook_usecase;
pub mod registration_review_usecase;
pub mod status_lookup_usecase;
pub mod video_submission_usecase;
