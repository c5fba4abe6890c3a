use tracing::info;
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::{confirmed_registration::ConfirmedRegistration, registration::VideoUrl},
    repositories::registration_repository::RegistrationRepository,
};

/// Attaches an audition video link to a confirmed registration.
pub struct VideoSubmissionUsecase<R: RegistrationRepository> {
    registration_repository: R,
}

impl<R: RegistrationRepository> VideoSubmissionUsecase<R> {
    pub fn new(registration_repository: R) -> Self {
        Self {
            registration_repository,
        }
    }

    pub async fn submit_video(
        &self,
        registration_id: Uuid,
        video_url: String,
    ) -> Result<ConfirmedRegistration, DomainError>
    where
        R: Send + Sync,
    {
        let video_url = VideoUrl::new(video_url)?;

        let mut registration = self
            .registration_repository
            .find_by_id(registration_id)
            .await?
            .ok_or(DomainError::RegistrationNotFound)?;

        registration.replace_video(video_url);
        self.registration_repository.save_video(&registration).await?;

        info!(registration_id = %registration_id, "audition video updated");
        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::test_support::{InMemoryStore, confirmed_for};

    #[rstest]
    #[tokio::test]
    async fn test_submit_video_positive() {
        let store = InMemoryStore::new();
        let registration = confirmed_for("duo@example.com", "ORDER_1_abc");
        let id = registration.id();
        store.add_confirmed(registration);

        let updated = VideoSubmissionUsecase::new(store.clone())
            .submit_video(id, "https://nskdo.in/videos/audition.mp4".to_string())
            .await
            .unwrap();

        assert_eq!(updated.application().video_url.as_str(), "https://nskdo.in/videos/audition.mp4");
        assert_eq!(
            store.confirmed()[0].application().video_url.as_str(),
            "https://nskdo.in/videos/audition.mp4"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_submit_video_unknown_registration_negative() {
        let err = VideoSubmissionUsecase::new(InMemoryStore::new())
            .submit_video(Uuid::new_v4(), "https://example.com/v.mp4".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RegistrationNotFound));
    }

    #[rstest]
    #[tokio::test]
    async fn test_submit_video_invalid_url_negative() {
        let store = InMemoryStore::new();
        let registration = confirmed_for("duo@example.com", "ORDER_1_abc");
        let id = registration.id();
        store.add_confirmed(registration);

        let err = VideoSubmissionUsecase::new(store)
            .submit_video(id, "not a url".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidVideoUrl));
    }
}
