use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::{
        confirmed_registration::{AuditionDecision, AuditionStatus, ConfirmedRegistration},
        registration::{AgeGroup, DanceCategory, DanceType, Theme},
    },
    repositories::registration_repository::RegistrationRepository,
    services::token_service::AdminClaims,
};

/// Dashboard filters. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct RegistrationFilter {
    pub dance_type: Option<DanceType>,
    pub age_group: Option<AgeGroup>,
    pub theme: Option<Theme>,
    pub category: Option<DanceCategory>,
    pub status: Option<AuditionStatus>,
    /// case-insensitive on name and email, plain substring on mobile
    pub search: Option<String>,
}

impl RegistrationFilter {
    pub fn matches(&self, registration: &ConfirmedRegistration) -> bool {
        let application = registration.application();
        let entry = &application.entry;

        if self.dance_type.is_some_and(|d| d != entry.dance_type())
            || self.age_group.is_some_and(|a| a != entry.age_group)
            || self.theme.is_some_and(|t| t != entry.theme)
            || self.category.is_some_and(|c| c != entry.category)
            || self.status.is_some_and(|s| s != registration.audition_status())
        {
            return false;
        }

        match self.search.as_deref().filter(|s| !s.is_empty()) {
            Some(term) => {
                let lowered = term.to_lowercase();
                let personal = &application.personal;
                personal.name.to_lowercase().contains(&lowered)
                    || personal.email.to_lowercase().contains(&lowered)
                    || personal.mobile.contains(term)
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewStats {
    pub total: usize,
    pub under_review: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ReviewStats {
    pub fn from_registrations(registrations: &[ConfirmedRegistration]) -> Self {
        registrations.iter().fold(
            Self {
                total: registrations.len(),
                ..Default::default()
            },
            |mut stats, r| {
                match r.audition_status() {
                    AuditionStatus::UnderReview => stats.under_review += 1,
                    AuditionStatus::Approved => stats.approved += 1,
                    AuditionStatus::Rejected => stats.rejected += 1,
                }
                stats
            },
        )
    }
}

#[derive(Debug)]
pub struct RegistrationListing {
    pub registrations: Vec<ConfirmedRegistration>,
    /// counted over all registrations, not only the filtered ones
    pub stats: ReviewStats,
}

pub struct RegistrationReviewUsecase<R: RegistrationRepository> {
    registration_repository: R,
}

impl<R: RegistrationRepository> RegistrationReviewUsecase<R> {
    pub fn new(registration_repository: R) -> Self {
        Self {
            registration_repository,
        }
    }

    pub async fn list(&self, filter: &RegistrationFilter) -> Result<RegistrationListing, DomainError>
    where
        R: Send + Sync,
    {
        let all = self.registration_repository.list_newest_first().await?;
        let stats = ReviewStats::from_registrations(&all);
        let registrations = all.into_iter().filter(|r| filter.matches(r)).collect();

        Ok(RegistrationListing {
            registrations,
            stats,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<ConfirmedRegistration, DomainError>
    where
        R: Send + Sync,
    {
        self.registration_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::RegistrationNotFound)
    }

    pub async fn review(
        &self,
        id: Uuid,
        decision: AuditionDecision,
        admin_notes: Option<String>,
        reviewer: &AdminClaims,
    ) -> Result<ConfirmedRegistration, DomainError>
    where
        R: Send + Sync,
    {
        let mut registration = self.get(id).await?;
        registration.review(decision, admin_notes);
        self.registration_repository.save_review(&registration).await?;

        info!(
            registration_id = %id,
            status = registration.audition_status().as_str(),
            reviewer_id = %reviewer.admin_id,
            reviewer = %reviewer.email,
            reviewer_role = reviewer.role.as_str(),
            "audition reviewed"
        );
        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::{
        domain::models::admin::AdminRole,
        test_support::{InMemoryStore, TEST_ADMIN_EMAIL, confirmed_for},
    };

    fn reviewer() -> AdminClaims {
        AdminClaims {
            admin_id: Uuid::new_v4(),
            email: TEST_ADMIN_EMAIL.to_string(),
            role: AdminRole::SuperAdmin,
        }
    }

    #[fixture]
    fn registrations() -> Vec<ConfirmedRegistration> {
        let mut approved = confirmed_for("meera@example.com", "ORDER_2");
        approved.review(AuditionDecision::Approved, Some("great footwork".to_string()));
        let mut rejected = confirmed_for("kiran@school.org", "ORDER_3");
        rejected.review(AuditionDecision::Rejected, None);
        vec![confirmed_for("duo@example.com", "ORDER_1"), approved, rejected]
    }

    #[rstest]
    fn test_stats(registrations: Vec<ConfirmedRegistration>) {
        let stats = ReviewStats::from_registrations(&registrations);
        assert_eq!(
            stats,
            ReviewStats {
                total: 3,
                under_review: 1,
                approved: 1,
                rejected: 1
            }
        );
    }

    #[rstest]
    #[case::everything(RegistrationFilter::default(), 3)]
    #[case::approved(RegistrationFilter { status: Some(AuditionStatus::Approved), ..Default::default() }, 1)]
    #[case::duo(RegistrationFilter { dance_type: Some(DanceType::Duo), ..Default::default() }, 3)]
    #[case::group(RegistrationFilter { dance_type: Some(DanceType::Group), ..Default::default() }, 0)]
    #[case::theme(RegistrationFilter { theme: Some(Theme::NayaBharat), ..Default::default() }, 0)]
    #[case::email_search(RegistrationFilter { search: Some("SCHOOL.ORG".to_string()), ..Default::default() }, 1)]
    #[case::name_search(RegistrationFilter { search: Some("rohan".to_string()), ..Default::default() }, 3)]
    #[case::mobile_search(RegistrationFilter { search: Some("2012".to_string()), ..Default::default() }, 3)]
    #[case::combined(RegistrationFilter { status: Some(AuditionStatus::UnderReview), search: Some("meera".to_string()), ..Default::default() }, 0)]
    fn test_filter(
        registrations: Vec<ConfirmedRegistration>,
        #[case] filter: RegistrationFilter,
        #[case] expected: usize,
    ) {
        let matched = registrations.iter().filter(|r| filter.matches(r)).count();
        assert_eq!(matched, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_stats_ignore_filter(registrations: Vec<ConfirmedRegistration>) {
        let store = InMemoryStore::new();
        registrations.into_iter().for_each(|r| store.add_confirmed(r));
        let usecase = RegistrationReviewUsecase::new(store);

        let filter = RegistrationFilter {
            status: Some(AuditionStatus::Rejected),
            ..Default::default()
        };
        let listing = usecase.list(&filter).await.unwrap();

        assert_eq!(listing.registrations.len(), 1);
        assert_eq!(listing.stats.total, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn test_review_positive() {
        let store = InMemoryStore::new();
        let registration = confirmed_for("duo@example.com", "ORDER_1");
        let id = registration.id();
        let created_at = registration.updated_at();
        store.add_confirmed(registration);

        let reviewed = RegistrationReviewUsecase::new(store.clone())
            .review(id, AuditionDecision::Approved, Some("  see you on stage ".to_string()), &reviewer())
            .await
            .unwrap();

        assert_eq!(reviewed.audition_status(), AuditionStatus::Approved);
        assert_eq!(reviewed.admin_notes(), Some("see you on stage"));
        assert!(reviewed.updated_at() >= created_at);
        assert_eq!(store.confirmed()[0].audition_status(), AuditionStatus::Approved);
    }

    #[rstest]
    #[tokio::test]
    async fn test_review_unknown_negative() {
        let err = RegistrationReviewUsecase::new(InMemoryStore::new())
            .review(Uuid::new_v4(), AuditionDecision::Rejected, None, &reviewer())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RegistrationNotFound));
    }
}
