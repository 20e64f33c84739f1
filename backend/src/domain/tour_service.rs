//! Tour catalogue service.
//!
//! Serves public catalogue reads and admin-gated mutations. Deleting a tour
//! archives it so existing bookings keep their tour summary.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{TourCatalogue, TourCommand, TourRepository, TourRepositoryError};
use crate::domain::{
    Error, Identity, Tour, TourDraft, TourId, TourPatch, TourQuery, require_admin,
};

/// Catalogue service over a [`TourRepository`].
#[derive(Clone)]
pub struct TourCatalogueService<T> {
    tours: Arc<T>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<T> TourCatalogueService<T> {
    pub fn new(tours: Arc<T>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { tours, clock }
    }
}

pub(crate) fn map_tour_error(error: TourRepositoryError) -> Error {
    match error {
        TourRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("tour repository unavailable: {message}"))
        }
        TourRepositoryError::Query { message } => {
            Error::internal(format!("tour repository error: {message}"))
        }
    }
}

pub(crate) fn tour_not_found() -> Error {
    Error::not_found("Tour not found").with_details(json!({ "entity": "tour" }))
}

impl<T> TourCatalogueService<T>
where
    T: TourRepository,
{
    async fn active_tour(&self, id: TourId) -> Result<Tour, Error> {
        self.tours
            .find(id)
            .await
            .map_err(map_tour_error)?
            .filter(|tour| !tour.is_archived())
            .ok_or_else(tour_not_found)
    }

    async fn store(&self, tour: Tour) -> Result<Tour, Error> {
        if self.tours.update(&tour).await.map_err(map_tour_error)? {
            Ok(tour)
        } else {
            Err(tour_not_found())
        }
    }
}

#[async_trait]
impl<T> TourCatalogue for TourCatalogueService<T>
where
    T: TourRepository,
{
    async fn list(&self, query: &TourQuery) -> Result<Vec<Tour>, Error> {
        let query = query.clone().validate()?;
        let tours = self.tours.list_active().await.map_err(map_tour_error)?;
        Ok(query.apply(tours))
    }

    async fn get(&self, id: TourId) -> Result<Tour, Error> {
        self.active_tour(id).await
    }
}

#[async_trait]
impl<T> TourCommand for TourCatalogueService<T>
where
    T: TourRepository,
{
    async fn create(&self, actor: &Identity, draft: TourDraft) -> Result<Tour, Error> {
        require_admin(actor)?;
        let tour = Tour::create(TourId::random(), draft, self.clock.utc())?;
        self.tours.insert(&tour).await.map_err(map_tour_error)?;
        info!(tour_id = %tour.id(), user_id = %actor.user_id, "tour created");
        Ok(tour)
    }

    async fn update(&self, actor: &Identity, id: TourId, patch: TourPatch) -> Result<Tour, Error> {
        require_admin(actor)?;
        let revised = self.active_tour(id).await?.revise(patch)?;
        let tour = self.store(revised).await?;
        info!(tour_id = %id, user_id = %actor.user_id, "tour updated");
        Ok(tour)
    }

    async fn delete(&self, actor: &Identity, id: TourId) -> Result<(), Error> {
        require_admin(actor)?;
        let archived = self.active_tour(id).await?.archived(self.clock.utc());
        self.store(archived).await?;
        info!(tour_id = %id, user_id = %actor.user_id, "tour archived");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MockTourRepository;
    use crate::domain::{ErrorCode, Role, UserId};
    use crate::test_support::{MutableClock, sample_draft};

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: UserId::random(),
            name: "Morgan".into(),
            email: "morgan@example.com".into(),
            role,
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock::new(
            Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        ))
    }

    fn stored_tour() -> Tour {
        Tour::create(TourId::random(), sample_draft("Rome Historical Journey", 349), Utc::now())
            .expect("valid tour")
    }

    #[rstest]
    #[tokio::test]
    async fn non_admins_cannot_create_tours(clock: Arc<MutableClock>) {
        let mut repo = MockTourRepository::new();
        repo.expect_insert().never();
        let service = TourCatalogueService::new(Arc::new(repo), clock);

        let err = service
            .create(&identity(Role::User), sample_draft("Tokyo", 599))
            .await
            .expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), "Not authorized as admin");
    }

    #[rstest]
    #[tokio::test]
    async fn admins_create_validated_tours(clock: Arc<MutableClock>) {
        let mut repo = MockTourRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(()));
        let service = TourCatalogueService::new(Arc::new(repo), clock.clone());

        let tour = service
            .create(&identity(Role::Admin), sample_draft("Tokyo", 599))
            .await
            .expect("created");
        assert_eq!(tour.price(), 599);
        assert_eq!(tour.created_at(), clock.utc());
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_drafts_are_rejected_before_storage(clock: Arc<MutableClock>) {
        let mut repo = MockTourRepository::new();
        repo.expect_insert().never();
        let service = TourCatalogueService::new(Arc::new(repo), clock);

        let mut draft = sample_draft("", 100);
        draft.duration = 0;
        let err = service
            .create(&identity(Role::Admin), draft)
            .await
            .expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["errors"].as_array().map(Vec::len), Some(2));
    }

    #[rstest]
    #[tokio::test]
    async fn archived_tours_are_not_found(clock: Arc<MutableClock>) {
        let tour = stored_tour().archived(Utc::now());
        let id = tour.id();
        let mut repo = MockTourRepository::new();
        repo.expect_find()
            .with(eq(id))
            .returning(move |_| Ok(Some(tour.clone())));
        let service = TourCatalogueService::new(Arc::new(repo), clock);

        let err = service.get(id).await.expect_err("archived");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Tour not found");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_archives_instead_of_removing(clock: Arc<MutableClock>) {
        let tour = stored_tour();
        let id = tour.id();
        let now = clock.utc();
        let mut repo = MockTourRepository::new();
        repo.expect_find()
            .returning(move |_| Ok(Some(tour.clone())));
        repo.expect_update()
            .withf(move |tour| tour.archived_at() == Some(now))
            .times(1)
            .returning(|_| Ok(true));
        let service = TourCatalogueService::new(Arc::new(repo), clock);

        service
            .delete(&identity(Role::Admin), id)
            .await
            .expect("archived");
    }

    #[rstest]
    #[tokio::test]
    async fn update_merges_the_patch(clock: Arc<MutableClock>) {
        let tour = stored_tour();
        let id = tour.id();
        let mut repo = MockTourRepository::new();
        repo.expect_find()
            .returning(move |_| Ok(Some(tour.clone())));
        repo.expect_update().returning(|_| Ok(true));
        let service = TourCatalogueService::new(Arc::new(repo), clock);

        let patch = TourPatch {
            price: Some(399),
            ..TourPatch::default()
        };
        let updated = service
            .update(&identity(Role::Admin), id, patch)
            .await
            .expect("updated");
        assert_eq!(updated.price(), 399);
        assert_eq!(updated.name(), "Rome Historical Journey");
    }

    #[rstest]
    #[tokio::test]
    async fn inverted_price_range_is_invalid(clock: Arc<MutableClock>) {
        let mut repo = MockTourRepository::new();
        repo.expect_list_active().never();
        let service = TourCatalogueService::new(Arc::new(repo), clock);

        let query = TourQuery {
            min_price: Some(2000),
            max_price: Some(1000),
            ..TourQuery::default()
        };
        let err = service.list(&query).await.expect_err("invalid range");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn repository_outage_is_service_unavailable(clock: Arc<MutableClock>) {
        let mut repo = MockTourRepository::new();
        repo.expect_list_active()
            .returning(|| Err(TourRepositoryError::connection("pool exhausted")));
        let service = TourCatalogueService::new(Arc::new(repo), clock);

        let err = service
            .list(&TourQuery::default())
            .await
            .expect_err("outage");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
