//! In-memory tour repository. Insertion order is the storage order.
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{TourRepository, TourRepositoryError};
use crate::domain::{Tour, TourId};

use super::lock;

#[derive(Debug, Default)]
pub struct InMemoryTourRepository {
    tours: Mutex<Vec<Tour>>,
}

impl InMemoryTourRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TourRepository for InMemoryTourRepository {
    async fn insert(&self, tour: &Tour) -> Result<(), TourRepositoryError> {
        lock(&self.tours).push(tour.clone());
        Ok(())
    }

    async fn find(&self, id: TourId) -> Result<Option<Tour>, TourRepositoryError> {
        Ok(lock(&self.tours).iter().find(|tour| tour.id() == id).cloned())
    }

    async fn find_many(&self, ids: &[TourId]) -> Result<Vec<Tour>, TourRepositoryError> {
        Ok(lock(&self.tours)
            .iter()
            .filter(|tour| ids.contains(&tour.id()))
            .cloned()
            .collect())
    }

    async fn list_active(&self) -> Result<Vec<Tour>, TourRepositoryError> {
        Ok(lock(&self.tours)
            .iter()
            .filter(|tour| !tour.is_archived())
            .cloned()
            .collect())
    }

    async fn update(&self, tour: &Tour) -> Result<bool, TourRepositoryError> {
        let mut tours = lock(&self.tours);
        match tours.iter_mut().find(|stored| stored.id() == tour.id()) {
            Some(slot) => {
                *slot = tour.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn is_empty(&self) -> Result<bool, TourRepositoryError> {
        Ok(lock(&self.tours).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::test_support::sample_draft;

    fn tour(name: &str) -> Tour {
        Tour::create(TourId::random(), sample_draft(name, 100), Utc::now()).expect("valid tour")
    }

    #[rstest]
    #[tokio::test]
    async fn archived_tours_leave_the_active_list_only() {
        let repo = InMemoryTourRepository::new();
        let kept = tour("Kept");
        let gone = tour("Gone");
        repo.insert(&kept).await.expect("insert");
        repo.insert(&gone).await.expect("insert");

        let archived = gone.clone().archived(Utc::now());
        assert!(repo.update(&archived).await.expect("update"));

        let active = repo.list_active().await.expect("list");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id(), kept.id());
        let found = repo.find(gone.id()).await.expect("find").expect("still stored");
        assert!(found.is_archived());
        assert_eq!(repo.find_many(&[gone.id()]).await.expect("many").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn listing_keeps_insertion_order() {
        let repo = InMemoryTourRepository::new();
        assert!(repo.is_empty().await.expect("empty"));
        for name in ["First", "Second", "Third"] {
            repo.insert(&tour(name)).await.expect("insert");
        }
        let names: Vec<String> = repo
            .list_active()
            .await
            .expect("list")
            .iter()
            .map(|tour| tour.name().to_owned())
            .collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[rstest]
    #[tokio::test]
    async fn updating_an_unknown_tour_reports_false() {
        let repo = InMemoryTourRepository::new();
        assert!(!repo.update(&tour("Nowhere")).await.expect("update"));
    }
}
