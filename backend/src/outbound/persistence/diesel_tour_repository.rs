//! PostgreSQL-backed [`TourRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TourRepository, TourRepositoryError};
use crate::domain::{StoredTour, Tour, TourDraft, TourId};

use super::error_mapping::{DieselFailure, classify};
use super::models::{TourRow, TourValues};
use super::pool::{DbPool, PoolError};
use super::schema::tours;

#[derive(Clone)]
pub struct DieselTourRepository {
    pool: DbPool,
}

impl DieselTourRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TourRepositoryError {
    TourRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> TourRepositoryError {
    match classify(&error) {
        DieselFailure::Connection(message) => TourRepositoryError::connection(message),
        DieselFailure::UniqueViolation => TourRepositoryError::query("tour id already exists"),
        DieselFailure::Query(message) => TourRepositoryError::query(message),
    }
}

fn row_to_tour(row: TourRow) -> Result<Tour, TourRepositoryError> {
    let id = row.id;
    Tour::from_stored(StoredTour {
        id: TourId::from_uuid(row.id),
        created_at: row.created_at,
        archived_at: row.archived_at,
        draft: TourDraft {
            name: row.name,
            description: row.description,
            price: row.price,
            duration: row.duration,
            max_group_size: row.max_group_size,
            location: row.location,
            image: row.image,
            images: row.images,
            featured: row.featured,
            rating: row.rating,
            num_reviews: row.num_reviews,
            difficulty: Some(row.difficulty),
            category: Some(row.category),
            start_dates: row.start_dates,
            available: row.available,
        },
    })
    .map_err(|err| TourRepositoryError::query(format!("stored tour {id} is invalid: {err}")))
}

fn values(tour: &Tour) -> TourValues<'_> {
    TourValues {
        id: *tour.id().as_uuid(),
        name: tour.name(),
        description: tour.description(),
        price: i64::from(tour.price()),
        duration: i64::from(tour.duration()),
        max_group_size: i64::from(tour.max_group_size()),
        location: tour.location(),
        image: tour.image(),
        images: tour.images(),
        featured: tour.featured(),
        rating: tour.rating(),
        num_reviews: i64::from(tour.num_reviews()),
        difficulty: tour.difficulty().as_str(),
        category: tour.category().as_str(),
        start_dates: tour.start_dates(),
        available: tour.available(),
        created_at: tour.created_at(),
        archived_at: tour.archived_at(),
    }
}

#[async_trait]
impl TourRepository for DieselTourRepository {
    async fn insert(&self, tour: &Tour) -> Result<(), TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(tours::table)
            .values(&values(tour))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(&self, id: TourId) -> Result<Option<Tour>, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = tours::table
            .find(id.as_uuid())
            .select(TourRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_tour).transpose()
    }

    async fn find_many(&self, ids: &[TourId]) -> Result<Vec<Tour>, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<TourRow> = tours::table
            .filter(tours::id.eq_any(uuids))
            .order(tours::seq.asc())
            .select(TourRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_tour).collect()
    }

    async fn list_active(&self) -> Result<Vec<Tour>, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TourRow> = tours::table
            .filter(tours::archived_at.is_null())
            .order(tours::seq.asc())
            .select(TourRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_tour).collect()
    }

    async fn update(&self, tour: &Tour) -> Result<bool, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(tours::table.find(tour.id().as_uuid()))
            .set(&values(tour))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated == 1)
    }

    async fn is_empty(&self) -> Result<bool, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let any: bool = diesel::select(diesel::dsl::exists(tours::table.select(tours::id)))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(!any)
    }
}
