//! Port abstraction for the tour catalogue store.
use async_trait::async_trait;

use crate::domain::{Tour, TourId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by tour repository adapters.
    pub enum TourRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "tour repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "tour repository query failed: {message}",
    }
}

/// Store of catalogue entries.
///
/// Tours are never removed; deletion archives them. Lookups by id return
/// archived tours too so bookings can still describe what was booked.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// Persist a new tour.
    async fn insert(&self, tour: &Tour) -> Result<(), TourRepositoryError>;

    /// Fetch a tour by id, archived or not.
    async fn find(&self, id: TourId) -> Result<Option<Tour>, TourRepositoryError>;

    /// Fetch every tour whose id is in `ids`, archived or not.
    async fn find_many(&self, ids: &[TourId]) -> Result<Vec<Tour>, TourRepositoryError>;

    /// Non-archived tours in insertion order.
    async fn list_active(&self) -> Result<Vec<Tour>, TourRepositoryError>;

    /// Overwrite a stored tour. Returns `false` when the id is unknown.
    async fn update(&self, tour: &Tour) -> Result<bool, TourRepositoryError>;

    /// Whether the store holds no tours at all.
    async fn is_empty(&self) -> Result<bool, TourRepositoryError>;
}
