//! Driving ports for browsing and curating the tour catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Tour, TourDraft, TourId, TourPatch, TourQuery};

/// Public catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourCatalogue: Send + Sync {
    /// Active tours matching `query`, in the requested order.
    async fn list(&self, query: &TourQuery) -> Result<Vec<Tour>, Error>;

    /// A single active tour.
    async fn get(&self, id: TourId) -> Result<Tour, Error>;
}

/// Admin-only catalogue mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourCommand: Send + Sync {
    /// Validate and add a tour.
    async fn create(&self, actor: &Identity, draft: TourDraft) -> Result<Tour, Error>;

    /// Apply a partial update to an active tour.
    async fn update(&self, actor: &Identity, id: TourId, patch: TourPatch) -> Result<Tour, Error>;

    /// Archive an active tour.
    async fn delete(&self, actor: &Identity, id: TourId) -> Result<(), Error>;
}
