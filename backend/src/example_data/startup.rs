//! Seed the demo catalogue into an empty tour store.

use chrono::TimeDelta;
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{TourRepository, TourRepositoryError};
use crate::domain::{FieldErrors, Tour, TourId};
use crate::example_data::demo_tours;

/// Errors returned while seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    #[error("tour store error while seeding: {0}")]
    Store(#[from] TourRepositoryError),
    #[error("demo tour '{name}' failed validation: {source}")]
    InvalidDemoTour {
        name: String,
        #[source]
        source: FieldErrors,
    },
}

/// What seeding did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Applied { tours: usize },
    AlreadySeeded,
}

/// Insert the demo tours when the store holds no tours at all.
///
/// Archived tours count as content, so an operator who deleted the demo
/// catalogue does not get it back on restart. Creation timestamps are
/// staggered by a second so "newest" lists the last demo tour first.
///
/// # Errors
/// Returns [`StartupSeedingError`] when the store fails or a demo tour no
/// longer validates.
pub async fn seed_tours_on_startup<T>(
    tours: &T,
    clock: &(dyn Clock + Send + Sync),
) -> Result<SeedOutcome, StartupSeedingError>
where
    T: TourRepository + ?Sized,
{
    if !tours.is_empty().await? {
        info!(reason = "store not empty", "tour seeding skipped");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let start = clock.utc();
    let drafts = demo_tours();
    let count = drafts.len();
    for (offset, draft) in (0_i64..).zip(drafts) {
        let name = draft.name.clone();
        let tour = Tour::create(TourId::random(), draft, start + TimeDelta::seconds(offset))
            .map_err(|source| StartupSeedingError::InvalidDemoTour { name, source })?;
        tours.insert(&tour).await?;
    }

    info!(tours = count, "demo tours seeded");
    Ok(SeedOutcome::Applied { tours: count })
}
