//! Demo catalogue seeding at startup.

mod catalogue;
mod startup;

pub use catalogue::demo_tours;
pub use startup::{SeedOutcome, StartupSeedingError, seed_tours_on_startup};
