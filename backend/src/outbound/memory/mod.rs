//! In-process adapters for every driven store.
//!
//! Used when no database URL is configured and by the test suites. Each
//! store keeps its state behind one `Mutex`, so uniqueness checks and the
//! writes they guard happen atomically.

mod bookings;
mod sessions;
mod tours;
mod users;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use bookings::InMemoryBookingRepository;
pub use sessions::InMemorySessionStore;
pub use tours::InMemoryTourRepository;
pub use users::InMemoryUserRepository;

/// Lock `mutex`, recovering the data if a previous holder panicked.
///
/// Every critical section leaves the data consistent before it can panic,
/// so a poisoned lock still guards valid state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
