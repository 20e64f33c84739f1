//! Bookings and the rules that govern their lifecycle.
//!
//! Dates are calendar dates with no time zone attached. Comparisons against
//! "today" use the UTC calendar date of the injected clock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use super::{BookingId, Error, FieldErrors, Tour, TourId, UserId};

/// Minimum lead time, in whole days, for self-service cancellation.
pub const CANCELLATION_CUTOFF_DAYS: i64 = 7;

/// Largest total price a booking may carry; stores keep it as a signed
/// 64-bit integer.
pub const MAX_TOTAL_PRICE: u64 = i64::MAX.unsigned_abs();

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    /// Awaiting confirmation.
    #[default]
    Pending,
    /// Confirmed by an administrator.
    Confirmed,
    /// Cancelled by the owner or an administrator.
    Cancelled,
}

impl BookingStatus {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the booking still holds its `(user, tour, date)` slot.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = FieldErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(FieldErrors::single(
                "status",
                "unsupported",
                "status must be one of: pending, confirmed, cancelled",
            )),
        }
    }
}

/// Business-rule violations raised by the booking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingRuleViolation {
    /// Requested headcount is zero or above the tour's group size.
    #[error("Maximum group size for this tour is {max_group_size}")]
    CapacityExceeded { max_group_size: u32 },
    /// The caller already holds an active booking for this tour and date.
    #[error("You already have a booking for this tour on this date")]
    DuplicateBooking,
    /// The booking starts in fewer than [`CANCELLATION_CUTOFF_DAYS`] days.
    #[error("Bookings can only be cancelled at least 7 days before the start date")]
    CutoffViolation { days_until_start: i64 },
    /// The booking was cancelled before.
    #[error("Booking is already cancelled")]
    AlreadyCancelled,
    /// The tour is not currently open for bookings.
    #[error("This tour is not available for booking")]
    TourUnavailable,
    /// `participants × price` does not fit in [`MAX_TOTAL_PRICE`].
    #[error("Total price for this booking is too large")]
    TotalPriceOverflow,
}

impl BookingRuleViolation {
    /// Stable machine-readable reason.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::DuplicateBooking => "duplicate_booking",
            Self::CutoffViolation { .. } => "cutoff_violation",
            Self::AlreadyCancelled => "already_cancelled",
            Self::TourUnavailable => "tour_unavailable",
            Self::TotalPriceOverflow => "total_price_overflow",
        }
    }
}

impl From<BookingRuleViolation> for Error {
    fn from(value: BookingRuleViolation) -> Self {
        let details = match value {
            BookingRuleViolation::CapacityExceeded { max_group_size } => {
                json!({ "code": value.code(), "maxGroupSize": max_group_size })
            }
            BookingRuleViolation::CutoffViolation { days_until_start } => json!({
                "code": value.code(),
                "daysUntilStart": days_until_start,
                "cutoffDays": CANCELLATION_CUTOFF_DAYS,
            }),
            BookingRuleViolation::TotalPriceOverflow => json!({
                "code": value.code(),
                "field": "participants",
                "maxTotalPrice": MAX_TOTAL_PRICE,
            }),
            _ => json!({ "code": value.code() }),
        };
        Self::invalid_request(value.to_string()).with_details(details)
    }
}

/// Contact snapshot captured when the booking was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    name: String,
    email: String,
    phone: String,
}

impl ContactInfo {
    /// Validate that every contact field is present.
    ///
    /// # Errors
    /// Returns [`FieldErrors`] naming each blank field.
    pub fn new(name: &str, email: &str, phone: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        for (field, value) in [
            ("contactInfo.name", name),
            ("contactInfo.email", email),
            ("contactInfo.phone", phone),
        ] {
            if value.trim().is_empty() {
                errors.push(field, "empty", format!("{field} is required"));
            }
        }
        errors.finish(Self {
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            phone: phone.trim().to_owned(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Reservation of a tour date by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub tour_id: TourId,
    pub date: NaiveDate,
    pub participants: u32,
    pub total_price: u64,
    pub status: BookingStatus,
    pub contact: ContactInfo,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Create a pending booking priced from the tour.
    ///
    /// # Errors
    /// Returns [`BookingRuleViolation::CapacityExceeded`] when `participants`
    /// is zero or larger than the tour allows, and
    /// [`BookingRuleViolation::TotalPriceOverflow`] when the total does not
    /// fit in [`MAX_TOTAL_PRICE`].
    pub fn price_for(
        tour: &Tour,
        user_id: UserId,
        date: NaiveDate,
        participants: u32,
        contact: ContactInfo,
        created_at: DateTime<Utc>,
    ) -> Result<Self, BookingRuleViolation> {
        if participants == 0 || participants > tour.max_group_size() {
            return Err(BookingRuleViolation::CapacityExceeded {
                max_group_size: tour.max_group_size(),
            });
        }
        let total_price = u64::from(participants)
            .checked_mul(u64::from(tour.price()))
            .filter(|total| *total <= MAX_TOTAL_PRICE)
            .ok_or(BookingRuleViolation::TotalPriceOverflow)?;
        Ok(Self {
            id: BookingId::random(),
            user_id,
            tour_id: tour.id(),
            date,
            participants,
            total_price,
            status: BookingStatus::Pending,
            contact,
            created_at,
        })
    }

    /// Whole calendar days from `today` until the booking date.
    #[must_use]
    pub fn days_until_start(&self, today: NaiveDate) -> i64 {
        self.date.signed_duration_since(today).num_days()
    }

    /// Check the owner-cancellation rules for `today`.
    ///
    /// # Errors
    /// Returns [`BookingRuleViolation::AlreadyCancelled`] or
    /// [`BookingRuleViolation::CutoffViolation`].
    pub fn ensure_cancellable(&self, today: NaiveDate) -> Result<(), BookingRuleViolation> {
        if self.status == BookingStatus::Cancelled {
            return Err(BookingRuleViolation::AlreadyCancelled);
        }
        let days_until_start = self.days_until_start(today);
        if days_until_start < CANCELLATION_CUTOFF_DAYS {
            return Err(BookingRuleViolation::CutoffViolation { days_until_start });
        }
        Ok(())
    }
}
