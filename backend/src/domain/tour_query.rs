//! Catalogue filtering and ordering.
//!
//! Filters are conjunctive. Sorting is stable so tours that compare equal
//! keep the order in which the store returned them (insertion order).

use std::str::FromStr;

use super::{FieldErrors, Tour};

/// Upper bound (exclusive) of the budget price band.
pub const BUDGET_PRICE_CEILING: u32 = 1000;
/// Lower bound (inclusive) of the luxury price band.
pub const LUXURY_PRICE_FLOOR: u32 = 2000;

/// Coarse price buckets offered by the catalogue UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    /// Below 1000.
    Budget,
    /// From 1000 up to, but excluding, 2000.
    Mid,
    /// 2000 and above.
    Luxury,
}

impl PriceBand {
    #[must_use]
    pub const fn contains(self, price: u32) -> bool {
        match self {
            Self::Budget => price < BUDGET_PRICE_CEILING,
            Self::Mid => price >= BUDGET_PRICE_CEILING && price < LUXURY_PRICE_FLOOR,
            Self::Luxury => price >= LUXURY_PRICE_FLOOR,
        }
    }
}

impl FromStr for PriceBand {
    type Err = FieldErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "budget" => Ok(Self::Budget),
            "mid" => Ok(Self::Mid),
            "luxury" => Ok(Self::Luxury),
            _ => Err(FieldErrors::single(
                "priceRange",
                "unsupported",
                "priceRange must be one of: budget, mid, luxury",
            )),
        }
    }
}

/// Coarse duration buckets offered by the catalogue UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBand {
    /// Up to three days.
    Short,
    /// Four to seven days.
    Medium,
    /// More than a week.
    Long,
}

impl DurationBand {
    #[must_use]
    pub const fn contains(self, days: u32) -> bool {
        match self {
            Self::Short => days <= 3,
            Self::Medium => days >= 4 && days <= 7,
            Self::Long => days > 7,
        }
    }
}

impl FromStr for DurationBand {
    type Err = FieldErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(FieldErrors::single(
                "durationRange",
                "unsupported",
                "durationRange must be one of: short, medium, long",
            )),
        }
    }
}

/// Catalogue ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TourSort {
    /// Most recently created first.
    #[default]
    Newest,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl FromStr for TourSort {
    type Err = FieldErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "newest" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            _ => Err(FieldErrors::single(
                "sort",
                "unsupported",
                "sort must be one of: newest, price_asc, price_desc",
            )),
        }
    }
}

/// Catalogue filter set. Every populated field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourQuery {
    /// Case-insensitive substring of the name or location.
    pub search: Option<String>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<u32>,
    /// Inclusive upper price bound.
    pub max_price: Option<u32>,
    /// Exact duration in days.
    pub duration: Option<u32>,
    /// Exact match on the featured flag.
    pub featured: Option<bool>,
    pub price_band: Option<PriceBand>,
    pub duration_band: Option<DurationBand>,
    pub sort: TourSort,
}

impl TourQuery {
    /// Check cross-field constraints.
    ///
    /// # Errors
    /// Returns [`FieldErrors`] when `minPrice` exceeds `maxPrice`.
    pub fn validate(self) -> Result<Self, FieldErrors> {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min > max => Err(FieldErrors::single(
                "minPrice",
                "range_inverted",
                "minPrice must not exceed maxPrice",
            )),
            _ => Ok(self),
        }
    }

    /// Whether `tour` satisfies every populated filter.
    #[must_use]
    pub fn matches(&self, tour: &Tour) -> bool {
        let name = tour.name().to_lowercase();
        let location = tour.location().to_lowercase();

        self.search
            .as_deref()
            .map(normalise)
            .is_none_or(|needle| name.contains(&needle) || location.contains(&needle))
            && self
                .location
                .as_deref()
                .map(normalise)
                .is_none_or(|needle| location.contains(&needle))
            && self.min_price.is_none_or(|min| tour.price() >= min)
            && self.max_price.is_none_or(|max| tour.price() <= max)
            && self.duration.is_none_or(|days| tour.duration() == days)
            && self.featured.is_none_or(|flag| tour.featured() == flag)
            && self.price_band.is_none_or(|band| band.contains(tour.price()))
            && self
                .duration_band
                .is_none_or(|band| band.contains(tour.duration()))
    }

    /// Filter then order `tours`, which must be in insertion order.
    #[must_use]
    pub fn apply(&self, tours: Vec<Tour>) -> Vec<Tour> {
        let mut selected: Vec<Tour> = tours.into_iter().filter(|tour| self.matches(tour)).collect();
        match self.sort {
            TourSort::Newest => selected.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
            TourSort::PriceAsc => selected.sort_by_key(Tour::price),
            TourSort::PriceDesc => selected.sort_by(|a, b| b.price().cmp(&a.price())),
        }
        selected
    }
}

fn normalise(raw: &str) -> String {
    raw.trim().to_lowercase()
}
