//! Tour catalogue entries.
//!
//! Admin input arrives as a [`TourDraft`] of loosely-typed values. Validation
//! turns it into a [`Tour`] or a list of field errors.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use super::{FieldErrors, TourId};

/// Maximum length of a tour name.
pub const TOUR_NAME_MAX: usize = 100;
/// Upper bound of the rating scale.
pub const RATING_MAX: f32 = 5.0;

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Wire and storage representation.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }

            /// Every accepted value, for error messages.
            pub const ALL: &'static [&'static str] = &[$($text),+];
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $( $text => Ok(Self::$variant), )+
                    other => Err(other.to_owned()),
                }
            }
        }
    };
}

text_enum!(
    /// Physical difficulty of a tour.
    Difficulty {
        /// Suitable for everyone.
        Easy => "easy",
        /// Moderate effort.
        #[default]
        Medium => "medium",
        /// Demanding.
        Difficult => "difficult",
    }
);

text_enum!(
    /// Catalogue category of a tour.
    Category {
        /// Outdoor activity focus.
        #[default]
        Adventure => "adventure",
        /// Museums, history and heritage.
        Cultural => "cultural",
        /// Coastal trips.
        Beach => "beach",
        /// Hiking and alpine trips.
        Mountain => "mountain",
        /// Urban sightseeing.
        City => "city",
    }
);

/// Unvalidated tour fields supplied by an administrator.
#[derive(Debug, Clone, PartialEq)]
pub struct TourDraft {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration: i64,
    pub max_group_size: i64,
    pub location: String,
    pub image: String,
    pub images: Vec<String>,
    pub featured: bool,
    pub rating: f32,
    pub num_reviews: i64,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub start_dates: Vec<NaiveDate>,
    pub available: bool,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub duration: Option<i64>,
    pub max_group_size: Option<i64>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub rating: Option<f32>,
    pub num_reviews: Option<i64>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub start_dates: Option<Vec<NaiveDate>>,
    pub available: Option<bool>,
}

impl TourPatch {
    /// Overlay the patch on the current state of `tour`.
    #[must_use]
    pub fn apply_to(self, tour: &Tour) -> TourDraft {
        let current = tour.to_draft();
        TourDraft {
            name: self.name.unwrap_or(current.name),
            description: self.description.unwrap_or(current.description),
            price: self.price.unwrap_or(current.price),
            duration: self.duration.unwrap_or(current.duration),
            max_group_size: self.max_group_size.unwrap_or(current.max_group_size),
            location: self.location.unwrap_or(current.location),
            image: self.image.unwrap_or(current.image),
            images: self.images.unwrap_or(current.images),
            featured: self.featured.unwrap_or(current.featured),
            rating: self.rating.unwrap_or(current.rating),
            num_reviews: self.num_reviews.unwrap_or(current.num_reviews),
            difficulty: self.difficulty.or(current.difficulty),
            category: self.category.or(current.category),
            start_dates: self.start_dates.unwrap_or(current.start_dates),
            available: self.available.unwrap_or(current.available),
        }
    }
}

/// Validated catalogue entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    id: TourId,
    name: String,
    description: String,
    price: u32,
    duration: u32,
    max_group_size: u32,
    location: String,
    image: String,
    images: Vec<String>,
    featured: bool,
    rating: f32,
    num_reviews: u32,
    difficulty: Difficulty,
    category: Category,
    start_dates: Vec<NaiveDate>,
    available: bool,
    created_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
}

/// Parts of a stored tour, used by persistence adapters to rebuild it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTour {
    pub id: TourId,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
    pub draft: TourDraft,
}

impl Tour {
    /// Validate a draft into a new catalogue entry.
    ///
    /// # Errors
    /// Returns [`FieldErrors`] listing every invalid field.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use tour_booking::domain::{Tour, TourDraft, TourId};
    ///
    /// let draft = TourDraft {
    ///     name: "Paris City Explorer".into(),
    ///     description: "Eiffel Tower and the Louvre".into(),
    ///     price: 299,
    ///     duration: 3,
    ///     max_group_size: 15,
    ///     location: "Paris, France".into(),
    ///     image: "https://example.com/paris.jpg".into(),
    ///     images: vec![],
    ///     featured: true,
    ///     rating: 4.8,
    ///     num_reviews: 128,
    ///     difficulty: None,
    ///     category: Some("city".into()),
    ///     start_dates: vec![],
    ///     available: true,
    /// };
    /// let tour = Tour::create(TourId::random(), draft, Utc::now()).expect("valid tour");
    /// assert_eq!(tour.price(), 299);
    /// ```
    pub fn create(
        id: TourId,
        draft: TourDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, FieldErrors> {
        Self::from_stored(StoredTour {
            id,
            created_at,
            archived_at: None,
            draft,
        })
    }

    /// Rebuild a tour from stored parts, re-running validation.
    ///
    /// # Errors
    /// Returns [`FieldErrors`] when stored values violate tour invariants.
    pub fn from_stored(stored: StoredTour) -> Result<Self, FieldErrors> {
        let StoredTour {
            id,
            created_at,
            archived_at,
            draft,
        } = stored;
        let mut errors = FieldErrors::default();

        let name = draft.name.trim().to_owned();
        if name.is_empty() {
            errors.push("name", "empty", "Please provide a tour name");
        } else if name.chars().count() > TOUR_NAME_MAX {
            errors.push(
                "name",
                "too_long",
                format!("Tour name cannot be more than {TOUR_NAME_MAX} characters"),
            );
        }
        let description = required_text(
            &mut errors,
            "description",
            &draft.description,
            "Please provide a description",
        );
        let location = required_text(
            &mut errors,
            "location",
            &draft.location,
            "Please provide a location",
        );
        let image = required_text(
            &mut errors,
            "image",
            &draft.image,
            "Please provide an image URL",
        );

        let price = bounded(
            &mut errors,
            "price",
            draft.price,
            0,
            "Price cannot be negative",
        );
        let duration = bounded(
            &mut errors,
            "duration",
            draft.duration,
            1,
            "Duration must be at least 1 day",
        );
        let max_group_size = bounded(
            &mut errors,
            "maxGroupSize",
            draft.max_group_size,
            1,
            "Group size must be at least 1",
        );
        let num_reviews = bounded(
            &mut errors,
            "numReviews",
            draft.num_reviews,
            0,
            "Review count cannot be negative",
        );

        if !(0.0..=RATING_MAX).contains(&draft.rating) {
            errors.push("rating", "out_of_range", "Rating must be between 0 and 5");
        }

        let difficulty = parse_choice::<Difficulty>(
            &mut errors,
            "difficulty",
            draft.difficulty.as_deref(),
            Difficulty::ALL,
        );
        let category = parse_choice::<Category>(
            &mut errors,
            "category",
            draft.category.as_deref(),
            Category::ALL,
        );

        errors.finish(Self {
            id,
            name,
            description,
            price,
            duration,
            max_group_size,
            location,
            image,
            images: draft.images,
            featured: draft.featured,
            rating: draft.rating,
            num_reviews,
            difficulty,
            category,
            start_dates: draft.start_dates,
            available: draft.available,
            created_at,
            archived_at,
        })
    }

    /// Apply a patch, keeping identity and timestamps.
    ///
    /// # Errors
    /// Returns [`FieldErrors`] when the merged tour is invalid.
    pub fn revise(&self, patch: TourPatch) -> Result<Self, FieldErrors> {
        Self::from_stored(StoredTour {
            id: self.id,
            created_at: self.created_at,
            archived_at: self.archived_at,
            draft: patch.apply_to(self),
        })
    }

    /// Mark the tour archived at `at`.
    #[must_use]
    pub fn archived(mut self, at: DateTime<Utc>) -> Self {
        self.archived_at = Some(at);
        self
    }

    /// Current values expressed as a draft.
    #[must_use]
    pub fn to_draft(&self) -> TourDraft {
        TourDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: i64::from(self.price),
            duration: i64::from(self.duration),
            max_group_size: i64::from(self.max_group_size),
            location: self.location.clone(),
            image: self.image.clone(),
            images: self.images.clone(),
            featured: self.featured,
            rating: self.rating,
            num_reviews: i64::from(self.num_reviews),
            difficulty: Some(self.difficulty.as_str().to_owned()),
            category: Some(self.category.as_str().to_owned()),
            start_dates: self.start_dates.clone(),
            available: self.available,
        }
    }

    /// Summary embedded in booking listings.
    #[must_use]
    pub fn summary(&self) -> TourSummary {
        TourSummary {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            location: self.location.clone(),
            price: self.price,
            duration: self.duration,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TourId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price per participant in whole currency units.
    #[must_use]
    pub const fn price(&self) -> u32 {
        self.price
    }

    /// Length of the tour in days.
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    #[must_use]
    pub const fn max_group_size(&self) -> u32 {
        self.max_group_size
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    #[must_use]
    pub const fn featured(&self) -> bool {
        self.featured
    }

    #[must_use]
    pub const fn rating(&self) -> f32 {
        self.rating
    }

    #[must_use]
    pub const fn num_reviews(&self) -> u32 {
        self.num_reviews
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn start_dates(&self) -> &[NaiveDate] {
        &self.start_dates
    }

    /// Whether the tour is open for new bookings.
    #[must_use]
    pub const fn available(&self) -> bool {
        self.available
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the tour was removed from the catalogue, if it was.
    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Tour fields shown alongside a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourSummary {
    pub id: TourId,
    pub name: String,
    pub image: String,
    pub location: String,
    pub price: u32,
    pub duration: u32,
}

fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
    message: &str,
) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(field, "empty", message);
    }
    trimmed.to_owned()
}

fn bounded(
    errors: &mut FieldErrors,
    field: &'static str,
    value: i64,
    min: i64,
    message: &str,
) -> u32 {
    if value < min {
        errors.push(field, "too_small", message);
        return 0;
    }
    u32::try_from(value).unwrap_or_else(|_| {
        errors.push(field, "too_large", format!("{field} is too large"));
        0
    })
}

fn parse_choice<T>(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: Option<&str>,
    allowed: &[&str],
) -> T
where
    T: FromStr + Default,
{
    match raw {
        None => T::default(),
        Some(value) => value.parse().unwrap_or_else(|_| {
            errors.push(
                field,
                "unsupported",
                format!("{field} must be one of: {}", allowed.join(", ")),
            );
            T::default()
        }),
    }
}
