//! Tour catalogue handlers.
//!
//! ```text
//! GET /api/tours?search=paris&minPrice=100&maxPrice=500&sort=price_asc
//! GET /api/tours/{id}
//! POST /api/tours            (admin)
//! PUT /api/tours/{id}        (admin, partial)
//! DELETE /api/tours/{id}     (admin)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{FieldErrors, TourDraft, TourId, TourPatch, TourQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse, TourResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_date, parse_uuid};

/// Catalogue filters. Empty values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct TourListQuery {
    /// Substring of the name or location.
    pub search: Option<String>,
    /// Substring of the location.
    pub location: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<String>,
    /// Inclusive upper price bound.
    pub max_price: Option<String>,
    /// Exact duration in days.
    pub duration: Option<String>,
    /// `true` or `false`.
    pub featured: Option<String>,
    /// `budget`, `mid` or `luxury`.
    pub price_range: Option<String>,
    /// `short`, `medium` or `long`.
    pub duration_range: Option<String>,
    /// `newest` (default), `price_asc` or `price_desc`.
    pub sort: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
}

fn parse_number(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<String>,
) -> Option<u32> {
    let raw = present(value)?;
    raw.parse::<u32>()
        .map_err(|_| {
            errors.push(
                field,
                "invalid_number",
                format!("{field} must be a non-negative whole number"),
            );
        })
        .ok()
}

fn parse_choice<T>(errors: &mut FieldErrors, value: Option<String>) -> Option<T>
where
    T: std::str::FromStr<Err = FieldErrors>,
{
    let raw = present(value)?;
    raw.parse::<T>().map_err(|err| errors.extend(err)).ok()
}

impl TryFrom<TourListQuery> for TourQuery {
    type Error = FieldErrors;

    fn try_from(value: TourListQuery) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let min_price = parse_number(&mut errors, "minPrice", value.min_price);
        let max_price = parse_number(&mut errors, "maxPrice", value.max_price);
        let duration = parse_number(&mut errors, "duration", value.duration);
        let featured = match present(value.featured).as_deref() {
            None => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(_) => {
                errors.push("featured", "invalid_bool", "featured must be true or false");
                None
            }
        };
        let price_band = parse_choice(&mut errors, value.price_range);
        let duration_band = parse_choice(&mut errors, value.duration_range);
        let sort = parse_choice(&mut errors, value.sort).unwrap_or_default();

        errors
            .finish(Self {
                search: present(value.search),
                location: present(value.location),
                min_price,
                max_price,
                duration,
                featured,
                price_band,
                duration_band,
                sort,
            })?
            .validate()
    }
}

/// Fields of a new tour. Unlisted optional fields take their defaults.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TourRequest {
    #[schema(example = "Paris City Explorer")]
    pub name: String,
    pub description: String,
    #[schema(example = 299)]
    pub price: Option<i64>,
    #[schema(example = 3)]
    pub duration: Option<i64>,
    #[schema(example = 15)]
    pub max_group_size: Option<i64>,
    #[schema(example = "Paris, France")]
    pub location: String,
    pub image: String,
    pub images: Vec<String>,
    pub featured: bool,
    pub rating: f32,
    pub num_reviews: i64,
    #[schema(example = "easy")]
    pub difficulty: Option<String>,
    #[schema(example = "city")]
    pub category: Option<String>,
    #[schema(example = json!(["2026-09-01"]))]
    pub start_dates: Vec<String>,
    pub available: Option<bool>,
}

fn required(errors: &mut FieldErrors, field: &'static str, value: Option<i64>) -> i64 {
    value.unwrap_or_else(|| {
        errors.push(field, "required", format!("Please provide {field}"));
        0
    })
}

fn parse_dates(errors: &mut FieldErrors, raw: &[String]) -> Vec<chrono::NaiveDate> {
    raw.iter()
        .filter_map(|value| {
            parse_date(value, "startDates")
                .map_err(|err| errors.extend(err))
                .ok()
        })
        .collect()
}

impl TryFrom<TourRequest> for TourDraft {
    type Error = FieldErrors;

    fn try_from(value: TourRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let price = required(&mut errors, "price", value.price);
        let duration = required(&mut errors, "duration", value.duration);
        let max_group_size = required(&mut errors, "maxGroupSize", value.max_group_size);
        let start_dates = parse_dates(&mut errors, &value.start_dates);

        errors.finish(Self {
            name: value.name,
            description: value.description,
            price,
            duration,
            max_group_size,
            location: value.location,
            image: value.image,
            images: value.images,
            featured: value.featured,
            rating: value.rating,
            num_reviews: value.num_reviews,
            difficulty: value.difficulty,
            category: value.category,
            start_dates,
            available: value.available.unwrap_or(true),
        })
    }
}

/// Partial tour update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TourPatchRequest {
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
    pub start_dates: Option<Vec<String>>,
    pub available: Option<bool>,
}

impl TryFrom<TourPatchRequest> for TourPatch {
    type Error = FieldErrors;

    fn try_from(value: TourPatchRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let start_dates = value
            .start_dates
            .map(|raw| parse_dates(&mut errors, &raw));

        errors.finish(Self {
            name: value.name,
            description: value.description,
            price: value.price,
            duration: value.duration,
            max_group_size: value.max_group_size,
            location: value.location,
            image: value.image,
            images: value.images,
            featured: value.featured,
            rating: value.rating,
            num_reviews: value.num_reviews,
            difficulty: value.difficulty,
            category: value.category,
            start_dates,
            available: value.available,
        })
    }
}

fn tour_id(raw: &str) -> ApiResult<TourId> {
    parse_uuid(raw, "id").map(TourId::from)
}

/// List catalogue tours matching every supplied filter.
#[utoipa::path(
    get,
    path = "/api/tours",
    params(TourListQuery),
    responses(
        (status = 200, description = "Matching tours", body = [TourResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["tours"],
    operation_id = "listTours",
    security([])
)]
#[get("/tours")]
pub async fn list_tours(
    state: web::Data<HttpState>,
    query: web::Query<TourListQuery>,
) -> ApiResult<web::Json<Vec<TourResponse>>> {
    let query = TourQuery::try_from(query.into_inner())?;
    let tours = state.tours.list(&query).await?;
    Ok(web::Json(tours.iter().map(TourResponse::from).collect()))
}

/// Fetch one catalogue tour.
#[utoipa::path(
    get,
    path = "/api/tours/{id}",
    params(("id" = String, Path, description = "Tour id")),
    responses(
        (status = 200, description = "Tour", body = TourResponse),
        (status = 404, description = "Tour not found", body = ErrorSchema)
    ),
    tags = ["tours"],
    operation_id = "getTour",
    security([])
)]
#[get("/tours/{id}")]
pub async fn get_tour(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TourResponse>> {
    let tour = state.tours.get(tour_id(&path)?).await?;
    Ok(web::Json(TourResponse::from(&tour)))
}

/// Add a tour to the catalogue.
#[utoipa::path(
    post,
    path = "/api/tours",
    request_body = TourRequest,
    responses(
        (status = 201, description = "Tour created", body = TourResponse),
        (status = 400, description = "Invalid fields", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["tours"],
    operation_id = "createTour"
)]
#[post("/tours")]
pub async fn create_tour(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TourRequest>,
) -> ApiResult<HttpResponse> {
    let actor = state.identify(&session).await?;
    let draft = TourDraft::try_from(payload.into_inner())?;
    let tour = state.tour_admin.create(&actor, draft).await?;
    Ok(HttpResponse::Created().json(TourResponse::from(&tour)))
}

/// Change some fields of a tour.
#[utoipa::path(
    put,
    path = "/api/tours/{id}",
    params(("id" = String, Path, description = "Tour id")),
    request_body = TourPatchRequest,
    responses(
        (status = 200, description = "Tour updated", body = TourResponse),
        (status = 400, description = "Invalid fields", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Tour not found", body = ErrorSchema)
    ),
    tags = ["tours"],
    operation_id = "updateTour"
)]
#[put("/tours/{id}")]
pub async fn update_tour(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TourPatchRequest>,
) -> ApiResult<web::Json<TourResponse>> {
    let actor = state.identify(&session).await?;
    let id = tour_id(&path)?;
    let patch = TourPatch::try_from(payload.into_inner())?;
    let tour = state.tour_admin.update(&actor, id, patch).await?;
    Ok(web::Json(TourResponse::from(&tour)))
}

/// Remove a tour from the catalogue. Existing bookings keep their summary.
#[utoipa::path(
    delete,
    path = "/api/tours/{id}",
    params(("id" = String, Path, description = "Tour id")),
    responses(
        (status = 200, description = "Tour deleted", body = MessageResponse),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Tour not found", body = ErrorSchema)
    ),
    tags = ["tours"],
    operation_id = "deleteTour"
)]
#[delete("/tours/{id}")]
pub async fn delete_tour(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = state.identify(&session).await?;
    state.tour_admin.delete(&actor, tour_id(&path)?).await?;
    Ok(web::Json(MessageResponse::new("Tour deleted successfully")))
}
