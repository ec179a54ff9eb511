use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::booking::coordinator;
use crate::entities::booking::{self, BookingStatus};
use crate::entities::{movie, show};
use crate::error::AppResult;
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub show_id: i32,
    pub seat_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct GroupBookingRequest {
    pub show_id: i32,
    pub seat_ids: Vec<i32>,
    /// When set, an unavailable-seats rejection carries alternative shows
    /// instead of only naming the seats that were taken.
    #[serde(default)]
    pub best_effort: bool,
}

#[derive(Debug, Deserialize)]
pub struct ConsecutiveBookingRequest {
    pub show_id: i32,
    pub seats: u32,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i32,
    pub reference: String,
    pub show_id: i32,
    pub seat_id: i32,
    pub amount_paid: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<booking::Model> for BookingResponse {
    fn from(b: booking::Model) -> Self {
        Self {
            id: b.id,
            reference: b.reference,
            show_id: b.show_id,
            seat_id: b.seat_id,
            amount_paid: b.amount_paid,
            status: b.status,
            created_at: b.created_at.with_timezone(&Utc),
        }
    }
}

/// Book a single seat
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    let created =
        coordinator::book_single(&state.db, claims.sub, payload.show_id, payload.seat_id).await?;
    Ok(Json(created.into()))
}

/// Book a set of seats together
pub async fn create_group_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<GroupBookingRequest>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let created = coordinator::book_group(
        &state.db,
        claims.sub,
        payload.show_id,
        payload.seat_ids,
        payload.best_effort,
    )
    .await?;
    Ok(Json(created.into_iter().map(Into::into).collect()))
}

/// Find and book a consecutive block
pub async fn create_consecutive_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ConsecutiveBookingRequest>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let created =
        coordinator::book_consecutive(&state.db, claims.sub, payload.show_id, payload.seats)
            .await?;
    Ok(Json(created.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub movie_title: String,
    pub show_date: NaiveDate,
    pub start_time: NaiveTime,
}

/// List the caller's bookings, newest first
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::UserId.eq(claims.sub))
        .order_by_desc(booking::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let shows = show::Entity::find().all(&state.db).await?;
    let movies = movie::Entity::find().all(&state.db).await?;

    let responses: Vec<BookingDetails> = bookings
        .into_iter()
        .filter_map(|b| {
            let show = shows.iter().find(|s| s.id == b.show_id)?;
            let movie = movies.iter().find(|m| m.id == show.movie_id)?;

            Some(BookingDetails {
                movie_title: movie.title.clone(),
                show_date: show.show_date,
                start_time: show.start_time,
                booking: b.into(),
            })
        })
        .collect();

    Ok(Json(responses))
}

/// Cancel one of the caller's bookings
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<BookingResponse>> {
    let cancelled = coordinator::cancel(&state.db, booking_id, Some(claims.sub)).await?;
    Ok(Json(cancelled.into()))
}
