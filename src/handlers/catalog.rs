use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::booking::alternatives::{find_alternatives, BookingSuggestion};
use crate::booking::availability::check_seat_availability;
use crate::booking::seating::find_consecutive_seats;
use crate::entities::booking::{self, BookingStatus};
use crate::entities::seat::SeatCategory;
use crate::entities::{movie, seat, show};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all movies
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<movie::Model>>> {
    let movies = movie::Entity::find()
        .order_by_asc(movie::Column::Title)
        .all(&state.db)
        .await?;
    Ok(Json(movies))
}

/// Get movie details
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> AppResult<Json<movie::Model>> {
    let found = movie::Entity::find_by_id(movie_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;
    Ok(Json(found))
}

/// List a movie's shows, soonest first
pub async fn movie_shows(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> AppResult<Json<Vec<show::Model>>> {
    let shows = show::Entity::find()
        .filter(show::Column::MovieId.eq(movie_id))
        .order_by_asc(show::Column::ShowDate)
        .order_by_asc(show::Column::StartTime)
        .all(&state.db)
        .await?;
    Ok(Json(shows))
}

/// Get show details
pub async fn get_show(
    State(state): State<AppState>,
    Path(show_id): Path<i32>,
) -> AppResult<Json<show::Model>> {
    let found = show::Entity::find_by_id(show_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Show not found".to_string()))?;
    Ok(Json(found))
}

#[derive(Debug, Serialize)]
pub struct SeatStatus {
    pub id: i32,
    pub row_number: i32,
    pub seat_number: i32,
    pub category: SeatCategory,
    pub is_aisle: bool,
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct SeatMapResponse {
    pub show_id: i32,
    pub total_seats: usize,
    pub available_seats: usize,
    pub seats: Vec<SeatStatus>,
}

/// Seat map for a show with per-seat availability. Totals are derived from
/// the hall's seat layout, never from booking counts.
pub async fn show_seats(
    State(state): State<AppState>,
    Path(show_id): Path<i32>,
) -> AppResult<Json<SeatMapResponse>> {
    let found = show::Entity::find_by_id(show_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Show not found".to_string()))?;

    let seats = seat::Entity::find()
        .filter(seat::Column::HallId.eq(found.hall_id))
        .order_by_asc(seat::Column::RowNumber)
        .order_by_asc(seat::Column::SeatNumber)
        .all(&state.db)
        .await?;

    let booked: HashSet<i32> = booking::Entity::find()
        .filter(booking::Column::ShowId.eq(show_id))
        .filter(booking::Column::Status.eq(BookingStatus::Confirmed))
        .all(&state.db)
        .await?
        .iter()
        .map(|b| b.seat_id)
        .collect();

    let seats: Vec<SeatStatus> = seats
        .into_iter()
        .map(|s| SeatStatus {
            available: !booked.contains(&s.id),
            id: s.id,
            row_number: s.row_number,
            seat_number: s.seat_number,
            category: s.category,
            is_aisle: s.is_aisle,
        })
        .collect();

    let total_seats = seats.len();
    let available_seats = seats.iter().filter(|s| s.available).count();

    Ok(Json(SeatMapResponse {
        show_id,
        total_seats,
        available_seats,
        seats,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ConsecutiveQuery {
    pub seats: u32,
}

#[derive(Debug, Serialize)]
pub struct ConsecutiveResponse {
    pub show_id: i32,
    pub seat_ids: Vec<i32>,
}

/// Find a consecutive block for a show without booking it
pub async fn consecutive_seats(
    State(state): State<AppState>,
    Path(show_id): Path<i32>,
    Query(query): Query<ConsecutiveQuery>,
) -> AppResult<Json<ConsecutiveResponse>> {
    let seat_ids = find_consecutive_seats(&state.db, show_id, query.seats).await?;
    Ok(Json(ConsecutiveResponse { show_id, seat_ids }))
}

#[derive(Debug, Deserialize)]
pub struct AlternativesQuery {
    pub seats: u32,
    pub exclude_date: Option<NaiveDate>,
}

/// Alternative shows of a movie that can seat the party together
pub async fn alternatives(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
    Query(query): Query<AlternativesQuery>,
) -> AppResult<Json<Vec<BookingSuggestion>>> {
    if query.seats == 0 {
        return Err(AppError::BadRequest(
            "Seat count must be at least 1".to_string(),
        ));
    }

    movie::Entity::find_by_id(movie_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    let suggestions =
        find_alternatives(&state.db, movie_id, query.seats, query.exclude_date).await?;
    Ok(Json(suggestions))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub show_id: i32,
    pub seat_ids: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub show_id: i32,
    pub all_available: bool,
    pub unavailable_seat_ids: Vec<i32>,
}

/// Check whether specific seats are free for a show
pub async fn availability(
    State(state): State<AppState>,
    Json(payload): Json<AvailabilityRequest>,
) -> AppResult<Json<AvailabilityResponse>> {
    // Reject unknown shows before probing bookings
    show::Entity::find_by_id(payload.show_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Show not found".to_string()))?;

    let report = check_seat_availability(&state.db, payload.show_id, &payload.seat_ids).await?;

    Ok(Json(AvailabilityResponse {
        show_id: payload.show_id,
        all_available: report.all_available,
        unavailable_seat_ids: report.unavailable_seat_ids,
    }))
}
