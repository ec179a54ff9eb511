use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::seat::SeatCategory;
use crate::entities::show::ShowStatus;
use crate::entities::{booking, hall, movie, seat, show, theater};
use crate::error::{AppError, AppResult};
use crate::AppState;

// ============ Theater Management ============

#[derive(Debug, Deserialize)]
pub struct CreateTheaterRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTheaterRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub contact_number: Option<String>,
}

/// Create a theater
pub async fn create_theater(
    State(state): State<AppState>,
    Json(payload): Json<CreateTheaterRequest>,
) -> AppResult<Json<theater::Model>> {
    let new_theater = theater::ActiveModel {
        name: Set(payload.name),
        address: Set(payload.address),
        city: Set(payload.city),
        state: Set(payload.state),
        contact_number: Set(payload.contact_number),
        ..Default::default()
    };

    let created = new_theater.insert(&state.db).await?;
    tracing::info!(theater_id = created.id, "theater created");
    Ok(Json(created))
}

/// List all theaters
pub async fn list_theaters(State(state): State<AppState>) -> AppResult<Json<Vec<theater::Model>>> {
    let theaters = theater::Entity::find()
        .order_by_asc(theater::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(theaters))
}

/// Update a theater
pub async fn update_theater(
    State(state): State<AppState>,
    Path(theater_id): Path<i32>,
    Json(payload): Json<UpdateTheaterRequest>,
) -> AppResult<Json<theater::Model>> {
    let existing = theater::Entity::find_by_id(theater_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Theater not found".to_string()))?;

    let mut active: theater::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(address) = payload.address {
        active.address = Set(address);
    }
    if let Some(city) = payload.city {
        active.city = Set(city);
    }
    if payload.state.is_some() {
        active.state = Set(payload.state);
    }
    if payload.contact_number.is_some() {
        active.contact_number = Set(payload.contact_number);
    }

    Ok(Json(active.update(&state.db).await?))
}

/// Delete a theater (halls, seats and shows cascade)
pub async fn delete_theater(
    State(state): State<AppState>,
    Path(theater_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let result = theater::Entity::delete_by_id(theater_id)
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Theater not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Theater deleted" })))
}

// ============ Hall Management ============

#[derive(Debug, Deserialize)]
pub struct CreateHallRequest {
    pub theater_id: i32,
    pub name: String,
    pub total_rows: i32,
}

/// Create a hall in a theater
pub async fn create_hall(
    State(state): State<AppState>,
    Json(payload): Json<CreateHallRequest>,
) -> AppResult<Json<hall::Model>> {
    if payload.total_rows < 1 {
        return Err(AppError::BadRequest(
            "A hall needs at least one row".to_string(),
        ));
    }

    theater::Entity::find_by_id(payload.theater_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Theater not found".to_string()))?;

    let new_hall = hall::ActiveModel {
        theater_id: Set(payload.theater_id),
        name: Set(payload.name),
        total_rows: Set(payload.total_rows),
        ..Default::default()
    };

    let created = new_hall.insert(&state.db).await?;
    tracing::info!(hall_id = created.id, "hall created");
    Ok(Json(created))
}

/// List a theater's halls
pub async fn theater_halls(
    State(state): State<AppState>,
    Path(theater_id): Path<i32>,
) -> AppResult<Json<Vec<hall::Model>>> {
    let halls = hall::Entity::find()
        .filter(hall::Column::TheaterId.eq(theater_id))
        .order_by_asc(hall::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(halls))
}

#[derive(Debug, Deserialize)]
pub struct RowLayout {
    pub row_number: i32,
    pub seats: i32,
    pub category: Option<SeatCategory>,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub hall_id: i32,
    pub seats_created: usize,
}

/// Provision a hall's seat layout, row by row. Layouts are write-once; seats
/// are immutable after provisioning.
pub async fn provision_layout(
    State(state): State<AppState>,
    Path(hall_id): Path<i32>,
    Json(rows): Json<Vec<RowLayout>>,
) -> AppResult<Json<LayoutResponse>> {
    hall::Entity::find_by_id(hall_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Hall not found".to_string()))?;

    if rows.is_empty() {
        return Err(AppError::BadRequest(
            "Layout must contain at least one row".to_string(),
        ));
    }

    let mut seen_rows = std::collections::HashSet::new();
    for row in &rows {
        if row.row_number < 1 {
            return Err(AppError::BadRequest(
                "Row numbers start at 1".to_string(),
            ));
        }
        if !seen_rows.insert(row.row_number) {
            return Err(AppError::BadRequest(format!(
                "Row {} appears more than once",
                row.row_number
            )));
        }
        if row.seats < 6 {
            return Err(AppError::BadRequest(format!(
                "Row {} must have at least 6 seats (got {})",
                row.row_number, row.seats
            )));
        }
    }

    let existing = seat::Entity::find()
        .filter(seat::Column::HallId.eq(hall_id))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Hall already has a seat layout".to_string(),
        ));
    }

    let mut models = Vec::new();
    for row in &rows {
        for seat_number in 1..=row.seats {
            models.push(seat::ActiveModel {
                hall_id: Set(hall_id),
                row_number: Set(row.row_number),
                seat_number: Set(seat_number),
                category: Set(row.category.unwrap_or(SeatCategory::Standard)),
                // Seats 3 and 4 flank the aisle in every row of the standard floor plan
                is_aisle: Set(seat_number == 3 || seat_number == 4),
                ..Default::default()
            });
        }
    }

    let seats_created = models.len();

    let txn = state.db.begin().await?;
    seat::Entity::insert_many(models).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(hall_id, seats_created, "hall layout provisioned");

    Ok(Json(LayoutResponse {
        hall_id,
        seats_created,
    }))
}

// ============ Movie Management ============

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub base_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub base_price: Option<f64>,
}

/// Create a movie
pub async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<CreateMovieRequest>,
) -> AppResult<Json<movie::Model>> {
    if payload.base_price <= 0.0 {
        return Err(AppError::BadRequest(
            "Base price must be positive".to_string(),
        ));
    }
    if payload.duration_minutes <= 0 {
        return Err(AppError::BadRequest(
            "Duration must be positive".to_string(),
        ));
    }

    let new_movie = movie::ActiveModel {
        title: Set(payload.title),
        description: Set(payload.description),
        duration_minutes: Set(payload.duration_minutes),
        genre: Set(payload.genre),
        language: Set(payload.language),
        base_price: Set(payload.base_price),
        ..Default::default()
    };

    let created = new_movie.insert(&state.db).await?;
    tracing::info!(movie_id = created.id, "movie created");
    Ok(Json(created))
}

/// Update a movie
pub async fn update_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
    Json(payload): Json<UpdateMovieRequest>,
) -> AppResult<Json<movie::Model>> {
    let existing = movie::Entity::find_by_id(movie_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    let mut active: movie::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if payload.description.is_some() {
        active.description = Set(payload.description);
    }
    if let Some(duration) = payload.duration_minutes {
        if duration <= 0 {
            return Err(AppError::BadRequest(
                "Duration must be positive".to_string(),
            ));
        }
        active.duration_minutes = Set(duration);
    }
    if payload.genre.is_some() {
        active.genre = Set(payload.genre);
    }
    if payload.language.is_some() {
        active.language = Set(payload.language);
    }
    if let Some(base_price) = payload.base_price {
        if base_price <= 0.0 {
            return Err(AppError::BadRequest(
                "Base price must be positive".to_string(),
            ));
        }
        active.base_price = Set(base_price);
    }

    Ok(Json(active.update(&state.db).await?))
}

/// Delete a movie (its shows cascade)
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let result = movie::Entity::delete_by_id(movie_id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Movie not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Movie deleted" })))
}

// ============ Show Management ============

#[derive(Debug, Deserialize)]
pub struct CreateShowRequest {
    pub movie_id: i32,
    pub hall_id: i32,
    pub show_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price_multiplier: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateShowRequest {
    pub show_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub price_multiplier: Option<f64>,
    pub status: Option<ShowStatus>,
}

/// Schedule a show
pub async fn create_show(
    State(state): State<AppState>,
    Json(payload): Json<CreateShowRequest>,
) -> AppResult<Json<show::Model>> {
    movie::Entity::find_by_id(payload.movie_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    hall::Entity::find_by_id(payload.hall_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Hall not found".to_string()))?;

    if payload.end_time <= payload.start_time {
        return Err(AppError::BadRequest(
            "Show must end after it starts".to_string(),
        ));
    }

    let multiplier = payload.price_multiplier.unwrap_or(1.0);
    if multiplier <= 0.0 {
        return Err(AppError::BadRequest(
            "Price multiplier must be positive".to_string(),
        ));
    }

    let new_show = show::ActiveModel {
        movie_id: Set(payload.movie_id),
        hall_id: Set(payload.hall_id),
        show_date: Set(payload.show_date),
        start_time: Set(payload.start_time),
        end_time: Set(payload.end_time),
        price_multiplier: Set(multiplier),
        status: Set(ShowStatus::Active),
        ..Default::default()
    };

    let created = new_show.insert(&state.db).await?;
    tracing::info!(show_id = created.id, "show scheduled");
    Ok(Json(created))
}

/// Update or cancel a show
pub async fn update_show(
    State(state): State<AppState>,
    Path(show_id): Path<i32>,
    Json(payload): Json<UpdateShowRequest>,
) -> AppResult<Json<show::Model>> {
    let existing = show::Entity::find_by_id(show_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Show not found".to_string()))?;

    let mut active: show::ActiveModel = existing.into();
    if let Some(show_date) = payload.show_date {
        active.show_date = Set(show_date);
    }
    if let Some(start_time) = payload.start_time {
        active.start_time = Set(start_time);
    }
    if let Some(end_time) = payload.end_time {
        active.end_time = Set(end_time);
    }
    if let Some(multiplier) = payload.price_multiplier {
        if multiplier <= 0.0 {
            return Err(AppError::BadRequest(
                "Price multiplier must be positive".to_string(),
            ));
        }
        active.price_multiplier = Set(multiplier);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }

    Ok(Json(active.update(&state.db).await?))
}

/// Delete a show
pub async fn delete_show(
    State(state): State<AppState>,
    Path(show_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let result = show::Entity::delete_by_id(show_id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Show not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Show deleted" })))
}

// ============ Booking Oversight ============

/// List every booking in the system, newest first
pub async fn list_all_bookings(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<booking::Model>>> {
    let bookings = booking::Entity::find()
        .order_by_desc(booking::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(bookings))
}
