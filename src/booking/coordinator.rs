use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr, TransactionTrait,
};

use crate::booking::alternatives::find_alternatives;
use crate::booking::availability::{check_seat_availability, validate_seats_in_hall};
use crate::booking::pricing;
use crate::booking::reference::generate_unique_reference;
use crate::booking::seating::find_consecutive_seats;
use crate::entities::booking::{self, BookingStatus};
use crate::entities::{movie, show};
use crate::error::{AppError, AppResult};

/// Book one seat. Seat-exact: an unavailable seat is reported without
/// alternative suggestions.
pub async fn book_single(
    db: &DatabaseConnection,
    user_id: i32,
    show_id: i32,
    seat_id: i32,
) -> AppResult<booking::Model> {
    let mut bookings = book_group(db, user_id, show_id, vec![seat_id], false).await?;
    bookings
        .pop()
        .ok_or_else(|| AppError::Internal("Commit returned no booking rows".to_string()))
}

/// Book a set of seats for one show as a single unit: either every seat's
/// booking is persisted or none are.
///
/// `best_effort` marks requests where the caller wants the party seated
/// rather than those exact seats; only those rejections carry alternative
/// suggestions for the same movie.
pub async fn book_group(
    db: &DatabaseConnection,
    user_id: i32,
    show_id: i32,
    seat_ids: Vec<i32>,
    best_effort: bool,
) -> AppResult<Vec<booking::Model>> {
    validate_seat_selection(&seat_ids)?;

    let show = show::Entity::find_by_id(show_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Show not found".to_string()))?;
    let movie = movie::Entity::find_by_id(show.movie_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal("Show references a missing movie".to_string()))?;

    validate_seats_in_hall(db, show.hall_id, &seat_ids).await?;

    let availability = check_seat_availability(db, show_id, &seat_ids).await?;
    if !availability.all_available {
        let alternatives = if best_effort {
            find_alternatives(db, show.movie_id, seat_ids.len() as u32, Some(show.show_date))
                .await?
        } else {
            Vec::new()
        };
        return Err(AppError::SeatsUnavailable {
            message: "Requested seats are not available".to_string(),
            unavailable_seat_ids: availability.unavailable_seat_ids,
            alternatives,
        });
    }

    let seat_count = seat_ids.len() as u32;
    let total = pricing::calculate_amount(movie.base_price, show.price_multiplier, seat_count);
    let per_seat = pricing::split_amount(total, seat_count);

    // Everything the outside world can observe happens inside this
    // transaction. A dropped transaction rolls back, so any early return
    // below leaves no partial group behind.
    let txn = db.begin().await?;

    // The pre-check above may be stale by now; check again on the
    // transaction's snapshot before writing anything.
    let recheck = check_seat_availability(&txn, show_id, &seat_ids).await?;
    if !recheck.all_available {
        txn.rollback().await?;
        return Err(AppError::Transient(format!(
            "Seats {:?} were claimed by a concurrent booking",
            recheck.unavailable_seat_ids
        )));
    }

    let mut created = Vec::with_capacity(seat_ids.len());
    for seat_id in &seat_ids {
        let reference = generate_unique_reference(&txn).await?;
        let pending = booking::ActiveModel {
            user_id: Set(user_id),
            show_id: Set(show_id),
            seat_id: Set(*seat_id),
            reference: Set(reference),
            amount_paid: Set(per_seat),
            status: Set(BookingStatus::Confirmed),
            ..Default::default()
        };
        let persisted = pending.insert(&txn).await.map_err(map_commit_error)?;
        created.push(persisted);
    }

    txn.commit().await.map_err(map_commit_error)?;

    tracing::info!(
        show_id,
        user_id,
        seats = created.len(),
        amount = total,
        "booking committed"
    );

    Ok(created)
}

/// Find a consecutive block for the party and book it. Degrades to
/// alternative suggestions when the show cannot seat the party together.
pub async fn book_consecutive(
    db: &DatabaseConnection,
    user_id: i32,
    show_id: i32,
    seat_count: u32,
) -> AppResult<Vec<booking::Model>> {
    let block = find_consecutive_seats(db, show_id, seat_count).await?;

    if block.is_empty() {
        let show = show::Entity::find_by_id(show_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Show not found".to_string()))?;
        let alternatives =
            find_alternatives(db, show.movie_id, seat_count, Some(show.show_date)).await?;
        return Err(AppError::NoConsecutiveBlock {
            message: format!("No {} consecutive seats available for this show", seat_count),
            alternatives,
        });
    }

    // Time has passed since the search; book_group re-validates at commit.
    book_group(db, user_id, show_id, block, true).await
}

/// Cancel a booking, freeing its seat for that show. `requester` limits the
/// operation to the booking's owner; `None` skips the ownership check.
pub async fn cancel(
    db: &DatabaseConnection,
    booking_id: i32,
    requester: Option<i32>,
) -> AppResult<booking::Model> {
    let existing = booking::Entity::find_by_id(booking_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if let Some(user_id) = requester {
        if existing.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only cancel your own bookings".to_string(),
            ));
        }
    }

    ensure_cancellable(&existing)?;

    let mut active: booking::ActiveModel = existing.into();
    active.status = Set(BookingStatus::Cancelled);
    let cancelled = active.update(db).await?;

    tracing::info!(booking_id, "booking cancelled");

    Ok(cancelled)
}

/// Cancelling twice is an error, never a silent no-op: the seat was already
/// freed once and must not be double-freed.
fn ensure_cancellable(existing: &booking::Model) -> AppResult<()> {
    if existing.status == BookingStatus::Cancelled {
        return Err(AppError::Conflict(
            "Booking is already cancelled".to_string(),
        ));
    }
    Ok(())
}

fn validate_seat_selection(seat_ids: &[i32]) -> AppResult<()> {
    if seat_ids.is_empty() {
        return Err(AppError::BadRequest(
            "At least one seat is required".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(seat_ids.len());
    if let Some(duplicate) = seat_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(AppError::BadRequest(format!(
            "Seat {} was requested more than once",
            duplicate
        )));
    }

    Ok(())
}

/// The partial unique index on (show_id, seat_id, status=confirmed) is the
/// final arbiter under concurrency: a violation at insert or commit time
/// means another request confirmed a seat after our in-transaction re-check.
/// The transaction fails whole, so the request is safe to retry.
fn map_commit_error(err: DbErr) -> AppError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        AppError::Transient(
            "A concurrent booking claimed one of the requested seats".to_string(),
        )
    } else {
        AppError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn booking_with_status(status: BookingStatus) -> booking::Model {
        booking::Model {
            id: 1,
            user_id: 7,
            show_id: 1,
            seat_id: 1,
            reference: "BKTEST1".to_string(),
            amount_paid: 15.0,
            status,
            created_at: DateTime::from_timestamp(0, 0).unwrap().fixed_offset(),
        }
    }

    #[test]
    fn test_rejects_empty_selection() {
        assert!(matches!(
            validate_seat_selection(&[]),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_seats() {
        assert!(matches!(
            validate_seat_selection(&[1, 2, 2]),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_accepts_distinct_seats() {
        assert!(validate_seat_selection(&[4, 5, 6]).is_ok());
    }

    #[test]
    fn test_confirmed_booking_is_cancellable() {
        assert!(ensure_cancellable(&booking_with_status(BookingStatus::Confirmed)).is_ok());
    }

    #[test]
    fn test_cancelling_twice_is_a_conflict() {
        let err = ensure_cancellable(&booking_with_status(BookingStatus::Cancelled)).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
