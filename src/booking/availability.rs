use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entities::booking::{self, BookingStatus};
use crate::entities::seat;
use crate::error::{AppError, AppResult};

/// Result of an availability probe for a set of seats in one show.
#[derive(Debug, Clone)]
pub struct SeatAvailability {
    pub all_available: bool,
    pub unavailable_seat_ids: Vec<i32>,
}

/// Report which of the given seats are already held by a confirmed booking
/// for the show. Pure read; availability is always re-derived from the store,
/// never cached.
pub async fn check_seat_availability<C: ConnectionTrait>(
    db: &C,
    show_id: i32,
    seat_ids: &[i32],
) -> AppResult<SeatAvailability> {
    if seat_ids.is_empty() {
        return Err(AppError::BadRequest(
            "At least one seat id is required".to_string(),
        ));
    }

    let held = booking::Entity::find()
        .filter(booking::Column::ShowId.eq(show_id))
        .filter(booking::Column::SeatId.is_in(seat_ids.to_vec()))
        .filter(booking::Column::Status.eq(BookingStatus::Confirmed))
        .all(db)
        .await?;

    let unavailable_seat_ids: Vec<i32> = held.iter().map(|b| b.seat_id).collect();

    Ok(SeatAvailability {
        all_available: unavailable_seat_ids.is_empty(),
        unavailable_seat_ids,
    })
}

/// Verify every requested seat exists and belongs to the given hall.
/// A seat from another hall is a validation failure, not an availability one.
pub async fn validate_seats_in_hall<C: ConnectionTrait>(
    db: &C,
    hall_id: i32,
    seat_ids: &[i32],
) -> AppResult<Vec<seat::Model>> {
    let seats = seat::Entity::find()
        .filter(seat::Column::Id.is_in(seat_ids.to_vec()))
        .all(db)
        .await?;

    if seats.len() != seat_ids.len() {
        return Err(AppError::BadRequest(
            "One or more requested seats do not exist".to_string(),
        ));
    }

    if let Some(stray) = seats.iter().find(|s| s.hall_id != hall_id) {
        return Err(AppError::BadRequest(format!(
            "Seat {} does not belong to the show's hall",
            stray.id
        )));
    }

    Ok(seats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn held_booking(seat_id: i32) -> booking::Model {
        booking::Model {
            id: seat_id,
            user_id: 1,
            show_id: 1,
            seat_id,
            reference: format!("BKTEST{}", seat_id),
            amount_paid: 12.0,
            status: BookingStatus::Confirmed,
            created_at: DateTime::from_timestamp(0, 0).unwrap().fixed_offset(),
        }
    }

    #[tokio::test]
    async fn test_reports_held_seats() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![held_booking(3), held_booking(4)]])
            .into_connection();

        let availability = check_seat_availability(&db, 1, &[2, 3, 4]).await.unwrap();
        assert!(!availability.all_available);
        assert_eq!(availability.unavailable_seat_ids, vec![3, 4]);
    }

    #[tokio::test]
    async fn test_all_available_when_no_confirmed_bookings() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<booking::Model>::new()])
            .into_connection();

        let availability = check_seat_availability(&db, 1, &[5, 6]).await.unwrap();
        assert!(availability.all_available);
        assert!(availability.unavailable_seat_ids.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_empty_seat_list() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = check_seat_availability(&db, 1, &[]).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
