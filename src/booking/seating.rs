use std::collections::{BTreeMap, HashSet};

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::booking::availability::check_seat_availability;
use crate::entities::booking::{self, BookingStatus};
use crate::entities::{seat, show};
use crate::error::{AppError, AppResult};

/// Find `seat_count` seats in one row of the show's hall whose seat numbers
/// form an unbroken run, all currently available. Returns the block's seat
/// ids in seat-number order, or an empty vec when no row qualifies.
pub async fn find_consecutive_seats<C: ConnectionTrait>(
    db: &C,
    show_id: i32,
    seat_count: u32,
) -> AppResult<Vec<i32>> {
    if seat_count == 0 {
        return Err(AppError::BadRequest(
            "Seat count must be at least 1".to_string(),
        ));
    }

    let show = show::Entity::find_by_id(show_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Show not found".to_string()))?;

    let seats = seat::Entity::find()
        .filter(seat::Column::HallId.eq(show.hall_id))
        .order_by_asc(seat::Column::RowNumber)
        .order_by_asc(seat::Column::SeatNumber)
        .all(db)
        .await?;

    let booked: HashSet<i32> = booking::Entity::find()
        .filter(booking::Column::ShowId.eq(show_id))
        .filter(booking::Column::Status.eq(BookingStatus::Confirmed))
        .all(db)
        .await?
        .iter()
        .map(|b| b.seat_id)
        .collect();

    let Some(block) = scan_for_block(&seats, &booked, seat_count as usize) else {
        return Ok(Vec::new());
    };

    // A concurrent booking may have landed between the scan and here; verify
    // before handing the block out. Callers degrade to alternatives on empty.
    let availability = check_seat_availability(db, show_id, &block).await?;
    if availability.all_available {
        Ok(block)
    } else {
        Ok(Vec::new())
    }
}

/// Row-by-row scan for the first qualifying block. Rows are visited in
/// ascending row order and windows left to right, so results are
/// deterministic for a given seat map. A window qualifies only when its seat
/// numbers are strictly sequential; a booked seat number inside the span
/// breaks the run even if enough free seats surround it.
fn scan_for_block(
    seats: &[seat::Model],
    booked: &HashSet<i32>,
    seat_count: usize,
) -> Option<Vec<i32>> {
    let mut rows: BTreeMap<i32, Vec<&seat::Model>> = BTreeMap::new();
    for seat in seats {
        rows.entry(seat.row_number).or_default().push(seat);
    }

    for row_seats in rows.values_mut() {
        row_seats.sort_by_key(|s| s.seat_number);

        let available: Vec<&seat::Model> = row_seats
            .iter()
            .filter(|s| !booked.contains(&s.id))
            .copied()
            .collect();

        if available.len() < seat_count {
            continue;
        }

        for window in available.windows(seat_count) {
            let first = window[0].seat_number;
            let last = window[seat_count - 1].seat_number;
            if last - first + 1 == seat_count as i32 {
                return Some(window.iter().map(|s| s.id).collect());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    use crate::entities::seat::SeatCategory;

    fn seat(id: i32, row_number: i32, seat_number: i32) -> seat::Model {
        seat::Model {
            id,
            hall_id: 1,
            row_number,
            seat_number,
            category: SeatCategory::Standard,
            is_aisle: false,
            created_at: DateTime::from_timestamp(0, 0).unwrap().fixed_offset(),
        }
    }

    /// One row of seats numbered 1..=n, with seat id == seat number.
    fn row(n: i32) -> Vec<seat::Model> {
        (1..=n).map(|i| seat(i, 1, i)).collect()
    }

    #[test]
    fn test_skips_runs_crossing_booked_seats() {
        let seats = row(10);
        let booked: HashSet<i32> = [3, 4].into_iter().collect();

        // Seats 1-2 are free but 3 is booked, so the first legal block of
        // three starts at seat 5.
        let block = scan_for_block(&seats, &booked, 3).unwrap();
        assert_eq!(block, vec![5, 6, 7]);
    }

    #[test]
    fn test_prefers_lowest_seat_numbers() {
        let seats = row(10);
        let block = scan_for_block(&seats, &HashSet::new(), 4).unwrap();
        assert_eq!(block, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_rejects_gaps_in_seat_numbering() {
        // Physical gap: the row jumps from seat 2 to seat 4.
        let seats = vec![seat(1, 1, 1), seat(2, 1, 2), seat(3, 1, 4), seat(4, 1, 5)];
        assert!(scan_for_block(&seats, &HashSet::new(), 3).is_none());
        let block = scan_for_block(&seats, &HashSet::new(), 2).unwrap();
        assert_eq!(block, vec![1, 2]);
    }

    #[test]
    fn test_scans_rows_in_ascending_order() {
        let mut seats = Vec::new();
        // Row 2 listed first; the scan must still prefer row 1.
        for i in 1..=4 {
            seats.push(seat(100 + i, 2, i));
        }
        for i in 1..=4 {
            seats.push(seat(200 + i, 1, i));
        }

        let block = scan_for_block(&seats, &HashSet::new(), 3).unwrap();
        assert_eq!(block, vec![201, 202, 203]);
    }

    #[test]
    fn test_falls_through_to_later_rows() {
        let mut seats: Vec<seat::Model> = (1..=4).map(|i| seat(i, 1, i)).collect();
        seats.extend((1..=4).map(|i| seat(10 + i, 2, i)));
        // Row 1 is fragmented by a booked middle seat.
        let booked: HashSet<i32> = [2].into_iter().collect();

        let block = scan_for_block(&seats, &booked, 3).unwrap();
        assert_eq!(block, vec![11, 12, 13]);
    }

    #[test]
    fn test_empty_when_no_row_fits() {
        let seats = row(3);
        let booked: HashSet<i32> = [2].into_iter().collect();
        assert!(scan_for_block(&seats, &booked, 2).is_none());
    }

    #[test]
    fn test_single_seat_block() {
        let seats = row(2);
        let booked: HashSet<i32> = [1].into_iter().collect();
        let block = scan_for_block(&seats, &booked, 1).unwrap();
        assert_eq!(block, vec![2]);
    }
}
