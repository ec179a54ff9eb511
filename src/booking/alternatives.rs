use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::booking::seating::find_consecutive_seats;
use crate::entities::show::{self, ShowStatus};
use crate::entities::{hall, movie, theater};
use crate::error::{AppError, AppResult};

/// A bookable fallback: another show of the same movie with a consecutive
/// block large enough for the requested party.
#[derive(Debug, Clone, Serialize)]
pub struct BookingSuggestion {
    pub show_id: i32,
    pub movie_title: String,
    pub theater_name: String,
    pub hall_name: String,
    pub show_date: NaiveDate,
    pub start_time: NaiveTime,
    pub seat_ids: Vec<i32>,
    pub seat_count: usize,
}

/// Scan the movie's upcoming active shows for one that can seat the party
/// together, skipping the date the caller already tried. Suggestions come
/// back in chronological order; every show is probed with the block finder,
/// which keeps this an exhaustive linear scan over the movie's schedule.
pub async fn find_alternatives<C: ConnectionTrait>(
    db: &C,
    movie_id: i32,
    seat_count: u32,
    exclude_date: Option<NaiveDate>,
) -> AppResult<Vec<BookingSuggestion>> {
    let today = Utc::now().date_naive();

    let shows = show::Entity::find()
        .filter(show::Column::MovieId.eq(movie_id))
        .filter(show::Column::Status.eq(ShowStatus::Active))
        .filter(show::Column::ShowDate.gte(today))
        .all(db)
        .await?;

    let candidates = rank_candidates(shows, exclude_date);
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let movie = movie::Entity::find_by_id(movie_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    let mut suggestions = Vec::new();
    for candidate in candidates {
        let seat_ids = find_consecutive_seats(db, candidate.id, seat_count).await?;
        if seat_ids.is_empty() {
            continue;
        }

        let hall = hall::Entity::find_by_id(candidate.hall_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::Internal("Show references a missing hall".to_string()))?;
        let theater = theater::Entity::find_by_id(hall.theater_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::Internal("Hall references a missing theater".to_string()))?;

        suggestions.push(BookingSuggestion {
            show_id: candidate.id,
            movie_title: movie.title.clone(),
            theater_name: theater.name,
            hall_name: hall.name,
            show_date: candidate.show_date,
            start_time: candidate.start_time,
            seat_count: seat_ids.len(),
            seat_ids,
        });
    }

    Ok(suggestions)
}

/// Drop the excluded date and order what remains by (date, start time).
/// Chronology is the whole ranking; price and venue never reorder it.
fn rank_candidates(
    mut shows: Vec<show::Model>,
    exclude_date: Option<NaiveDate>,
) -> Vec<show::Model> {
    if let Some(date) = exclude_date {
        shows.retain(|s| s.show_date != date);
    }
    shows.sort_by_key(|s| (s.show_date, s.start_time));
    shows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn show_on(id: i32, date: &str, start: &str) -> show::Model {
        show::Model {
            id,
            movie_id: 1,
            hall_id: 1,
            show_date: date.parse().unwrap(),
            start_time: start.parse().unwrap(),
            end_time: "23:00:00".parse().unwrap(),
            price_multiplier: 1.0,
            status: ShowStatus::Active,
            created_at: DateTime::from_timestamp(0, 0).unwrap().fixed_offset(),
        }
    }

    #[test]
    fn test_earlier_date_outranks_earlier_time() {
        // Day two starts earlier in the day, but day one still comes first.
        let shows = vec![
            show_on(2, "2026-08-02", "09:00:00"),
            show_on(1, "2026-08-01", "10:00:00"),
        ];

        let ranked = rank_candidates(shows, None);
        assert_eq!(ranked[0].id, 1);
        assert_eq!(ranked[1].id, 2);
    }

    #[test]
    fn test_same_date_orders_by_start_time() {
        let shows = vec![
            show_on(1, "2026-08-01", "20:00:00"),
            show_on(2, "2026-08-01", "14:30:00"),
        ];

        let ranked = rank_candidates(shows, None);
        assert_eq!(ranked[0].id, 2);
    }

    #[test]
    fn test_excludes_the_preferred_date() {
        let shows = vec![
            show_on(1, "2026-08-01", "10:00:00"),
            show_on(2, "2026-08-02", "10:00:00"),
        ];

        let exclude = "2026-08-01".parse().ok();
        let ranked = rank_candidates(shows, exclude);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, 2);
    }
}
