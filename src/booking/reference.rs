use chrono::Utc;
use rand::Rng;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::booking;
use crate::error::{AppError, AppResult};

const REFERENCE_PREFIX: &str = "BK";
const REFERENCE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Uniqueness probes are bounded; exhausting them means the store is
/// returning collisions faster than the entropy below can plausibly produce.
const MAX_ATTEMPTS: u32 = 20;

/// Escalating entropy strategies for reference candidates. Later attempts
/// widen the random suffix and switch to finer timestamps before giving up
/// on structured references entirely and hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceStrategy {
    ShortRandom,
    LongRandom,
    HashFallback,
}

impl ReferenceStrategy {
    fn for_attempt(attempt: u32) -> Self {
        match attempt {
            0..=9 => ReferenceStrategy::ShortRandom,
            10..=14 => ReferenceStrategy::LongRandom,
            _ => ReferenceStrategy::HashFallback,
        }
    }
}

fn random_suffix(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..REFERENCE_CHARSET.len());
            REFERENCE_CHARSET[idx] as char
        })
        .collect()
}

fn candidate(strategy: ReferenceStrategy, rng: &mut impl Rng) -> String {
    let now = Utc::now();
    match strategy {
        ReferenceStrategy::ShortRandom => {
            let entropy = Uuid::new_v4().simple().to_string().to_uppercase();
            format!(
                "{}{}{}{}",
                REFERENCE_PREFIX,
                now.timestamp_micros(),
                &entropy[..12],
                random_suffix(rng, 6)
            )
        }
        ReferenceStrategy::LongRandom => {
            let nanos = now
                .timestamp_nanos_opt()
                .unwrap_or_else(|| now.timestamp_micros() * 1000);
            format!("{}{}{}", REFERENCE_PREFIX, nanos, random_suffix(rng, 15))
        }
        ReferenceStrategy::HashFallback => {
            let nanos = now
                .timestamp_nanos_opt()
                .unwrap_or_else(|| now.timestamp_micros() * 1000);
            let mut hasher = Sha256::new();
            hasher.update(nanos.to_be_bytes());
            hasher.update(Uuid::new_v4().as_bytes());
            hasher.update(rng.next_u64().to_be_bytes());
            let digest = hasher.finalize();
            let hex: String = digest.iter().map(|b| format!("{:02X}", b)).collect();
            format!("{}{}", REFERENCE_PREFIX, &hex[..20])
        }
    }
}

/// Generate a booking reference that no existing booking carries.
///
/// Probes the store read-only; the caller persists the reference inside its
/// own transaction, where the unique column is the final guard.
pub async fn generate_unique_reference<C: ConnectionTrait>(db: &C) -> AppResult<String> {
    for attempt in 0..MAX_ATTEMPTS {
        let reference = candidate(
            ReferenceStrategy::for_attempt(attempt),
            &mut rand::thread_rng(),
        );

        let existing = booking::Entity::find()
            .filter(booking::Column::Reference.eq(&reference))
            .one(db)
            .await?;

        if existing.is_none() {
            if attempt > 0 {
                tracing::debug!(attempt, "booking reference collided, generated a wider one");
            }
            return Ok(reference);
        }
    }

    Err(AppError::Transient(
        "Could not generate a unique booking reference".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_strategy_escalates_with_attempts() {
        assert_eq!(
            ReferenceStrategy::for_attempt(0),
            ReferenceStrategy::ShortRandom
        );
        assert_eq!(
            ReferenceStrategy::for_attempt(9),
            ReferenceStrategy::ShortRandom
        );
        assert_eq!(
            ReferenceStrategy::for_attempt(10),
            ReferenceStrategy::LongRandom
        );
        assert_eq!(
            ReferenceStrategy::for_attempt(15),
            ReferenceStrategy::HashFallback
        );
        assert_eq!(
            ReferenceStrategy::for_attempt(19),
            ReferenceStrategy::HashFallback
        );
    }

    #[test]
    fn test_candidates_are_prefixed_and_uppercase_alphanumeric() {
        let mut rng = rand::thread_rng();
        for strategy in [
            ReferenceStrategy::ShortRandom,
            ReferenceStrategy::LongRandom,
            ReferenceStrategy::HashFallback,
        ] {
            let reference = candidate(strategy, &mut rng);
            assert!(reference.starts_with(REFERENCE_PREFIX));
            assert!(reference
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_hash_fallback_has_fixed_length() {
        let mut rng = rand::thread_rng();
        let reference = candidate(ReferenceStrategy::HashFallback, &mut rng);
        assert_eq!(reference.len(), REFERENCE_PREFIX.len() + 20);
    }

    #[test]
    fn test_ten_thousand_candidates_without_duplicates() {
        // Cycle through every strategy as a collision-pressured generator
        // would, and require all candidates to be distinct.
        let mut rng = rand::thread_rng();
        let mut seen = HashSet::new();
        for i in 0..10_000u32 {
            let reference = candidate(ReferenceStrategy::for_attempt(i % MAX_ATTEMPTS), &mut rng);
            assert!(seen.insert(reference), "duplicate reference at iteration {}", i);
        }
    }
}
