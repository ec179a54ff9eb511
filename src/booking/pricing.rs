/// Round a monetary amount to two decimal places.
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Total amount for a booking: base price scaled by the show's multiplier,
/// times the number of seats.
pub fn calculate_amount(base_price: f64, price_multiplier: f64, seat_count: u32) -> f64 {
    round_cents(base_price * price_multiplier * seat_count as f64)
}

/// Per-seat share of a group total. Sibling bookings split the group total
/// evenly rather than re-deriving a per-seat price.
pub fn split_amount(total: f64, seat_count: u32) -> f64 {
    round_cents(total / seat_count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_for_group() {
        assert_eq!(calculate_amount(10.0, 1.5, 3), 45.0);
    }

    #[test]
    fn test_split_evenly_across_siblings() {
        let total = calculate_amount(10.0, 1.5, 3);
        assert_eq!(split_amount(total, 3), 15.0);
    }

    #[test]
    fn test_rounds_to_cents() {
        // 9.99 * 1.1 * 2 = 21.978
        assert_eq!(calculate_amount(9.99, 1.1, 2), 21.98);
        assert_eq!(split_amount(10.0, 3), 3.33);
    }

    #[test]
    fn test_multiplier_of_one_is_identity() {
        assert_eq!(calculate_amount(12.5, 1.0, 1), 12.5);
    }
}
