//! Small helpers shared by the compute layer and the API handlers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to 2 decimal places, the precision used in all
/// published figures. Midpoints round away from zero (0.005 -> 0.01),
/// matching how the treasurer's spreadsheets round.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Display name used in the flattened report listings.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_truncates_to_cents() {
        assert_eq!(round_money(Decimal::new(123456, 4)), Decimal::new(1235, 2)); // 12.3456 -> 12.35
        assert_eq!(round_money(Decimal::new(-123413, 4)), Decimal::new(-1234, 2)); // -12.3413 -> -12.34
    }

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(101, 2)); // 1.005 -> 1.01
        assert_eq!(round_money(Decimal::new(-1005, 3)), Decimal::new(-101, 2)); // -1.005 -> -1.01
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name("Awa", "Diallo"), "Awa Diallo");
    }
}
