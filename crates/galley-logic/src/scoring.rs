//! Score deltas and end-of-level star rating.

use crate::constants::score;

/// Points awarded for a matched delivery.
pub fn delivery_points(tip: u32) -> i32 {
    score::BASE_PER_PLATE + tip as i32
}

/// Points for an expired order (negative).
pub fn expiry_points() -> i32 {
    -score::EXPIRED_PENALTY
}

/// Stars earned (0–3): one per threshold reached.
pub fn star_rating(score: i32, thresholds: &[i32; 3]) -> u8 {
    thresholds.iter().filter(|t| score >= **t).count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_points_include_tip() {
        assert_eq!(delivery_points(6), 26);
        assert_eq!(delivery_points(0), 20);
        assert_eq!(expiry_points(), -10);
    }

    #[test]
    fn test_star_rating() {
        let t = [40, 80, 120];
        assert_eq!(star_rating(-10, &t), 0);
        assert_eq!(star_rating(39, &t), 0);
        assert_eq!(star_rating(40, &t), 1);
        assert_eq!(star_rating(100, &t), 2);
        assert_eq!(star_rating(500, &t), 3);
    }
}
