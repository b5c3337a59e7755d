/// Best possible score, awarded for a hit at exactly 0.00 seconds.
pub const MAX_SCORE: u32 = 10_000;

/// Points lost per second of distance from zero.
pub const POINTS_PER_SECOND: f64 = 1_000.0;

/// Round to two decimal places, the precision the countdown is kept at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score for a hit landing with `remaining` seconds on the clock.
///
/// `max(0, 10000 - round(|remaining| * 1000))`
pub fn score_for(remaining: f64) -> u32 {
    let penalty = (remaining.abs() * POINTS_PER_SECOND).round();
    let score = MAX_SCORE as f64 - penalty;

    if score > 0.0 {
        score as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(9.899999999999999), 9.9);
        assert_eq!(round2(5.000000000000001), 5.0);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235001), 1.24);
    }

    #[test]
    fn test_score_at_zero_is_max() {
        assert_eq!(score_for(0.0), MAX_SCORE);
    }

    #[test]
    fn test_score_drops_linearly() {
        assert_eq!(score_for(2.0), 8000);
        assert_eq!(score_for(5.0), 5000);
        assert_eq!(score_for(0.1), 9900);
        assert_eq!(score_for(9.99), 10);
    }

    #[test]
    fn test_score_floors_at_zero() {
        assert_eq!(score_for(10.0), 0);
        assert_eq!(score_for(12.5), 0);
    }

    #[test]
    fn test_score_uses_distance_from_zero() {
        assert_eq!(score_for(-2.0), score_for(2.0));
    }
}
