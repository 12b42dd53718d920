//! Scoring
//!
//! Distance and points for a guess. Score decays exponentially with a
//! 5 km scale: 5000 at 0 m, ~1839 at 5 km, ~34 at 25 km.

use crate::core::geo::haversine_m;

/// Points for a perfect guess.
pub const MAX_SCORE: u32 = 5000;

/// Distance (meters) over which the score falls by a factor of e.
pub const SCORE_DECAY_M: f64 = 5000.0;

/// Stand-in distance for timed-out rounds in aggregates.
pub const TIMEOUT_DISTANCE_METERS: f64 = 999_999.0;

/// Great-circle distance in meters.
#[inline]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    haversine_m(lat1, lng1, lat2, lng2)
}

/// Points for a guess `distance_m` meters from the target.
///
/// `round(5000 * e^(-d / 5000))`.
pub fn score(distance_m: f64) -> u32 {
    (MAX_SCORE as f64 * (-distance_m / SCORE_DECAY_M).exp()).round() as u32
}

/// `"812m"` under a kilometre, `"3.45km"` otherwise.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round() as i64)
    } else {
        format!("{:.2}km", meters / 1000.0)
    }
}

/// Score with thousands separators, e.g. `"48,213"`.
pub fn format_score(score: u32) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_perfect_score() {
        assert_eq!(score(0.0), MAX_SCORE);
    }

    #[test]
    fn test_reference_points() {
        assert_eq!(score(1000.0), 4094);
        assert_eq!(score(5000.0), 1839);
        assert_eq!(score(25_000.0), 34);
    }

    #[test]
    fn test_far_guesses_round_to_zero() {
        // Rounding eventually reaches 0 even though the curve never does
        assert_eq!(score(100_000.0), 0);
        assert_eq!(score(TIMEOUT_DISTANCE_METERS), 0);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(812.4), "812m");
        assert_eq!(format_distance(3450.0), "3.45km");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(999), "999");
        assert_eq!(format_score(5000), "5,000");
        assert_eq!(format_score(60000), "60,000");
        assert_eq!(format_score(1234567), "1,234,567");
    }

    proptest! {
        #[test]
        fn test_score_non_increasing(a in 0.0f64..50_000.0, b in 0.0f64..50_000.0) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(score(near) >= score(far));
        }

        #[test]
        fn test_score_in_range(d in 0.0f64..1.0e7) {
            prop_assert!(score(d) <= MAX_SCORE);
        }

        #[test]
        fn test_distance_symmetric(
            lat1 in -80.0f64..80.0, lng1 in -180.0f64..180.0,
            lat2 in -80.0f64..80.0, lng2 in -180.0f64..180.0,
        ) {
            prop_assert_eq!(distance(lat1, lng1, lat2, lng2), distance(lat2, lng2, lat1, lng1));
            prop_assert_eq!(distance(lat1, lng1, lat1, lng1), 0.0);
        }
    }
}
