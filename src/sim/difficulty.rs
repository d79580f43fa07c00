//! Score-driven difficulty curve
//!
//! Both values are pure functions of the score and are recomputed every tick.

use crate::consts::*;

/// Fall speed multiplier for newly spawned entities
///
/// Grows 0.2% per point and caps at 3x. Negative scores push it below 1.0.
pub fn speed_multiplier(score: i64) -> f64 {
    (1.0 + score as f64 * SPEED_PER_POINT).min(MAX_SPEED_MULTIPLIER)
}

/// Frames between egg spawns
///
/// `max(15, floor(60 / m))`. A negative multiplier gives a negative quotient,
/// so the floor of 15 applies; a zero multiplier never spawns.
pub fn spawn_interval(score: i64) -> u32 {
    let multiplier = speed_multiplier(score);
    if multiplier == 0.0 {
        return u32::MAX;
    }
    // `as` saturates: negative quotients become 0, huge ones u32::MAX
    let frames = (BASE_SPAWN_INTERVAL / multiplier).floor() as u32;
    frames.max(MIN_SPAWN_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_baseline() {
        assert_eq!(speed_multiplier(0), 1.0);
        assert_eq!(spawn_interval(0), 60);
    }

    #[test]
    fn test_score_45() {
        assert!((speed_multiplier(45) - 1.09).abs() < 1e-12);
        assert_eq!(spawn_interval(45), 55);
    }

    #[test]
    fn test_round_numbers() {
        assert_eq!(spawn_interval(100), 50);
        assert_eq!(spawn_interval(500), 30);
    }

    #[test]
    fn test_caps() {
        assert_eq!(speed_multiplier(1000), 3.0);
        assert_eq!(speed_multiplier(1_000_000), 3.0);
        assert_eq!(spawn_interval(1_000_000), 20);
    }

    #[test]
    fn test_negative_score_slows_down() {
        assert!((speed_multiplier(-50) - 0.9).abs() < 1e-12);
        assert_eq!(spawn_interval(-50), 66);
        assert_eq!(spawn_interval(-600), 15);
        assert_eq!(spawn_interval(-10_000), 15);
    }

    proptest! {
        #[test]
        fn prop_multiplier_formula(score in -400i64..100_000) {
            let expected = (1.0 + score as f64 * 0.002).min(3.0);
            prop_assert_eq!(speed_multiplier(score), expected);
        }

        #[test]
        fn prop_multiplier_monotonic(a in 0i64..100_000, b in 0i64..100_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(speed_multiplier(lo) <= speed_multiplier(hi));
        }

        #[test]
        fn prop_interval_formula(score in 0i64..100_000) {
            let expected = ((60.0 / speed_multiplier(score)).floor() as u32).max(15);
            prop_assert_eq!(spawn_interval(score), expected);
        }

        #[test]
        fn prop_interval_non_increasing(a in 0i64..100_000, b in 0i64..100_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(spawn_interval(lo) >= spawn_interval(hi));
        }
    }
}
