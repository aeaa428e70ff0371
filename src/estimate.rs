//! Epley one-rep-max estimate.

/// Estimated one-rep max for `reps` repetitions at `weight` kg, rounded to
/// one decimal. Zero reps estimate nothing.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> f64 {
    if reps == 0 {
        return 0.0;
    }
    // NaN.max(0.0) is 0.0
    let weight = weight.max(0.0);
    round_tenth(weight * (1.0 + reps as f64 / 30.0))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_reps_is_zero() {
        for weight in [0.0, 20.0, 102.5, 300.0] {
            assert_eq!(estimate_one_rep_max(weight, 0), 0.0);
        }
    }

    #[test]
    fn hundred_for_ten() {
        assert_eq!(estimate_one_rep_max(100.0, 10), 133.3);
    }

    #[test]
    fn bodyweight_is_zero() {
        assert_eq!(estimate_one_rep_max(0.0, 10), 0.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(estimate_one_rep_max(80.0, 10), 106.7);
        assert_eq!(estimate_one_rep_max(60.0, 1), 62.0);
    }

    #[test]
    fn negative_and_nan_weights_clamp() {
        assert_eq!(estimate_one_rep_max(-40.0, 5), 0.0);
        assert_eq!(estimate_one_rep_max(f64::NAN, 5), 0.0);
    }
}
