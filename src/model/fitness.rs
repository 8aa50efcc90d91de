//! Cost → fitness transforms.
//!
//! Search strategies maximize fitness; every transform here is monotone
//! decreasing in cost so that lower cost always ranks higher.

use std::fmt;

/// Monotone decreasing map from cost to fitness.
#[derive(Clone, Copy, Default)]
pub enum FitnessTransform {
    /// `1 / (1 + cost)`; bounded in `(0, 1]` for non-negative cost.
    #[default]
    ShiftedReciprocal,
    /// `1 / cost`; zero cost maps to `f64::MAX`.
    Reciprocal,
    /// `-cost`.
    Negated,
    /// Caller-supplied transform. Must be monotone decreasing.
    Custom(fn(f64) -> f64),
}

impl FitnessTransform {
    /// Applies the transform. A NaN result is reported as `0.0`.
    pub fn apply(&self, cost: f64) -> f64 {
        let fitness = match self {
            Self::ShiftedReciprocal => 1.0 / (1.0 + cost),
            Self::Reciprocal => {
                if cost == 0.0 {
                    f64::MAX
                } else {
                    1.0 / cost
                }
            }
            Self::Negated => -cost,
            Self::Custom(f) => f(cost),
        };
        if fitness.is_nan() {
            0.0
        } else {
            fitness
        }
    }
}

impl fmt::Debug for FitnessTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShiftedReciprocal => f.write_str("ShiftedReciprocal"),
            Self::Reciprocal => f.write_str("Reciprocal"),
            Self::Negated => f.write_str("Negated"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_reciprocal() {
        let t = FitnessTransform::default();
        assert!((t.apply(0.0) - 1.0).abs() < 1e-12);
        assert!((t.apply(1.0) - 0.5).abs() < 1e-12);
        assert!(t.apply(f64::MAX) >= 0.0);
        assert!(t.apply(f64::MAX) < 1e-300);
    }

    #[test]
    fn test_monotone_decreasing() {
        for t in [
            FitnessTransform::ShiftedReciprocal,
            FitnessTransform::Reciprocal,
            FitnessTransform::Negated,
        ] {
            assert!(t.apply(1.0) > t.apply(2.0), "{t:?} not decreasing");
            assert!(t.apply(0.5) > t.apply(10.0), "{t:?} not decreasing");
        }
    }

    #[test]
    fn test_reciprocal_zero_cost() {
        assert_eq!(FitnessTransform::Reciprocal.apply(0.0), f64::MAX);
    }

    #[test]
    fn test_nan_maps_to_zero() {
        assert_eq!(FitnessTransform::ShiftedReciprocal.apply(f64::NAN), 0.0);
        assert_eq!(FitnessTransform::Negated.apply(f64::NAN), 0.0);
    }

    #[test]
    fn test_custom() {
        fn exp_decay(c: f64) -> f64 {
            (-c).exp()
        }
        let t = FitnessTransform::Custom(exp_decay);
        assert!((t.apply(0.0) - 1.0).abs() < 1e-12);
        assert_eq!(format!("{t:?}"), "Custom(..)");
    }
}
