//! Level-to-level interpolation of a profile.

use crate::error::{Error, Result};

/// How the vertical coordinate is treated between two levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    /// Linear in the logarithm of the coordinate, for pressure.
    Log,
}

impl Scale {
    fn apply(&self, x: f64) -> f64 {
        match self {
            Scale::Linear => x,
            Scale::Log => x.ln(),
        }
    }
}

/// Interpolate `values` given on `levels` onto `targets`.
///
/// `levels` must be strictly monotonic, in either direction. A target outside
/// the span of `levels` is an error; there is no extrapolation.
pub fn interpolate(levels: &[f64], values: &[f64], targets: &[f64], scale: Scale) -> Result<Vec<f64>> {
    if levels.len() != values.len() {
        return Err(Error::LengthMismatch {
            levels: levels.len(),
            values: values.len(),
        });
    }

    let (min, max) = match (levels.first(), levels.last()) {
        (Some(&a), Some(&b)) => (a.min(b), a.max(b)),
        _ => {
            return Err(Error::Interpolation {
                target: targets.first().copied().unwrap_or(f64::NAN),
                min: f64::NAN,
                max: f64::NAN,
            })
        }
    };
    let descending = levels.len() > 1 && levels[0] > levels[levels.len() - 1];

    targets
        .iter()
        .map(|&target| {
            if !(min..=max).contains(&target) {
                return Err(Error::Interpolation { target, min, max });
            }
            Ok(interpolate_one(levels, values, target, scale, descending))
        })
        .collect()
}

fn interpolate_one(levels: &[f64], values: &[f64], target: f64, scale: Scale, descending: bool) -> f64 {
    // index of the first level at or past the target in the direction of the levels
    let above = levels.partition_point(|&l| if descending { l > target } else { l < target });

    if above == 0 || levels[above] == target {
        return values[above];
    }
    let below = above - 1;

    let x0 = scale.apply(levels[below]);
    let x1 = scale.apply(levels[above]);
    let run = x1 - x0;
    let dx = scale.apply(target) - x0;
    let rise = values[above] - values[below];

    values[below] + dx * rise / run
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn should_interpolate_increasing_levels() {
        let out = interpolate(&[0.0, 10.0, 20.0], &[1.0, 2.0, 4.0], &[0.0, 5.0, 15.0, 20.0], Scale::Linear)
            .unwrap();

        assert_eq!(out, vec![1.0, 1.5, 3.0, 4.0]);
    }

    #[test]
    fn should_interpolate_decreasing_levels() {
        let out = interpolate(&[1000.0, 500.0, 100.0], &[300.0, 250.0, 200.0], &[750.0, 100.0], Scale::Linear)
            .unwrap();

        assert_eq!(out, vec![275.0, 200.0]);
    }

    #[test]
    fn should_interpolate_in_log_pressure() {
        let out = interpolate(&[1.0e5, 1.0e3], &[0.0, 2.0], &[1.0e4], Scale::Log).unwrap();

        assert_relative_eq!(out[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn should_not_extrapolate() {
        let err = interpolate(&[0.0, 10.0], &[1.0, 2.0], &[10.5], Scale::Linear).unwrap_err();

        assert!(matches!(err, Error::Interpolation { target, .. } if target == 10.5));
    }

    #[test]
    fn should_reject_mismatched_lengths() {
        let err = interpolate(&[0.0, 10.0, 20.0], &[1.0, 2.0], &[5.0], Scale::Linear).unwrap_err();

        assert!(matches!(err, Error::LengthMismatch { levels: 3, values: 2 }));
    }

    #[test]
    fn should_fail_on_empty_levels() {
        assert!(interpolate(&[], &[], &[1.0], Scale::Linear).is_err());
    }
}
