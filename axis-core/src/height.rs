//! Ligule heights along an axis.
//!
//! Internode lengths follow a geometric series of ratio `q`, normalized so
//! that the partial sums end exactly at the axis height:
//!
//! `h(i) = H * (1 - q^i) / (1 - q^n)` for `i` in `1..=n`,
//!
//! with the uniform spacing `h(i) = i * H / n` as the `q == 1` limit.
//! `q < 1` packs the upper ligules together, `q > 1` the lower ones.

use crate::{error::InvalidParameter, validate};

/// Geometry of one axis, as consumed by [`distribute_heights`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisGeometrySpec {
    /// Height of the highest ligule.
    pub total_height: f64,
    /// Number of leaves on the axis.
    pub phytomer_count: usize,
    /// Ratio between successive internode lengths.
    pub progression_factor: f64,
    /// Pseudostem height below the first ligule.
    pub base_offset: f64,
}

impl AxisGeometrySpec {
    /// Checks every precondition of [`distribute_heights`] without computing.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        validate::positive_count("phytomer_count", self.phytomer_count)?;
        validate::positive("progression_factor", self.progression_factor)?;
        validate::positive("total_height", self.total_height)?;
        validate::below_height("base_offset", self.base_offset, self.total_height)?;
        Ok(())
    }

    /// See [`distribute_heights`].
    pub fn distribute(&self) -> Result<Vec<f64>, InvalidParameter> {
        distribute_heights(
            self.total_height,
            self.phytomer_count,
            self.progression_factor,
            self.base_offset,
        )
    }

    /// See [`distribute_heights_above_offset`].
    pub fn distribute_above_offset(&self) -> Result<Vec<f64>, InvalidParameter> {
        distribute_heights_above_offset(
            self.total_height,
            self.phytomer_count,
            self.progression_factor,
            self.base_offset,
        )
    }
}

/// Fraction of the axis height reached at ligule `i` (1-based) out of `n`.
///
/// For `q > 1` the series is rewritten in powers of `1/q` so that large
/// counts do not overflow `q^n`. Rank `n` always maps to exactly `1.0`.
fn cumulative_fraction(i: usize, n: usize, q: f64) -> f64 {
    if q == 1.0 {
        return i as f64 / n as f64;
    }
    if q < 1.0 {
        (1.0 - q.powf(i as f64)) / (1.0 - q.powf(n as f64))
    } else {
        let p = q.recip();
        p.powf((n - i) as f64) * (1.0 - p.powf(i as f64)) / (1.0 - p.powf(n as f64))
    }
}

fn geometric_series(total_height: f64, phytomer_count: usize, q: f64) -> Vec<f64> {
    (1..=phytomer_count)
        .map(|i| total_height * cumulative_fraction(i, phytomer_count, q))
        .collect()
}

/// Returns the ligule height of every phytomer, lowest leaf first.
///
/// The last height equals `total_height`. `base_offset` is validated against
/// the axis height but is **not** added to the result; use
/// [`distribute_heights_above_offset`] to lift the series above the
/// pseudostem.
///
/// ### Errors
/// [`InvalidParameter`] when `phytomer_count` is zero, `progression_factor`
/// is not strictly positive, `total_height` is not strictly positive, or
/// `base_offset >= total_height`. Non-finite inputs are rejected too.
pub fn distribute_heights(
    total_height: f64,
    phytomer_count: usize,
    progression_factor: f64,
    base_offset: f64,
) -> Result<Vec<f64>, InvalidParameter> {
    AxisGeometrySpec {
        total_height,
        phytomer_count,
        progression_factor,
        base_offset,
    }
    .validate()?;

    tracing::debug!(
        total_height,
        phytomer_count,
        progression_factor,
        "distributing ligule heights"
    );
    Ok(geometric_series(
        total_height,
        phytomer_count,
        progression_factor,
    ))
}

/// Returns ligule heights spread over `[base_offset, total_height]`.
///
/// The geometric series is applied to the height left above the pseudostem
/// and every value is shifted up by `base_offset`, so the first ligule sits
/// above the pseudostem and the last one at `total_height`.
///
/// ### Errors
/// Everything [`distribute_heights`] rejects, plus a negative `base_offset`.
pub fn distribute_heights_above_offset(
    total_height: f64,
    phytomer_count: usize,
    progression_factor: f64,
    base_offset: f64,
) -> Result<Vec<f64>, InvalidParameter> {
    AxisGeometrySpec {
        total_height,
        phytomer_count,
        progression_factor,
        base_offset,
    }
    .validate()?;
    validate::non_negative("base_offset", base_offset)?;

    tracing::debug!(
        total_height,
        phytomer_count,
        progression_factor,
        base_offset,
        "distributing ligule heights above pseudostem"
    );
    let remaining = total_height - base_offset;
    let mut heights = geometric_series(remaining, phytomer_count, progression_factor);
    for h in &mut heights {
        *h += base_offset;
    }
    if let Some(last) = heights.last_mut() {
        *last = total_height;
    }
    Ok(heights)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPS, "got {actual:?}, expected {expected:?}");
        }
    }

    #[test]
    fn unit_ratio_gives_uniform_spacing() {
        let h = distribute_heights(100.0, 4, 1.0, 0.0).unwrap();
        assert_eq!(h, vec![25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn half_ratio_matches_closed_form() {
        let h = distribute_heights(100.0, 3, 0.5, 0.0).unwrap();

        // 100 * (1 - 0.5^i) / (1 - 0.125)
        assert_close(&h, &[400.0 / 7.0, 600.0 / 7.0, 100.0]);
        assert!((h[0] - 57.142857).abs() < 1e-6);
    }

    #[test]
    fn last_height_is_exactly_total_height() {
        for q in [0.3, 0.9, 1.0, 1.1, 2.5] {
            let h = distribute_heights(187.3, 17, q, 10.0).unwrap();
            assert_eq!(*h.last().unwrap(), 187.3, "q = {q}");
        }
    }

    #[test]
    fn ratio_below_one_packs_upper_internodes() {
        let h = distribute_heights(100.0, 5, 0.7, 0.0).unwrap();
        let first_internode = h[0];
        let last_internode = h[4] - h[3];
        assert!(first_internode > last_internode);
    }

    #[test]
    fn ratio_above_one_packs_lower_internodes() {
        let h = distribute_heights(100.0, 5, 1.4, 0.0).unwrap();
        let first_internode = h[0];
        let last_internode = h[4] - h[3];
        assert!(first_internode < last_internode);
    }

    #[test]
    fn large_ratio_and_count_do_not_overflow() {
        let h = distribute_heights(1.0, 400, 3.0, 0.0).unwrap();
        assert!(h.iter().all(|v| v.is_finite()));
        assert_eq!(*h.last().unwrap(), 1.0);
        assert!(h[398] < h[399]);
    }

    #[test]
    fn reciprocal_ratios_mirror_internodes() {
        // Internodes of q are the internodes of 1/q read top-down.
        let up = distribute_heights(10.0, 4, 2.0, 0.0).unwrap();
        let down = distribute_heights(10.0, 4, 0.5, 0.0).unwrap();

        let internodes = |h: &[f64]| {
            let mut prev = 0.0;
            h.iter()
                .map(|&v| {
                    let d = v - prev;
                    prev = v;
                    d
                })
                .collect::<Vec<_>>()
        };
        let mut reversed = internodes(&down);
        reversed.reverse();
        assert_close(&internodes(&up), &reversed);
    }

    #[test]
    fn single_phytomer_sits_at_the_top() {
        assert_eq!(distribute_heights(42.0, 1, 0.8, 0.0).unwrap(), vec![42.0]);
    }

    #[test]
    fn offset_is_validated_but_not_applied() {
        let with_offset = distribute_heights(100.0, 4, 1.0, 30.0).unwrap();
        let without = distribute_heights(100.0, 4, 1.0, 0.0).unwrap();
        assert_eq!(with_offset, without);

        let err = distribute_heights(100.0, 4, 1.0, 100.0).unwrap_err();
        assert_eq!(err.name, "base_offset");
    }

    #[test]
    fn above_offset_spreads_over_remaining_height() {
        let h = distribute_heights_above_offset(100.0, 4, 1.0, 20.0).unwrap();
        assert_close(&h, &[40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn above_offset_rejects_negative_offset() {
        let err = distribute_heights_above_offset(100.0, 4, 1.0, -1.0).unwrap_err();
        assert_eq!(err.name, "base_offset");
    }

    #[test]
    fn validation_order_reports_count_first() {
        let err = distribute_heights(100.0, 0, -1.0, 200.0).unwrap_err();
        assert_eq!(err.name, "phytomer_count");

        let err = distribute_heights(100.0, 3, -1.0, 200.0).unwrap_err();
        assert_eq!(err.name, "progression_factor");
    }

    #[test]
    fn spec_methods_match_free_functions() {
        let spec = AxisGeometrySpec {
            total_height: 120.0,
            phytomer_count: 6,
            progression_factor: 0.85,
            base_offset: 15.0,
        };
        assert_eq!(
            spec.distribute().unwrap(),
            distribute_heights(120.0, 6, 0.85, 15.0).unwrap()
        );
        assert_eq!(
            spec.distribute_above_offset().unwrap(),
            distribute_heights_above_offset(120.0, 6, 0.85, 15.0).unwrap()
        );
    }
}
