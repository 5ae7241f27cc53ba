//! Leaf area along an axis.
//!
//! Each leaf gets a weight from a skewed bell curve over its relative rank
//! `r = i / n`:
//!
//! `w(r) = exp(-(k / rmax) * (2 (r - rmax)^2 + (r - rmax)^3))`,
//! with `k = -ln(skew) * rmax`.
//!
//! The cubic term makes the curve fall off faster above the peak than
//! below it. Weights are normalized so the leaf areas add up to the
//! requested total.

use crate::{error::InvalidParameter, validate};

/// Parameters of [`distribute_leaf_areas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafAreaSpec {
    /// Sum of all leaf areas on the axis.
    pub total_leaf_area: f64,
    /// Number of leaves on the axis.
    pub phytomer_count: usize,
    /// Relative rank of the largest leaf, in `(0, 1]`.
    pub peak_position: f64,
    /// Curve sharpness in `(0, 1)`; smaller is sharper.
    pub skew_factor: f64,
}

impl LeafAreaSpec {
    /// Checks every precondition of [`distribute_leaf_areas`] without computing.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        validate::positive_count("phytomer_count", self.phytomer_count)?;
        validate::positive("total_leaf_area", self.total_leaf_area)?;
        validate_shape(self.peak_position, self.skew_factor)
    }

    /// See [`distribute_leaf_areas`].
    pub fn distribute(&self) -> Result<Vec<f64>, InvalidParameter> {
        distribute_leaf_areas(
            self.total_leaf_area,
            self.phytomer_count,
            self.peak_position,
            self.skew_factor,
        )
    }
}

fn validate_shape(peak_position: f64, skew_factor: f64) -> Result<(), InvalidParameter> {
    validate::unit_rank("peak_position", peak_position)?;
    validate::open_unit("skew_factor", skew_factor)?;
    Ok(())
}

/// Evenly spaced relative ranks over `[1/n, 1]`, lowest leaf first.
///
/// Returns an empty vector for `n == 0`.
pub fn relative_ranks(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64 / n as f64).collect()
}

/// Natural log of the bell weight at every rank.
///
/// All values are `<= 0`, with `0` only where a rank equals the peak.
fn log_weights(n: usize, rmax: f64, skew: f64) -> impl Iterator<Item = f64> {
    let k = -skew.ln() * rmax;
    relative_ranks(n).into_iter().map(move |r| {
        let d = r - rmax;
        -(k / rmax) * (2.0 * d * d + d * d * d)
    })
}

/// Splits `total_leaf_area` across `phytomer_count` leaves, lowest leaf first.
///
/// The result is non-negative and sums to `total_leaf_area` up to rounding.
///
/// ### Errors
/// [`InvalidParameter`] when `phytomer_count` is zero, `total_leaf_area` is
/// not strictly positive, `peak_position` lies outside `(0, 1]`, or
/// `skew_factor` lies outside `(0, 1)`. Non-finite inputs are rejected too.
pub fn distribute_leaf_areas(
    total_leaf_area: f64,
    phytomer_count: usize,
    peak_position: f64,
    skew_factor: f64,
) -> Result<Vec<f64>, InvalidParameter> {
    LeafAreaSpec {
        total_leaf_area,
        phytomer_count,
        peak_position,
        skew_factor,
    }
    .validate()?;

    tracing::debug!(
        total_leaf_area,
        phytomer_count,
        peak_position,
        skew_factor,
        "distributing leaf areas"
    );

    // Shift by the largest log weight before exponentiating; the shift
    // cancels in the normalization and keeps the largest weight at 1.
    let logs: Vec<f64> = log_weights(phytomer_count, peak_position, skew_factor).collect();
    let top = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = logs.iter().map(|l| (l - top).exp()).collect();
    let sum: f64 = weights.iter().sum();

    Ok(weights
        .into_iter()
        .map(|w| total_leaf_area * (w / sum))
        .collect())
}

/// Un-normalized bell profile scaled so its peak value is `max_leaf_size`.
///
/// Useful for per-leaf sizes such as blade length, where the largest leaf
/// is known rather than the total. A leaf whose rank equals
/// `peak_position` gets exactly `max_leaf_size`; every other leaf gets less.
///
/// ### Errors
/// [`InvalidParameter`] under the same conditions as
/// [`distribute_leaf_areas`], with `max_leaf_size` in place of the total.
pub fn bell_profile(
    max_leaf_size: f64,
    phytomer_count: usize,
    peak_position: f64,
    skew_factor: f64,
) -> Result<Vec<f64>, InvalidParameter> {
    validate::positive_count("phytomer_count", phytomer_count)?;
    validate::positive("max_leaf_size", max_leaf_size)?;
    validate_shape(peak_position, skew_factor)?;

    Ok(log_weights(phytomer_count, peak_position, skew_factor)
        .map(|l| max_leaf_size * l.exp())
        .collect())
}
