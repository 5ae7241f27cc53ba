//! Random axis parameter sets.
//!
//! Batch studies explore an architecture space by drawing many
//! [`AxisConfig`]s from per-parameter ranges and running each one through
//! the distributions independently.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::{config::AxisConfig, error::InvalidParameter, validate};

/// Inclusive bounds for every sampled [`AxisConfig`] field.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRanges {
    pub height: RangeInclusive<f64>,
    pub phytomer_count: RangeInclusive<usize>,
    pub stem_q: RangeInclusive<f64>,
    pub pseudostem_height: RangeInclusive<f64>,
    pub leaf_area: RangeInclusive<f64>,
    pub rmax: RangeInclusive<f64>,
    pub skew: RangeInclusive<f64>,
    /// Copied as-is into every sampled config.
    pub apply_pseudostem_offset: bool,
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            height: 100.0..=300.0,
            phytomer_count: 10..=22,
            stem_q: 0.9..=1.3,
            pseudostem_height: 0.0..=50.0,
            leaf_area: 2000.0..=8000.0,
            rmax: 0.5..=0.85,
            skew: 0.0001..=0.01,
            apply_pseudostem_offset: false,
        }
    }
}

fn ordered(name: &'static str, start: f64, end: f64) -> Result<(), InvalidParameter> {
    if start <= end {
        Ok(())
    } else {
        Err(InvalidParameter::new(
            name,
            start,
            "range start must not exceed range end",
        ))
    }
}

/// Checks a pair of bounds with the same rule applied to single values.
fn bounds(
    name: &'static str,
    range: &RangeInclusive<f64>,
    check: fn(&'static str, f64) -> Result<f64, InvalidParameter>,
) -> Result<(), InvalidParameter> {
    check(name, *range.start())?;
    check(name, *range.end())?;
    ordered(name, *range.start(), *range.end())
}

impl ParameterRanges {
    /// Ensures every config drawn from these ranges is valid.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        bounds("height", &self.height, validate::positive)?;
        validate::positive_count("phytomer_count", *self.phytomer_count.start())?;
        ordered(
            "phytomer_count",
            *self.phytomer_count.start() as f64,
            *self.phytomer_count.end() as f64,
        )?;
        bounds("stem_q", &self.stem_q, validate::positive)?;
        bounds(
            "pseudostem_height",
            &self.pseudostem_height,
            validate::non_negative,
        )?;
        validate::below_height(
            "pseudostem_height",
            *self.pseudostem_height.end(),
            *self.height.start(),
        )?;
        bounds("leaf_area", &self.leaf_area, validate::positive)?;
        bounds("rmax", &self.rmax, validate::unit_rank)?;
        bounds("skew", &self.skew, validate::open_unit)?;
        Ok(())
    }
}

/// Draws one config uniformly from `ranges`.
///
/// ### Errors
/// [`InvalidParameter`] when `ranges` fails [`ParameterRanges::validate`].
pub fn sample_config(
    ranges: &ParameterRanges,
    rng: &mut impl Rng,
) -> Result<AxisConfig, InvalidParameter> {
    ranges.validate()?;
    Ok(draw(ranges, rng))
}

/// Draws `count` configs from `ranges`.
pub fn sample_configs(
    ranges: &ParameterRanges,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<AxisConfig>, InvalidParameter> {
    ranges.validate()?;
    tracing::debug!(count, "sampling axis configs");
    Ok((0..count).map(|_| draw(ranges, rng)).collect())
}

fn draw(ranges: &ParameterRanges, rng: &mut impl Rng) -> AxisConfig {
    AxisConfig {
        height: rng.random_range(ranges.height.clone()),
        phytomer_count: rng.random_range(ranges.phytomer_count.clone()),
        stem_q: rng.random_range(ranges.stem_q.clone()),
        pseudostem_height: rng.random_range(ranges.pseudostem_height.clone()),
        leaf_area: rng.random_range(ranges.leaf_area.clone()),
        rmax: rng.random_range(ranges.rmax.clone()),
        skew: rng.random_range(ranges.skew.clone()),
        apply_pseudostem_offset: ranges.apply_pseudostem_offset,
    }
}
