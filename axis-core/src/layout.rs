use crate::{config::AxisConfig, error::InvalidParameter, types::PhytomerRank};

/// Geometry of a single leaf position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phytomer {
    pub rank: PhytomerRank,
    pub relative_rank: f64,
    pub ligule_height: f64,
    pub leaf_area: f64,
}

/// Per-phytomer heights and areas of one axis, lowest leaf first.
///
/// This is what a plant geometry builder consumes to place and size the
/// leaves of an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    phytomers: Vec<Phytomer>,
}

impl AxisLayout {
    /// Runs both distributions for `config` and pairs their outputs.
    ///
    /// Heights are lifted above the pseudostem when
    /// [`AxisConfig::apply_pseudostem_offset`] is set.
    pub fn from_config(config: &AxisConfig) -> Result<Self, InvalidParameter> {
        let geometry = config.geometry();
        let heights = if config.apply_pseudostem_offset {
            geometry.distribute_above_offset()?
        } else {
            geometry.distribute()?
        };
        let areas = config.leaf_area_spec().distribute()?;

        let n = config.phytomer_count;
        let phytomers = heights
            .into_iter()
            .zip(areas)
            .enumerate()
            .map(|(i, (ligule_height, leaf_area))| Phytomer {
                rank: i + 1,
                relative_rank: (i + 1) as f64 / n as f64,
                ligule_height,
                leaf_area,
            })
            .collect();

        Ok(Self { phytomers })
    }

    pub fn phytomers(&self) -> &[Phytomer] {
        &self.phytomers
    }

    pub fn len(&self) -> usize {
        self.phytomers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phytomers.is_empty()
    }

    pub fn ligule_heights(&self) -> Vec<f64> {
        self.phytomers.iter().map(|p| p.ligule_height).collect()
    }

    pub fn leaf_areas(&self) -> Vec<f64> {
        self.phytomers.iter().map(|p| p.leaf_area).collect()
    }

    pub fn total_leaf_area(&self) -> f64 {
        self.phytomers.iter().map(|p| p.leaf_area).sum()
    }

    /// The phytomer carrying the largest leaf.
    ///
    /// Ties resolve to the lowest leaf.
    pub fn largest_leaf(&self) -> Option<&Phytomer> {
        self.phytomers
            .iter()
            .reduce(|best, p| if p.leaf_area > best.leaf_area { p } else { best })
    }

    /// Height of the top ligule, or `0.0` for an empty layout.
    pub fn top_height(&self) -> f64 {
        self.phytomers.last().map_or(0.0, |p| p.ligule_height)
    }
}
