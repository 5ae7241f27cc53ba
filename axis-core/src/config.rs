//! Axis parameter set with RON persistence.

use serde::{Deserialize, Serialize};

use crate::{
    area::LeafAreaSpec,
    error::{ConfigError, InvalidParameter},
    height::AxisGeometrySpec,
};

/// Architecture parameters of one cereal axis.
///
/// Field names follow the usual crop-model vocabulary; missing fields in a
/// RON document fall back to [`AxisConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisConfig {
    /// Height of the highest ligule (cm).
    pub height: f64,
    /// Number of leaves.
    pub phytomer_count: usize,
    /// Geometric ratio between successive internodes.
    pub stem_q: f64,
    /// Pseudostem height below the first ligule (cm).
    pub pseudostem_height: f64,
    /// Total leaf area of the axis (cm²).
    pub leaf_area: f64,
    /// Relative rank of the largest leaf.
    pub rmax: f64,
    /// Sharpness of the leaf area profile.
    pub skew: f64,
    /// Spread ligules over `[pseudostem_height, height]` instead of `(0, height]`.
    pub apply_pseudostem_offset: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            height: 200.0,
            phytomer_count: 16,
            stem_q: 1.1,
            pseudostem_height: 20.0,
            leaf_area: 5000.0,
            rmax: 0.67,
            skew: 0.0005,
            apply_pseudostem_offset: false,
        }
    }
}

impl AxisConfig {
    /// Height distribution inputs.
    pub fn geometry(&self) -> AxisGeometrySpec {
        AxisGeometrySpec {
            total_height: self.height,
            phytomer_count: self.phytomer_count,
            progression_factor: self.stem_q,
            base_offset: self.pseudostem_height,
        }
    }

    /// Area distribution inputs.
    pub fn leaf_area_spec(&self) -> LeafAreaSpec {
        LeafAreaSpec {
            total_leaf_area: self.leaf_area,
            phytomer_count: self.phytomer_count,
            peak_position: self.rmax,
            skew_factor: self.skew,
        }
    }

    /// Returns the first violated precondition of either distribution.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        self.geometry().validate()?;
        if self.apply_pseudostem_offset {
            crate::validate::non_negative("base_offset", self.pseudostem_height)?;
        }
        self.leaf_area_spec().validate()
    }

    /// Parses and validates a RON document.
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AxisConfig = ron::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AxisConfig::default().validate().is_ok());
    }

    #[test]
    fn default_config_serializes() {
        let ron_str = AxisConfig::default().to_ron_string().unwrap();
        assert!(ron_str.contains("phytomer_count: 16"));
        assert!(ron_str.contains("apply_pseudostem_offset: false"));
    }

    #[test]
    fn config_roundtrip() {
        let mut config = AxisConfig::default();
        config.height = 312.5;
        config.apply_pseudostem_offset = true;

        let ron_str = config.to_ron_string().unwrap();
        assert_eq!(AxisConfig::from_ron_str(&ron_str).unwrap(), config);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = AxisConfig::from_ron_str("(height: 150.0, phytomer_count: 12)").unwrap();
        assert_eq!(config.height, 150.0);
        assert_eq!(config.phytomer_count, 12);
        assert_eq!(config.skew, AxisConfig::default().skew);
    }

    #[test]
    fn comments_are_accepted() {
        let config = AxisConfig::from_ron_str("// sorghum\n(\n  // defaults\n)").unwrap();
        assert_eq!(config, AxisConfig::default());
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let err = AxisConfig::from_ron_str("{{not valid}}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected_on_load() {
        let err = AxisConfig::from_ron_str("(skew: 1.0)").unwrap_err();
        match err {
            ConfigError::Invalid(p) => assert_eq!(p.name, "skew_factor"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_pseudostem_only_matters_when_applied() {
        let mut config = AxisConfig::default();
        config.pseudostem_height = -5.0;
        assert!(config.validate().is_ok());

        config.apply_pseudostem_offset = true;
        assert_eq!(config.validate().unwrap_err().name, "base_offset");
    }
}
