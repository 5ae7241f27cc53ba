//! Leaf geometry along a single cereal axis.
//!
//! Main components:
//! - [`height`] — ligule heights from a geometric series of internodes.
//! - [`area`] — per-leaf area shares from a skewed bell profile.
//! - [`validate`] — shared parameter checks.
//! - [`layout`] — per-phytomer records combining both distributions.
//! - [`config`] — a serializable axis parameter set.
//! - [`sample`] — random parameter sets for batch studies.
//! - [`error`] — the error types returned by this crate.
//! - [`types`] — shared type aliases.

pub mod area;
pub mod config;
pub mod error;
pub mod height;
pub mod layout;
pub mod sample;
pub mod types;
pub mod validate;

pub use area::{LeafAreaSpec, bell_profile, distribute_leaf_areas, relative_ranks};
pub use config::AxisConfig;
pub use error::{ConfigError, InvalidParameter};
pub use height::{AxisGeometrySpec, distribute_heights, distribute_heights_above_offset};
pub use layout::{AxisLayout, Phytomer};
pub use sample::{ParameterRanges, sample_config, sample_configs};
