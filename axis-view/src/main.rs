//! Application entry point for the axis leaf geometry viewer.
//!
//! This binary parses the command line, installs the tracing subscriber,
//! loads the optional axis config, and hands everything to [`Viewer`].

mod viewer;

use std::path::{Path, PathBuf};

use axis_core::{AxisConfig, ConfigError};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use viewer::Viewer;

/// Interactive view of ligule heights and leaf areas along one axis.
#[derive(Debug, Parser)]
#[command(name = "axis-view", version)]
struct CliArgs {
    /// RON file holding the initial axis parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn load_config(path: &Path) -> Result<AxisConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
    AxisConfig::from_ron_str(&contents)
}

/// Starts the native eframe application.
///
/// A config file that cannot be read or parsed is logged and replaced by
/// [`AxisConfig::default`].
fn main() -> eframe::Result<()> {
    let args = CliArgs::parse();
    init_logging(&args.log_level);

    let cfg = match args.config.as_deref() {
        Some(path) => match load_config(path) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "loaded axis config");
                cfg
            }
            Err(err) => {
                tracing::error!(path = %path.display(), %err, "falling back to default config");
                AxisConfig::default()
            }
        },
        None => AxisConfig::default(),
    };

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Axis Leaf Geometry",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_sorghum_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/sorghum.ron");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.phytomer_count, 18);
        assert!(cfg.apply_pseudostem_offset);
    }

    #[test]
    fn missing_config_is_a_read_error() {
        let err = load_config(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn cli_accepts_config_path() {
        let args = CliArgs::parse_from(["axis-view", "--config", "axis.ron"]);
        assert_eq!(args.config, Some(PathBuf::from("axis.ron")));
        assert_eq!(args.log_level, "info");
    }
}
