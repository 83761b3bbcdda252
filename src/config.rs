use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::models::bs::OutputField;
use crate::models::Precision;
use crate::sweep::{SpotGrid, DEFAULT_SAMPLES, DEFAULT_SPOT_MAX_MULTIPLIER, DEFAULT_SPOT_MIN};

/// Spot grid used when sweeping the underlying price
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SweepConfig {
    /// Lowest spot sampled
    #[serde(default = "default_spot_min")]
    pub spot_min: f64,
    /// Highest spot sampled, as a multiple of the base spot
    #[serde(default = "default_spot_max_multiplier")]
    pub spot_max_multiplier: f64,
    /// Number of evenly spaced samples, endpoints included
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default)]
    pub precision: Precision,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            spot_min: default_spot_min(),
            spot_max_multiplier: default_spot_max_multiplier(),
            samples: default_samples(),
            precision: Precision::default(),
        }
    }
}

impl SweepConfig {
    /// Upper end of the grid for a given base spot.
    pub fn spot_max(&self, base_spot: f64) -> f64 {
        self.spot_max_multiplier * base_spot
    }

    /// Grid for a sweep around `base_spot`.
    pub fn grid(&self, base_spot: f64) -> SpotGrid {
        SpotGrid::new(self.spot_min, self.spot_max(base_spot), self.samples)
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(anyhow!("sweep.samples must be at least 1"));
        }
        if !(self.spot_min.is_finite() && self.spot_min > 0.0) {
            return Err(anyhow!(
                "sweep.spot_min must be positive, got {}",
                self.spot_min
            ));
        }
        if !(self.spot_max_multiplier.is_finite() && self.spot_max_multiplier > 0.0) {
            return Err(anyhow!(
                "sweep.spot_max_multiplier must be positive, got {}",
                self.spot_max_multiplier
            ));
        }
        Ok(())
    }
}

/// Chart rendering settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Outputs charted, one file each
    #[serde(default = "default_fields")]
    pub fields: Vec<OutputField>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fields: default_fields(),
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(anyhow!(
                "plot dimensions must be non-zero, got {}x{}",
                self.width,
                self.height
            ));
        }
        Ok(())
    }
}

/// Top-level settings for the sweep/plot driver
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriverConfig {
    /// Directory receiving rendered charts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub sweep: SweepConfig,

    #[serde(default)]
    pub plot: PlotConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            sweep: SweepConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Coarse grid and small charts for quick inspection
    pub fn quick() -> Self {
        Self {
            sweep: SweepConfig {
                samples: 25,
                ..SweepConfig::default()
            },
            plot: PlotConfig {
                width: 640,
                height: 480,
                ..PlotConfig::default()
            },
            ..Self::default()
        }
    }

    /// Dense grid, full precision values and large charts
    pub fn high_resolution() -> Self {
        Self {
            sweep: SweepConfig {
                samples: 500,
                precision: Precision::Full,
                ..SweepConfig::default()
            },
            plot: PlotConfig {
                width: 1280,
                height: 960,
                ..PlotConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: DriverConfig = toml::from_str(s).context("failed to parse driver config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.sweep.validate()?;
        self.plot.validate()
    }
}

fn default_spot_min() -> f64 {
    DEFAULT_SPOT_MIN
}

fn default_spot_max_multiplier() -> f64 {
    DEFAULT_SPOT_MAX_MULTIPLIER
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_fields() -> Vec<OutputField> {
    OutputField::CHARTED.to_vec()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("plots")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = DriverConfig::from_toml_str("").unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.sweep.samples, 100);
        assert_eq!(config.sweep.spot_min, 0.01);
        assert_eq!(config.sweep.spot_max(50.0), 100.0);
        assert_eq!(config.output_dir, PathBuf::from("plots"));
        assert_eq!(config.plot.fields.len(), 6);
    }

    #[test]
    fn default_grid_matches_standard_spot_grid() {
        let sweep = SweepConfig::default();
        assert_eq!(sweep.grid(100.0), SpotGrid::around(100.0, 100));
        assert_eq!(sweep.grid(100.0).points().last(), Some(&200.0));
    }

    #[test]
    fn partial_toml_overrides_only_given_fields() {
        let config = DriverConfig::from_toml_str(
            r#"
            output_dir = "out/charts"

            [sweep]
            samples = 40
            precision = "full"

            [plot]
            fields = ["price", "gamma"]
            "#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out/charts"));
        assert_eq!(config.sweep.samples, 40);
        assert_eq!(config.sweep.precision, Precision::Full);
        assert_eq!(config.sweep.spot_max_multiplier, 2.0);
        assert_eq!(
            config.plot.fields,
            vec![OutputField::Price, OutputField::Gamma]
        );
        assert_eq!(config.plot.width, 800);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(DriverConfig::from_toml_str("[sweep]\nsamples = 0").is_err());
        assert!(DriverConfig::from_toml_str("[sweep]\nspot_min = -1.0").is_err());
        assert!(DriverConfig::from_toml_str("[plot]\nwidth = 0").is_err());
        assert!(DriverConfig::from_toml_str("[plot]\nfields = [\"charm\"]").is_err());
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            DriverConfig::default(),
            DriverConfig::quick(),
            DriverConfig::high_resolution(),
        ] {
            assert!(config.validate().is_ok());
        }
    }
}
