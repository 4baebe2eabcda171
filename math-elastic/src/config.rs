//! JSON configuration for plot sampling and display scales

use crate::constants::{
    DEFAULT_CURVE_GROUP_VELOCITY_SCALE, DEFAULT_POLARIZATION_DECIMALS,
    DEFAULT_SAMPLES_PER_RADIAN, DEFAULT_SLOWNESS_SCALE, DEFAULT_SURFACE_ANGLE_SAMPLES,
    DEFAULT_SURFACE_GROUP_VELOCITY_SCALE,
};
use crate::error::{ElasticError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete configuration loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticConfig {
    /// Sampling and scaling of plot payloads
    #[serde(default)]
    pub plot: PlotConfig,
    /// Catalog material used when none is given on the command line
    #[serde(default)]
    pub default_material: Option<String>,
}

/// Sampling density and display scales of the plot adapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Angle samples per radian of the plane curves
    #[serde(default = "default_samples_per_radian")]
    pub samples_per_radian: usize,
    /// Longitude samples of the spherical grid
    #[serde(default = "default_surface_angle_samples")]
    pub surface_angle_samples: usize,
    /// Slowness is reported as `slowness_scale / velocity`
    #[serde(default = "default_slowness_scale")]
    pub slowness_scale: f64,
    /// Factor applied to group velocities in curve payloads
    #[serde(default = "default_curve_group_velocity_scale")]
    pub curve_group_velocity_scale: f64,
    /// Factor applied to group velocities in surface payloads
    #[serde(default = "default_surface_group_velocity_scale")]
    pub surface_group_velocity_scale: f64,
    /// Decimal digits kept in polarization payloads
    #[serde(default = "default_polarization_decimals")]
    pub polarization_decimals: i32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            samples_per_radian: default_samples_per_radian(),
            surface_angle_samples: default_surface_angle_samples(),
            slowness_scale: default_slowness_scale(),
            curve_group_velocity_scale: default_curve_group_velocity_scale(),
            surface_group_velocity_scale: default_surface_group_velocity_scale(),
            polarization_decimals: default_polarization_decimals(),
        }
    }
}

fn default_samples_per_radian() -> usize {
    DEFAULT_SAMPLES_PER_RADIAN
}

fn default_surface_angle_samples() -> usize {
    DEFAULT_SURFACE_ANGLE_SAMPLES
}

fn default_slowness_scale() -> f64 {
    DEFAULT_SLOWNESS_SCALE
}

fn default_curve_group_velocity_scale() -> f64 {
    DEFAULT_CURVE_GROUP_VELOCITY_SCALE
}

fn default_surface_group_velocity_scale() -> f64 {
    DEFAULT_SURFACE_GROUP_VELOCITY_SCALE
}

fn default_polarization_decimals() -> i32 {
    DEFAULT_POLARIZATION_DECIMALS
}

impl PlotConfig {
    /// Check that sample counts and scales are usable
    pub fn validate(&self) -> Result<()> {
        if self.samples_per_radian == 0 {
            return Err(ElasticError::InvalidConfig(
                "samples_per_radian must be positive".to_string(),
            ));
        }
        // one band of faces needs two latitude rows
        if self.surface_angle_samples < 2 {
            return Err(ElasticError::InvalidConfig(format!(
                "surface_angle_samples must be at least 2, got {}",
                self.surface_angle_samples
            )));
        }
        let scales = [
            ("slowness_scale", self.slowness_scale),
            ("curve_group_velocity_scale", self.curve_group_velocity_scale),
            ("surface_group_velocity_scale", self.surface_group_velocity_scale),
        ];
        for (name, value) in scales {
            if !(value.is_finite() && value > 0.0) {
                return Err(ElasticError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !(0..=15).contains(&self.polarization_decimals) {
            return Err(ElasticError::InvalidConfig(format!(
                "polarization_decimals must be within 0..=15, got {}",
                self.polarization_decimals
            )));
        }
        Ok(())
    }
}

impl ElasticConfig {
    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ElasticConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.plot.validate()
    }
}
