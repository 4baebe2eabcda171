//! Plot data adapters
//!
//! Two fixed sampling strategies turn a (stiffness, density) pair into
//! JSON-ready payloads:
//!
//! - [`PolarPlot2D`]: dense angle sweeps in the XY, XZ and YZ planes
//! - [`SphericalPlot3D`]: a latitude/longitude grid over the full sphere with
//!   a triangle list
//!
//! Sampling grids are built once. [`velocity_curves`] and
//! [`velocity_surfaces`] use shared default grids held in `LazyLock` statics.
//!
//! Non-finite values (the null solution gives infinite slowness and NaN group
//! velocities) are replaced by zero element by element before anything is
//! returned.

mod curves;
mod surfaces;

pub use curves::{PlaneCurves, PolarPlot2D, VelocityCurves};
pub use surfaces::{Surface, SphericalPlot3D, SurfaceMesh, surface_faces};

use crate::config::PlotConfig;
use crate::error::Result;
use crate::stiffness::StiffnessMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Coordinate plane of a polar curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    /// All planes in payload order
    pub const ALL: [Plane; 3] = [Plane::XY, Plane::XZ, Plane::YZ];

    /// Unit direction at angle `t` (radians) in this plane
    pub fn direction(self, t: f64) -> [f64; 3] {
        let (sin, cos) = t.sin_cos();
        match self {
            Plane::XY => [cos, sin, 0.0],
            Plane::XZ => [cos, 0.0, sin],
            Plane::YZ => [0.0, cos, sin],
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Plane::XY => "XY",
            Plane::XZ => "XZ",
            Plane::YZ => "YZ",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static DEFAULT_POLAR_PLOT: LazyLock<PolarPlot2D> =
    LazyLock::new(|| PolarPlot2D::new(&PlotConfig::default()));

static DEFAULT_SPHERICAL_PLOT: LazyLock<SphericalPlot3D> =
    LazyLock::new(|| SphericalPlot3D::new(&PlotConfig::default()));

/// Plane curves on the default grid
pub fn velocity_curves(stiffness: &StiffnessMatrix, density: f64) -> Result<VelocityCurves> {
    DEFAULT_POLAR_PLOT.evaluate(stiffness, density)
}

/// Surface meshes on the default grid
pub fn velocity_surfaces(stiffness: &StiffnessMatrix, density: f64) -> Result<SurfaceMesh> {
    DEFAULT_SPHERICAL_PLOT.evaluate(stiffness, density)
}

/// `num` evenly spaced values from `start` to `end`, both included
pub fn lin_space(start: f64, end: f64, num: usize) -> Vec<f64> {
    if num < 2 {
        return vec![start; num];
    }
    let step = (end - start) / (num - 1) as f64;
    let mut values: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
    values[num - 1] = end;
    values
}

/// Replace a non-finite value by zero, counting replacements
fn finite_or_zero(value: f64, replaced: &mut usize) -> f64 {
    if value.is_finite() {
        value
    } else {
        *replaced += 1;
        0.0
    }
}

/// Largest value, zero for an empty sequence
fn max_or_zero(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().reduce(f64::max).unwrap_or(0.0)
}
