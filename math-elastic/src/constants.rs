//! Physical and sampling constants

use std::f64::consts::PI;

/// Stiffness unit conversion, GPa to Pa
///
/// With C in GPa and density in kg/m³, `w · GPA_TO_PA / density` is a squared
/// speed in (m/s)².
pub const GPA_TO_PA: f64 = 1.0e9;

/// 2π
pub const PI2: f64 = 2.0 * PI;

/// Angle samples per radian for plane curves
pub const DEFAULT_SAMPLES_PER_RADIAN: usize = 500;

/// Longitude samples of the spherical grid (latitudes get one more)
pub const DEFAULT_SURFACE_ANGLE_SAMPLES: usize = 40;

/// Slowness is displayed as `SLOWNESS_SCALE / velocity`
pub const DEFAULT_SLOWNESS_SCALE: f64 = 1.0e5;

/// Display scale of group velocity vectors in plane curves
pub const DEFAULT_CURVE_GROUP_VELOCITY_SCALE: f64 = 1.0e7;

/// Display scale of group velocity vectors on surfaces
pub const DEFAULT_SURFACE_GROUP_VELOCITY_SCALE: f64 = 1.0e6;

/// Decimal digits kept in polarization payloads
pub const DEFAULT_POLARIZATION_DECIMALS: i32 = 3;

/// Decimal digits used by the hexagonal relation in symmetry detection
pub const HEXAGONAL_ROUNDING_DECIMALS: i32 = 2;

/// Relative tolerance of material lookup
pub const CATALOG_RTOL: f64 = 1.0e-5;

/// Absolute tolerance of material lookup (GPa)
pub const CATALOG_ATOL: f64 = 1.0e-8;

/// Sweep limit of the 3×3 symmetric eigen-decomposition
pub const MAX_EIGEN_ITERATIONS: usize = 1000;

/// Number of angle samples of a full turn, `floor(2π · samples_per_radian)`
pub fn turn_samples(samples_per_radian: usize) -> usize {
    (PI2 * samples_per_radian as f64) as usize
}

/// Round to a number of decimal digits, ties to even
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
