//! Elastic wave propagation in anisotropic crystals
//!
//! This crate computes phase velocities, slowness, group velocities and
//! polarization vectors of the three bulk elastic waves travelling through a
//! homogeneous, linear-elastic solid described by its 6×6 stiffness matrix
//! (Voigt notation, GPa) and its density (kg/m³). It also classifies the
//! crystal symmetry class of a stiffness matrix and projects matrices onto a
//! chosen class.
//!
//! # Features
//!
//! - **Symmetry engine**: detection and projection for the seven classes from
//!   triclinic to isotropic
//! - **Christoffel solver**: eigen-decomposition of the Christoffel tensor with
//!   modes sorted by ascending phase velocity
//! - **Group velocity**: energy velocity vector of every mode
//! - **Batch evaluation**: `ndarray` batches with arbitrary leading shape,
//!   evaluated in parallel with the `native` feature
//! - **Plot data**: polar curves in the XY/XZ/YZ planes and triangulated
//!   spherical surfaces, ready for JSON
//! - **Material catalog**: named real materials and reverse lookup
//!
//! # Example
//!
//! ```rust
//! use math_audio_elastic::{Material, SymmetryClass, christoffel};
//!
//! let steel_like = Material::isotropic(4000.0, 28.0, 36.0);
//! assert_eq!(steel_like.stiffness().detect(), SymmetryClass::Isotropic);
//!
//! let wave = christoffel::solve(steel_like.stiffness(), steel_like.density(), [1.0, 1.0, 0.0]);
//! assert!((wave.velocities[0] - 3000.0).abs() < 1e-6);
//! assert!((wave.velocities[2] - 5000.0).abs() < 1e-6);
//! ```

pub mod api;
pub mod batch;
pub mod christoffel;
pub mod config;
pub mod constants;
mod error;
pub mod group_velocity;
pub mod material;
pub mod parallel;
pub mod plots;
pub mod stiffness;
pub mod symmetry;

pub use batch::WaveField;
pub use christoffel::WaveSolution;
pub use config::{ElasticConfig, PlotConfig};
pub use error::{ElasticError, Result};
pub use material::{CatalogEntry, Material};
pub use plots::{Plane, PolarPlot2D, SphericalPlot3D, SurfaceMesh, VelocityCurves};
pub use stiffness::StiffnessMatrix;
pub use symmetry::SymmetryClass;

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
