//! Materials: a stiffness matrix paired with a density
//!
//! Constructors take the independent constants of a symmetry class (GPa) and
//! the density (kg/m³), place them in the upper triangle and project the
//! matrix onto the class. [`catalog`] holds named real materials.

mod catalog;

pub use catalog::{CatalogEntry, by_symmetry, catalog, classify, find};

use crate::stiffness::{StiffnessMatrix, VoigtRows};
use crate::symmetry::SymmetryClass;
use serde::{Deserialize, Serialize};

/// Homogeneous linear-elastic solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Stiffness matrix (GPa)
    #[serde(rename = "matrix")]
    stiffness: StiffnessMatrix,
    /// Density (kg/m³)
    density: f64,
    /// Class the constants were projected onto, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class: Option<SymmetryClass>,
}

impl Material {
    /// Material from a literal matrix, kept as given
    pub fn new(stiffness: StiffnessMatrix, density: f64) -> Self {
        Self {
            stiffness,
            density,
            class: None,
        }
    }

    /// Material from literal rows
    pub fn from_rows(rows: &VoigtRows, density: f64) -> Self {
        Self::new(StiffnessMatrix::from_rows(rows), density)
    }

    /// Material from sparse upper-triangle constants projected onto `class`
    pub fn from_constants(
        density: f64,
        constants: &[((usize, usize), f64)],
        class: SymmetryClass,
    ) -> Self {
        Self {
            stiffness: StiffnessMatrix::from_constants(constants, class),
            density,
            class: Some(class),
        }
    }

    /// Cubic crystal from `c11`, `c12`, `c44`
    pub fn cubic(density: f64, c11: f64, c12: f64, c44: f64) -> Self {
        Self::from_constants(
            density,
            &[((0, 0), c11), ((0, 1), c12), ((3, 3), c44)],
            SymmetryClass::Cubic,
        )
    }

    /// Hexagonal crystal from `c11`, `c12`, `c13`, `c33`, `c44`
    pub fn hexagonal(density: f64, c11: f64, c12: f64, c13: f64, c33: f64, c44: f64) -> Self {
        Self::from_constants(
            density,
            &[
                ((0, 0), c11),
                ((0, 1), c12),
                ((0, 2), c13),
                ((2, 2), c33),
                ((3, 3), c44),
            ],
            SymmetryClass::Hexagonal,
        )
    }

    /// Tetragonal crystal from `c11`, `c12`, `c13`, `c33`, `c44`, `c66`
    #[allow(clippy::too_many_arguments)]
    pub fn tetragonal(
        density: f64,
        c11: f64,
        c12: f64,
        c13: f64,
        c33: f64,
        c44: f64,
        c66: f64,
    ) -> Self {
        Self::from_constants(
            density,
            &[
                ((0, 0), c11),
                ((0, 1), c12),
                ((0, 2), c13),
                ((2, 2), c33),
                ((3, 3), c44),
                ((5, 5), c66),
            ],
            SymmetryClass::Tetragonal,
        )
    }

    /// Orthorhombic crystal from its nine independent constants
    #[allow(clippy::too_many_arguments)]
    pub fn orthorhombic(
        density: f64,
        c11: f64,
        c12: f64,
        c13: f64,
        c22: f64,
        c23: f64,
        c33: f64,
        c44: f64,
        c55: f64,
        c66: f64,
    ) -> Self {
        Self::from_constants(
            density,
            &[
                ((0, 0), c11),
                ((0, 1), c12),
                ((0, 2), c13),
                ((1, 1), c22),
                ((1, 2), c23),
                ((2, 2), c33),
                ((3, 3), c44),
                ((4, 4), c55),
                ((5, 5), c66),
            ],
            SymmetryClass::Orthorhombic,
        )
    }

    /// Isotropic solid from the Lamé constants `λ` and `μ`
    pub fn isotropic(density: f64, lambda: f64, mu: f64) -> Self {
        Self::from_constants(
            density,
            &[((0, 0), lambda + 2.0 * mu), ((0, 1), lambda), ((3, 3), mu)],
            SymmetryClass::Isotropic,
        )
    }

    /// Stiffness matrix (GPa)
    pub fn stiffness(&self) -> &StiffnessMatrix {
        &self.stiffness
    }

    /// Density (kg/m³)
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Class used at construction, `None` for literal matrices
    pub fn class(&self) -> Option<SymmetryClass> {
        self.class
    }

    /// Same material projected onto `class`
    pub fn with_symmetry(&self, class: SymmetryClass) -> Self {
        Self {
            stiffness: self.stiffness.with_symmetry(class),
            density: self.density,
            class: Some(class),
        }
    }
}
