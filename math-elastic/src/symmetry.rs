//! Crystal symmetry classes of stiffness matrices
//!
//! Detection inspects zero patterns and equalities among the upper-triangle
//! entries of a 6×6 matrix. Projection enforces a class by chaining one pure
//! transform per class, from the least to the most constrained:
//!
//! ```text
//! Triclinic ─▶ Monoclinic ─▶ Orthorhombic ─▶ Tetragonal ─▶ Hexagonal
//!                                  │
//!                                  └─────────▶ Cubic ─────▶ Isotropic
//! ```
//!
//! Every projection ends by mirroring the upper triangle, so the result is
//! exactly symmetric.
//!
//! ## Precision
//!
//! All equalities are tested exactly, except the hexagonal relation
//! `c12 - c11 + 2·c66 = 0`, which is compared after rounding to two decimals.
//! Callers holding noisy data should round before calling [`detect`].

use crate::constants::HEXAGONAL_ROUNDING_DECIMALS;
use crate::error::ElasticError;
use crate::stiffness::StiffnessMatrix;
use nalgebra::Matrix6;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Crystal symmetry class, ordered from least to most constrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymmetryClass {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Hexagonal,
    Cubic,
    Isotropic,
}

impl SymmetryClass {
    /// All classes in order
    pub const ALL: [SymmetryClass; 7] = [
        SymmetryClass::Triclinic,
        SymmetryClass::Monoclinic,
        SymmetryClass::Orthorhombic,
        SymmetryClass::Tetragonal,
        SymmetryClass::Hexagonal,
        SymmetryClass::Cubic,
        SymmetryClass::Isotropic,
    ];

    /// Position in the order, 0 for triclinic to 6 for isotropic
    pub fn index(self) -> usize {
        self as usize
    }

    /// Class at a position in the order
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            SymmetryClass::Triclinic => "Triclinic",
            SymmetryClass::Monoclinic => "Monoclinic",
            SymmetryClass::Orthorhombic => "Orthorhombic",
            SymmetryClass::Tetragonal => "Tetragonal",
            SymmetryClass::Hexagonal => "Hexagonal",
            SymmetryClass::Cubic => "Cubic",
            SymmetryClass::Isotropic => "Isotropic",
        }
    }

    /// Display names of all classes in order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|class| class.name()).collect()
    }

    /// Next less constrained class in the projection chain
    pub fn parent(self) -> Option<Self> {
        match self {
            SymmetryClass::Triclinic => None,
            SymmetryClass::Monoclinic => Some(SymmetryClass::Triclinic),
            SymmetryClass::Orthorhombic => Some(SymmetryClass::Monoclinic),
            SymmetryClass::Tetragonal => Some(SymmetryClass::Orthorhombic),
            SymmetryClass::Hexagonal => Some(SymmetryClass::Tetragonal),
            SymmetryClass::Cubic => Some(SymmetryClass::Orthorhombic),
            SymmetryClass::Isotropic => Some(SymmetryClass::Cubic),
        }
    }

    /// Projection chain ending at this class, least constrained first
    pub fn pipeline(self) -> Vec<Self> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Most constrained class consistent with `stiffness`
    pub fn detect(stiffness: &StiffnessMatrix) -> Self {
        detect(stiffness)
    }

    /// Projection of `stiffness` onto this class
    pub fn apply(self, stiffness: &StiffnessMatrix) -> StiffnessMatrix {
        apply(stiffness, self)
    }
}

impl fmt::Display for SymmetryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymmetryClass {
    type Err = ElasticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|class| class.name().eq_ignore_ascii_case(wanted))
            .or_else(|| wanted.parse::<usize>().ok().and_then(Self::from_index))
            .ok_or_else(|| ElasticError::UnknownSymmetry(s.to_string()))
    }
}

/// Most constrained symmetry class consistent with the matrix.
///
/// Only the upper triangle is read. Patterns are tested from the least to the
/// most constrained class; [`SymmetryClass::Triclinic`] is returned when no
/// pattern matches.
pub fn detect(stiffness: &StiffnessMatrix) -> SymmetryClass {
    let c = stiffness.as_matrix();

    let monoclinic = (0..3).all(|i| c[(i, 3)] == 0.0 && c[(i, 4)] == 0.0)
        && c[(3, 5)] == 0.0
        && c[(4, 5)] == 0.0;
    if !monoclinic {
        return SymmetryClass::Triclinic;
    }

    let orthorhombic = (0..3).all(|i| c[(i, 5)] == 0.0) && c[(3, 4)] == 0.0;
    if !orthorhombic {
        return SymmetryClass::Monoclinic;
    }

    let tetragonal = c[(0, 0)] == c[(1, 1)] && c[(0, 2)] == c[(1, 2)] && c[(3, 3)] == c[(4, 4)];
    if !tetragonal {
        return SymmetryClass::Orthorhombic;
    }

    let cubic = c[(0, 0)] == c[(2, 2)] && c[(0, 1)] == c[(0, 2)] && c[(3, 3)] == c[(5, 5)];
    if cubic {
        if c[(0, 0)] == c[(0, 1)] + 2.0 * c[(3, 3)] {
            return SymmetryClass::Isotropic;
        }
        return SymmetryClass::Cubic;
    }

    // ties round away from zero: a relation of exactly ±0.005 is not hexagonal
    let hexagonal_relation = c[(0, 1)] - c[(0, 0)] + 2.0 * c[(5, 5)];
    let scaled = hexagonal_relation * 10f64.powi(HEXAGONAL_ROUNDING_DECIMALS);
    if scaled.round() == 0.0 {
        return SymmetryClass::Hexagonal;
    }

    SymmetryClass::Tetragonal
}

/// Project a matrix onto `class`.
///
/// The projections of the classes in [`SymmetryClass::pipeline`] run in
/// order, each taking the previous output, then the upper triangle is
/// mirrored.
pub fn apply(stiffness: &StiffnessMatrix, class: SymmetryClass) -> StiffnessMatrix {
    let projected = class
        .pipeline()
        .into_iter()
        .fold(*stiffness.as_matrix(), |c, step| project_step(c, step));
    StiffnessMatrix::from_matrix(projected).symmetrized()
}

/// Project onto the class selected by its index.
///
/// Unknown indices leave the entries untouched (triclinic projection, i.e.
/// symmetrization only).
pub fn apply_index(stiffness: &StiffnessMatrix, index: usize) -> StiffnessMatrix {
    match SymmetryClass::from_index(index) {
        Some(class) => apply(stiffness, class),
        None => {
            log::warn!("unknown symmetry index {index}, leaving the matrix unconstrained");
            apply(stiffness, SymmetryClass::Triclinic)
        }
    }
}

fn project_step(c: Matrix6<f64>, class: SymmetryClass) -> Matrix6<f64> {
    match class {
        SymmetryClass::Triclinic => c,
        SymmetryClass::Monoclinic => monoclinic(c),
        SymmetryClass::Orthorhombic => orthorhombic(c),
        SymmetryClass::Tetragonal => tetragonal(c),
        SymmetryClass::Hexagonal => hexagonal(c, HexagonalPolicy::default()),
        SymmetryClass::Cubic => cubic(c),
        SymmetryClass::Isotropic => isotropic(c),
    }
}

/// Zero the coupling between normal stresses and the shears 4, 5, and between those shears and 6
pub fn monoclinic(mut c: Matrix6<f64>) -> Matrix6<f64> {
    for i in 0..3 {
        c[(i, 3)] = 0.0;
        c[(i, 4)] = 0.0;
    }
    c[(3, 5)] = 0.0;
    c[(4, 5)] = 0.0;
    c
}

/// Zero the remaining normal/shear and shear/shear couplings
pub fn orthorhombic(mut c: Matrix6<f64>) -> Matrix6<f64> {
    for i in 0..3 {
        c[(i, 5)] = 0.0;
    }
    c[(3, 4)] = 0.0;
    c
}

/// Make axes 1 and 2 equivalent: `c22 = c11`, `c23 = c13`, `c55 = c44`
pub fn tetragonal(mut c: Matrix6<f64>) -> Matrix6<f64> {
    c[(1, 1)] = c[(0, 0)];
    c[(1, 2)] = c[(0, 2)];
    c[(4, 4)] = c[(3, 3)];
    c
}

/// How the hexagonal relation `c66 = (c11 - c12) / 2` is enforced.
///
/// The relation ties three constants together and one of them has to give.
/// [`HexagonalPolicy::PreferPositiveShear`] keeps `c11` and `c12` and derives
/// `c66` when that yields a positive shear modulus; otherwise it keeps `c66`
/// and derives `c11 = c22 = c12 + 2·c66`, so the projected matrix never gets a
/// non-positive `c66` from the relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexagonalPolicy {
    #[default]
    PreferPositiveShear,
}

/// Enforce the hexagonal relation according to `policy`
pub fn hexagonal(mut c: Matrix6<f64>, policy: HexagonalPolicy) -> Matrix6<f64> {
    match policy {
        HexagonalPolicy::PreferPositiveShear => {
            let value = (c[(0, 0)] - c[(0, 1)]) / 2.0;
            if value > 0.0 {
                c[(5, 5)] = value;
            } else {
                let c11 = c[(0, 1)] + 2.0 * c[(5, 5)];
                c[(0, 0)] = c11;
                c[(1, 1)] = c11;
            }
        }
    }
    c
}

/// Make the three axes equivalent, keeping `c11`, `c12` and `c44`
pub fn cubic(mut c: Matrix6<f64>) -> Matrix6<f64> {
    let (c11, c12, c44) = (c[(0, 0)], c[(0, 1)], c[(3, 3)]);
    c[(1, 1)] = c11;
    c[(2, 2)] = c11;
    c[(0, 2)] = c12;
    c[(1, 2)] = c12;
    c[(4, 4)] = c44;
    c[(5, 5)] = c44;
    c
}

/// Enforce `c11 = c12 + 2·c44` on a cubic matrix
pub fn isotropic(mut c: Matrix6<f64>) -> Matrix6<f64> {
    let c11 = c[(0, 1)] + 2.0 * c[(3, 3)];
    for i in 0..3 {
        c[(i, i)] = c11;
    }
    c
}
