//! Stiffness matrices in Voigt notation
//!
//! A [`StiffnessMatrix`] holds the 6×6 elastic constants of a material in GPa.
//! Values are never mutated in place: projections and symmetrization return
//! new matrices. The matrix serializes as nested `[[f64; 6]; 6]` rows so it
//! can cross a JSON boundary unchanged.

use crate::symmetry::SymmetryClass;
use nalgebra::Matrix6;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Row-major 6×6 array, the plain representation of a stiffness matrix
pub type VoigtRows = [[f64; 6]; 6];

/// 6×6 elastic stiffness matrix (Voigt notation, GPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "VoigtRows", into = "VoigtRows")]
pub struct StiffnessMatrix {
    matrix: Matrix6<f64>,
}

impl StiffnessMatrix {
    /// All-zero matrix
    pub fn zeros() -> Self {
        Self {
            matrix: Matrix6::zeros(),
        }
    }

    /// Matrix from literal rows, kept exactly as given
    pub fn from_rows(rows: &VoigtRows) -> Self {
        Self {
            matrix: Matrix6::from_fn(|i, j| rows[i][j]),
        }
    }

    /// Wrap an existing `nalgebra` matrix
    pub fn from_matrix(matrix: Matrix6<f64>) -> Self {
        Self { matrix }
    }

    /// Build a matrix from sparse constants and project it onto `class`.
    ///
    /// Each constant is `((row, column), value)` with zero-based indices;
    /// constants are expected in the upper triangle, the projection mirrors
    /// them into the lower one.
    pub fn from_constants(constants: &[((usize, usize), f64)], class: SymmetryClass) -> Self {
        let mut matrix = Matrix6::zeros();
        for &((row, col), value) in constants {
            matrix[(row, col)] = value;
        }
        class.apply(&Self { matrix })
    }

    /// Row-major copy of the entries
    pub fn rows(&self) -> VoigtRows {
        let mut rows = [[0.0; 6]; 6];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.matrix[(i, j)];
            }
        }
        rows
    }

    /// Underlying matrix
    pub fn as_matrix(&self) -> &Matrix6<f64> {
        &self.matrix
    }

    /// Exact symmetry test
    pub fn is_symmetric(&self) -> bool {
        self.matrix == self.matrix.transpose()
    }

    /// Mirror the upper triangle (diagonal included) into the lower one
    pub fn symmetrized(&self) -> Self {
        let upper = self.matrix.upper_triangle();
        Self {
            matrix: upper + upper.transpose() - Matrix6::from_diagonal(&upper.diagonal()),
        }
    }

    /// Positive-definiteness of the symmetrized matrix (Cholesky test)
    pub fn is_positive_definite(&self) -> bool {
        self.symmetrized().matrix.cholesky().is_some()
    }

    /// Most constrained symmetry class consistent with the entries
    pub fn detect(&self) -> SymmetryClass {
        SymmetryClass::detect(self)
    }

    /// Projection onto `class`
    pub fn with_symmetry(&self, class: SymmetryClass) -> Self {
        class.apply(self)
    }

    /// Element-wise closeness, `|a - b| <= atol + rtol * |b|` with `other` as reference
    pub fn all_close(&self, other: &StiffnessMatrix, rtol: f64, atol: f64) -> bool {
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .all(|(a, b)| (a - b).abs() <= atol + rtol * b.abs())
    }
}

impl Default for StiffnessMatrix {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Index<(usize, usize)> for StiffnessMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.matrix[index]
    }
}

impl From<VoigtRows> for StiffnessMatrix {
    fn from(rows: VoigtRows) -> Self {
        Self::from_rows(&rows)
    }
}

impl From<StiffnessMatrix> for VoigtRows {
    fn from(stiffness: StiffnessMatrix) -> Self {
        stiffness.rows()
    }
}
