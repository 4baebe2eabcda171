//! Christoffel tensor and phase velocities
//!
//! For a unit propagation direction `n`, the Christoffel tensor is
//! ```text
//! Γ = L(n)ᵀ · C · L(n)
//! ```
//! where `L(n)` is the 6×3 "slim" matrix placing the components of `n` at the
//! Voigt-contracted positions. Its eigenvalues are `ρ·c²` (in GPa) and its
//! eigenvectors are the polarizations of the three plane waves travelling
//! along `n`.
//!
//! Modes are always returned sorted by ascending phase velocity, with the
//! polarization columns moved along. Mode labels downstream (slow shear, fast
//! shear, quasi-longitudinal) rely on that order.

use crate::constants::{GPA_TO_PA, MAX_EIGEN_ITERATIONS};
use crate::stiffness::StiffnessMatrix;
use nalgebra::{Matrix3, SMatrix, SymmetricEigen, Vector3};

/// 6×3 matrix built from a 3-vector by [`slim_matrix`]
pub type SlimMatrix = SMatrix<f64, 6, 3>;

/// Row of each slim-matrix entry
const SLIM_ROWS: [usize; 9] = [0, 1, 2, 3, 3, 4, 4, 5, 5];
/// Column of each slim-matrix entry
const SLIM_COLS: [usize; 9] = [0, 1, 2, 1, 2, 2, 0, 0, 1];
/// Vector component stored in each slim-matrix entry
const SLIM_COMPONENTS: [usize; 9] = [0, 1, 2, 2, 1, 0, 2, 1, 0];

/// Place the components of `v` at their Voigt-contracted positions.
///
/// ```text
/// [1, 2, 3] ─▶ ⎡1 0 0⎤
///              ⎢0 2 0⎥
///              ⎢0 0 3⎥
///              ⎢0 3 2⎥
///              ⎢3 0 1⎥
///              ⎣2 1 0⎦
/// ```
pub fn slim_matrix(v: &Vector3<f64>) -> SlimMatrix {
    let mut matrix = SlimMatrix::zeros();
    for ((&row, &col), &component) in SLIM_ROWS.iter().zip(&SLIM_COLS).zip(&SLIM_COMPONENTS) {
        matrix[(row, col)] = v[component];
    }
    matrix
}

/// Christoffel tensor `L(n)ᵀ C L(n)` in GPa.
///
/// `n` is used as given; the result is a Christoffel tensor only when `n` is
/// a unit vector.
pub fn christoffel_tensor(stiffness: &StiffnessMatrix, n: &Vector3<f64>) -> Matrix3<f64> {
    let l = slim_matrix(n);
    l.transpose() * stiffness.as_matrix() * l
}

/// Plane-wave solution along one direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSolution {
    /// Christoffel tensor (GPa)
    pub christoffel: Matrix3<f64>,
    /// Phase velocities in ascending order (m/s)
    pub velocities: Vector3<f64>,
    /// Unit polarization vectors, column `k` belongs to `velocities[k]`
    pub polarization: Matrix3<f64>,
}

impl WaveSolution {
    /// All-zero solution returned for non-physical input
    pub fn null() -> Self {
        Self {
            christoffel: Matrix3::zeros(),
            velocities: Vector3::zeros(),
            polarization: Matrix3::zeros(),
        }
    }

    /// `true` for the all-zero solution
    pub fn is_null(&self) -> bool {
        self.velocities.iter().all(|&c| c == 0.0)
    }

    /// Polarization vector of mode `k`
    pub fn polarization_of(&self, k: usize) -> Vector3<f64> {
        self.polarization.column(k).into_owned()
    }
}

impl Default for WaveSolution {
    fn default() -> Self {
        Self::null()
    }
}

/// Solve the Christoffel eigenproblem along `direction`.
///
/// The direction is normalized internally. The null solution is returned when
/// the density is not strictly positive, the direction is zero, any input is
/// non-finite, or the Christoffel tensor has an eigenvalue `≤ 0` (the
/// stiffness matrix is not positive-definite along that direction).
pub fn solve(stiffness: &StiffnessMatrix, density: f64, direction: [f64; 3]) -> WaveSolution {
    solve_vector(stiffness, density, &Vector3::from(direction))
}

/// [`solve`] taking a `nalgebra` vector
pub fn solve_vector(
    stiffness: &StiffnessMatrix,
    density: f64,
    direction: &Vector3<f64>,
) -> WaveSolution {
    if !(density.is_finite() && density > 0.0) {
        return WaveSolution::null();
    }
    let norm = direction.norm();
    if norm == 0.0 || !norm.is_finite() {
        return WaveSolution::null();
    }
    let n = direction / norm;

    let gamma = christoffel_tensor(stiffness, &n);
    if gamma.iter().any(|value| !value.is_finite()) {
        return WaveSolution::null();
    }

    let Some(eigen) = SymmetricEigen::try_new(gamma, f64::EPSILON, MAX_EIGEN_ITERATIONS) else {
        return WaveSolution::null();
    };
    if eigen.eigenvalues.iter().any(|&w| w <= 0.0) {
        return WaveSolution::null();
    }

    let speeds = eigen.eigenvalues.map(|w| (w * GPA_TO_PA / density).sqrt());
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| speeds[a].total_cmp(&speeds[b]));

    let velocities = Vector3::from_fn(|k, _| speeds[order[k]]);
    let polarization = Matrix3::from_fn(|i, k| eigen.eigenvectors[(i, order[k])]);

    WaveSolution {
        christoffel: gamma,
        velocities,
        polarization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symmetry::SymmetryClass;
    use approx::assert_relative_eq;

    fn isotropic() -> StiffnessMatrix {
        StiffnessMatrix::from_constants(
            &[((0, 0), 100.0), ((0, 1), 28.0), ((3, 3), 36.0)],
            SymmetryClass::Cubic,
        )
    }

    #[test]
    fn test_slim_matrix_layout() {
        let l = slim_matrix(&Vector3::new(1.0, 2.0, 3.0));
        let expected = SlimMatrix::from_row_slice(&[
            1.0, 0.0, 0.0, //
            0.0, 2.0, 0.0, //
            0.0, 0.0, 3.0, //
            0.0, 3.0, 2.0, //
            3.0, 0.0, 1.0, //
            2.0, 1.0, 0.0,
        ]);
        assert_eq!(l, expected);
    }

    #[test]
    fn test_christoffel_along_axis_picks_diagonal_constants() {
        let c = isotropic();
        let gamma = christoffel_tensor(&c, &Vector3::x());
        assert_relative_eq!(gamma[(0, 0)], 100.0);
        assert_relative_eq!(gamma[(1, 1)], 36.0);
        assert_relative_eq!(gamma[(2, 2)], 36.0);
        assert_relative_eq!(gamma[(0, 1)], 0.0);
    }

    #[test]
    fn test_isotropic_velocities() {
        let wave = solve(&isotropic(), 4000.0, [0.3, -1.2, 0.7]);
        assert_relative_eq!(wave.velocities[0], 3000.0, max_relative = 1e-10);
        assert_relative_eq!(wave.velocities[1], 3000.0, max_relative = 1e-10);
        assert_relative_eq!(wave.velocities[2], 5000.0, max_relative = 1e-10);
    }

    #[test]
    fn test_direction_is_normalized() {
        let c = isotropic();
        let unit = solve(&c, 4000.0, [0.0, 0.0, 1.0]);
        let long = solve(&c, 4000.0, [0.0, 0.0, 25.0]);
        assert_relative_eq!(unit.velocities, long.velocities, max_relative = 1e-12);
    }

    #[test]
    fn test_longitudinal_polarization_is_parallel_to_direction() {
        let n = Vector3::new(1.0, 2.0, 2.0) / 3.0;
        let wave = solve_vector(&isotropic(), 4000.0, &n);
        let a = wave.polarization_of(2);
        assert_relative_eq!(a.dot(&n).abs(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_null_for_zero_direction() {
        let wave = solve(&isotropic(), 4000.0, [0.0, 0.0, 0.0]);
        assert_eq!(wave, WaveSolution::null());
        assert!(wave.is_null());
    }

    #[test]
    fn test_null_for_zero_density() {
        let wave = solve(&isotropic(), 0.0, [1.0, 0.0, 0.0]);
        assert_eq!(wave, WaveSolution::null());
    }

    #[test]
    fn test_null_for_negative_density() {
        let wave = solve(&isotropic(), -10.0, [1.0, 0.0, 0.0]);
        assert_eq!(wave, WaveSolution::null());
    }

    #[test]
    fn test_null_for_zero_stiffness() {
        let wave = solve(&StiffnessMatrix::zeros(), 1.0, [1.0, 1.0, 1.0]);
        assert_eq!(wave, WaveSolution::null());
    }

    #[test]
    fn test_null_for_non_finite_direction() {
        let wave = solve(&isotropic(), 4000.0, [f64::NAN, 0.0, 1.0]);
        assert_eq!(wave, WaveSolution::null());
    }

    #[test]
    fn test_null_for_indefinite_stiffness() {
        let c = StiffnessMatrix::from_constants(
            &[((0, 0), 100.0), ((0, 1), 28.0), ((3, 3), -36.0)],
            SymmetryClass::Cubic,
        );
        let wave = solve(&c, 4000.0, [1.0, 0.0, 0.0]);
        assert!(wave.is_null());
        assert_eq!(wave.christoffel, Matrix3::zeros());
    }

    #[test]
    fn test_modes_sorted_and_paired() {
        let c = StiffnessMatrix::from_constants(
            &[
                ((0, 0), 25.0),
                ((0, 1), 5.0),
                ((0, 2), 13.0),
                ((1, 1), 28.0),
                ((1, 2), 4.0),
                ((2, 2), 26.0),
                ((3, 3), 7.0),
                ((4, 4), 6.0),
                ((5, 5), 8.0),
            ],
            SymmetryClass::Orthorhombic,
        );
        let density = 3000.0;
        let wave = solve(&c, density, [0.2, 0.5, -0.8]);

        assert!(wave.velocities[0] <= wave.velocities[1]);
        assert!(wave.velocities[1] <= wave.velocities[2]);
        for k in 0..3 {
            let a = wave.polarization_of(k);
            let w = density * wave.velocities[k].powi(2) / GPA_TO_PA;
            let residual = wave.christoffel * a - a * w;
            assert!(residual.norm() < 1e-9, "mode {k} residual {}", residual.norm());
        }
    }
}
