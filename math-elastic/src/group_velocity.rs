//! Group (energy) velocities
//!
//! For mode `k` with unit polarization `a` and phase velocity `c`, the group
//! velocity is
//! ```text
//! g = (L(a)ᵀ · C · L(a))ᵀ · n / (ρ · c)
//! ```
//! with the same slim matrix `L` as the Christoffel tensor. The polarization
//! must come from the same solve as `c`: the formula is not self-contained.

use crate::christoffel::{WaveSolution, slim_matrix};
use crate::constants::GPA_TO_PA;
use crate::stiffness::StiffnessMatrix;
use nalgebra::{Matrix3, Vector3};

/// Group velocity vectors (m/s) of the three modes of `wave`.
///
/// Column `k` is the vector of mode `k` (same order as `wave.velocities`),
/// row `i` its `i`-th Cartesian component. `direction` is normalized like in
/// [`crate::christoffel::solve`]. A null `wave` yields NaN columns (0/0); the
/// plot adapters clean those up.
pub fn group_velocity(
    stiffness: &StiffnessMatrix,
    density: f64,
    direction: &Vector3<f64>,
    wave: &WaveSolution,
) -> Matrix3<f64> {
    let n = unit_or_zero(direction);
    let mut g = Matrix3::zeros();
    for k in 0..3 {
        g.set_column(
            k,
            &mode_group_velocity(stiffness, density, &n, &wave.polarization_of(k), wave.velocities[k]),
        );
    }
    g
}

/// Group velocity of one mode given its polarization and phase velocity
pub fn mode_group_velocity(
    stiffness: &StiffnessMatrix,
    density: f64,
    n: &Vector3<f64>,
    polarization: &Vector3<f64>,
    phase_velocity: f64,
) -> Vector3<f64> {
    let l = slim_matrix(polarization);
    let m = l.transpose() * stiffness.as_matrix() * l;
    m.transpose() * n * (GPA_TO_PA / (density * phase_velocity))
}

fn unit_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm > 0.0 { v / norm } else { *v }
}
