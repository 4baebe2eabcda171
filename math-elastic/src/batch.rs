//! Batched evaluation over arrays of propagation directions
//!
//! ## Shape contract
//!
//! Directions are an `ndarray` array of any rank whose trailing axis has
//! length 3; every leading axis is a batch axis and is preserved:
//!
//! | quantity | shape |
//! |---|---|
//! | directions | `(..., 3)` |
//! | Christoffel tensors | `(..., 3, 3)` |
//! | phase velocities | `(..., 3)`, ascending along the last axis |
//! | polarizations | `(..., 3, 3)`, `[..., component, mode]` |
//! | group velocities | `(..., 3, 3)`, `[..., coordinate, mode]` |
//!
//! A single direction of shape `(3,)` has an empty batch shape. Elements are
//! independent and are evaluated through [`crate::parallel`].

use crate::christoffel::{WaveSolution, solve_vector};
use crate::error::{ElasticError, Result};
use crate::group_velocity::group_velocity;
use crate::parallel::parallel_map;
use crate::stiffness::StiffnessMatrix;
use nalgebra::{Matrix3, Vector3};
use ndarray::{ArrayD, ArrayViewD, Dimension, IxDyn};

/// Solutions of a direction batch, in row-major batch order
#[derive(Debug, Clone, PartialEq)]
pub struct WaveField {
    batch_shape: Vec<usize>,
    solutions: Vec<WaveSolution>,
}

impl WaveField {
    /// Leading (batch) shape of the directions this field was solved for
    pub fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }

    /// Number of directions
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// `true` for an empty batch
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Solutions in row-major batch order
    pub fn solutions(&self) -> &[WaveSolution] {
        &self.solutions
    }

    /// Number of elements that got the null solution
    pub fn null_count(&self) -> usize {
        self.solutions.iter().filter(|s| s.is_null()).count()
    }

    /// Christoffel tensors, shape `(..., 3, 3)`
    pub fn christoffel(&self) -> ArrayD<f64> {
        matrices_to_array(&self.batch_shape, &self.solutions, |s| s.christoffel)
    }

    /// Phase velocities, shape `(..., 3)`
    pub fn velocities(&self) -> ArrayD<f64> {
        let rank = self.batch_shape.len();
        let shape = with_trailing(&self.batch_shape, &[3]);
        ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
            let idx = idx.slice();
            self.solutions[flat_index(&idx[..rank], &self.batch_shape)].velocities[idx[rank]]
        })
    }

    /// Polarization vectors, shape `(..., 3, 3)` with modes along the last axis
    pub fn polarizations(&self) -> ArrayD<f64> {
        matrices_to_array(&self.batch_shape, &self.solutions, |s| s.polarization)
    }
}

/// Split a direction batch into its batch shape and flat list of vectors
pub fn flatten_directions(
    directions: &ArrayViewD<'_, f64>,
) -> Result<(Vec<usize>, Vec<Vector3<f64>>)> {
    let shape = directions.shape();
    if shape.last() != Some(&3) {
        return Err(ElasticError::DirectionShape {
            shape: shape.to_vec(),
        });
    }
    let batch_shape = shape[..shape.len() - 1].to_vec();
    let flat: Vec<f64> = directions.iter().copied().collect();
    let vectors = flat
        .chunks_exact(3)
        .map(|xyz| Vector3::new(xyz[0], xyz[1], xyz[2]))
        .collect();
    Ok((batch_shape, vectors))
}

/// Solve the Christoffel problem for every direction of the batch
pub fn solve_batch(
    stiffness: &StiffnessMatrix,
    density: f64,
    directions: ArrayViewD<'_, f64>,
) -> Result<WaveField> {
    let (batch_shape, vectors) = flatten_directions(&directions)?;
    log::debug!("solving Christoffel problem for {} directions", vectors.len());

    let solutions = parallel_map(&vectors, |n| solve_vector(stiffness, density, n));
    let field = WaveField {
        batch_shape,
        solutions,
    };

    let nulls = field.null_count();
    if nulls > 0 {
        log::debug!("{nulls} of {} directions have no physical solution", field.len());
    }
    Ok(field)
}

/// Group velocities for a batch solved by [`solve_batch`].
///
/// Returns an array of shape `(..., 3, 3)`, `[..., coordinate, mode]`.
/// Null elements produce NaN entries.
pub fn group_velocities_batch(
    stiffness: &StiffnessMatrix,
    density: f64,
    directions: ArrayViewD<'_, f64>,
    field: &WaveField,
) -> Result<ArrayD<f64>> {
    let (batch_shape, vectors) = flatten_directions(&directions)?;
    if batch_shape != field.batch_shape {
        return Err(ElasticError::BatchMismatch {
            directions: vectors.len(),
            field: field.len(),
        });
    }

    let indexed: Vec<(Vector3<f64>, WaveSolution)> =
        vectors.into_iter().zip(field.solutions.iter().copied()).collect();
    let groups = parallel_map(&indexed, |(n, wave)| group_velocity(stiffness, density, n, wave));
    Ok(matrices_to_array(&batch_shape, &groups, |g| *g))
}

fn with_trailing(batch_shape: &[usize], trailing: &[usize]) -> Vec<usize> {
    batch_shape.iter().chain(trailing).copied().collect()
}

fn flat_index(idx: &[usize], shape: &[usize]) -> usize {
    idx.iter().zip(shape).fold(0, |acc, (&i, &n)| acc * n + i)
}

fn matrices_to_array<T, F>(batch_shape: &[usize], items: &[T], matrix: F) -> ArrayD<f64>
where
    F: Fn(&T) -> Matrix3<f64>,
{
    let shape = with_trailing(batch_shape, &[3, 3]);
    let rank = batch_shape.len();
    ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
        let idx = idx.slice();
        matrix(&items[flat_index(&idx[..rank], batch_shape)])[(idx[rank], idx[rank + 1])]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::christoffel::solve;
    use crate::symmetry::SymmetryClass;
    use approx::assert_relative_eq;
    use ndarray::{Array2, Array3, array};

    fn isotropic() -> StiffnessMatrix {
        StiffnessMatrix::from_constants(
            &[((0, 0), 100.0), ((0, 1), 28.0), ((3, 3), 36.0)],
            SymmetryClass::Cubic,
        )
    }

    fn cubic() -> StiffnessMatrix {
        StiffnessMatrix::from_constants(
            &[((0, 0), 165.7), ((0, 1), 63.9), ((3, 3), 79.6)],
            SymmetryClass::Cubic,
        )
    }

    #[test]
    fn test_single_direction_shapes() {
        let l = array![0.0, 1.0, 1.0].into_dyn();
        let field = solve_batch(&isotropic(), 4000.0, l.view()).unwrap();

        assert!(field.batch_shape().is_empty());
        assert_eq!(field.len(), 1);
        assert_eq!(field.christoffel().shape(), &[3, 3]);
        assert_eq!(field.velocities().shape(), &[3]);
        assert_eq!(field.polarizations().shape(), &[3, 3]);
    }

    #[test]
    fn test_leading_dimensions_are_preserved() {
        let l = Array3::from_shape_fn((4, 5, 3), |(i, j, k)| (1 + i + 2 * j + 3 * k) as f64);
        let c = cubic();
        let field = solve_batch(&c, 2336.0, l.view().into_dyn()).unwrap();

        assert_eq!(field.batch_shape(), &[4, 5]);
        assert_eq!(field.velocities().shape(), &[4, 5, 3]);
        assert_eq!(field.christoffel().shape(), &[4, 5, 3, 3]);

        let velocities = field.velocities();
        let polarizations = field.polarizations();
        let wave = solve(&c, 2336.0, [l[[2, 3, 0]], l[[2, 3, 1]], l[[2, 3, 2]]]);
        for k in 0..3 {
            assert_eq!(velocities[[2, 3, k]], wave.velocities[k]);
            for i in 0..3 {
                assert_eq!(polarizations[[2, 3, i, k]], wave.polarization[(i, k)]);
            }
        }
    }

    #[test]
    fn test_bad_trailing_axis_is_rejected() {
        let l = Array2::<f64>::zeros((10, 2));
        let err = solve_batch(&isotropic(), 1.0, l.view().into_dyn()).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_field_from_another_batch_is_rejected() {
        let c = isotropic();
        let solved = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]].into_dyn();
        let other = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]].into_dyn();
        let field = solve_batch(&c, 4000.0, solved.view()).unwrap();

        let err = group_velocities_batch(&c, 4000.0, other.view(), &field).unwrap_err();
        assert!(matches!(
            err,
            ElasticError::BatchMismatch {
                directions: 3,
                field: 2
            }
        ));
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_degenerate_elements_do_not_affect_neighbours() {
        let l = array![[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 2.0]].into_dyn();
        let field = solve_batch(&isotropic(), 4000.0, l.view()).unwrap();

        assert_eq!(field.null_count(), 1);
        assert!(field.solutions()[1].is_null());
        assert_relative_eq!(field.solutions()[0].velocities[2], 5000.0, max_relative = 1e-10);
        assert_relative_eq!(field.solutions()[2].velocities[0], 3000.0, max_relative = 1e-10);
    }

    #[test]
    fn test_group_velocities_batch_shape_and_values() {
        let c = isotropic();
        let l = array![[1.0, 0.0, 0.0], [0.0, 0.6, 0.8]].into_dyn();
        let field = solve_batch(&c, 4000.0, l.view()).unwrap();
        let g = group_velocities_batch(&c, 4000.0, l.view(), &field).unwrap();

        assert_eq!(g.shape(), &[2, 3, 3]);
        let velocities = field.velocities();
        for b in 0..2 {
            for k in 0..3 {
                for i in 0..3 {
                    assert_relative_eq!(
                        g[[b, i, k]],
                        velocities[[b, k]] * l[[b, i]],
                        epsilon = 1e-8
                    );
                }
            }
        }
    }

    #[test]
    fn test_group_velocities_reject_foreign_field() {
        let c = isotropic();
        let l = array![[1.0, 0.0, 0.0], [0.0, 0.6, 0.8]].into_dyn();
        let other = array![0.0, 0.0, 1.0].into_dyn();
        let field = solve_batch(&c, 4000.0, other.view()).unwrap();

        let err = group_velocities_batch(&c, 4000.0, l.view(), &field).unwrap_err();
        assert!(matches!(err, ElasticError::BatchMismatch { directions: 2, field: 1 }));
    }
}
