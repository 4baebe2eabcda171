//! Physical properties of the Christoffel solver over whole direction grids

use approx::assert_relative_eq;
use math_audio_elastic::batch::{group_velocities_batch, solve_batch};
use math_audio_elastic::christoffel::{self, WaveSolution};
use math_audio_elastic::constants::GPA_TO_PA;
use math_audio_elastic::group_velocity::group_velocity;
use math_audio_elastic::plots::lin_space;
use math_audio_elastic::{Material, StiffnessMatrix, SymmetryClass};
use nalgebra::{Matrix6, Vector3};
use ndarray::{Array3, Axis, Ix3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};

/// Latitude/longitude grid of unit vectors, shape `(n + 1, n, 3)`
fn sphere_points(n: usize) -> Array3<f64> {
    let u = lin_space(-PI, PI, n);
    let v: Vec<f64> = lin_space(-FRAC_PI_2, FRAC_PI_2, n + 1).into_iter().rev().collect();
    Array3::from_shape_fn((n + 1, n, 3), |(row, col, xyz)| {
        [
            u[col].cos() * v[row].cos(),
            u[col].sin() * v[row].cos(),
            v[row].sin(),
        ][xyz]
    })
}

fn isotropic() -> Material {
    let material = Material::cubic(4000.0, 100.0, 28.0, 36.0);
    assert_eq!(material.stiffness().detect(), SymmetryClass::Isotropic);
    material
}

/// Random symmetric positive-definite stiffness matrix (GPa)
fn random_stiffness(rng: &mut StdRng) -> StiffnessMatrix {
    let b = Matrix6::from_fn(|_, _| rng.random_range(-10.0..10.0));
    StiffnessMatrix::from_matrix(b * b.transpose() + Matrix6::identity() * 20.0)
}

#[test]
fn test_isotropic_phase_velocities_on_sphere() {
    let material = isotropic();
    let points = sphere_points(60);
    let field = solve_batch(
        material.stiffness(),
        material.density(),
        points.view().into_dyn(),
    )
    .unwrap();
    let c = field.velocities().into_dimensionality::<Ix3>().unwrap();

    assert_eq!(c.shape(), &[61, 60, 3]);
    assert_eq!(field.null_count(), 0);
    for lane in c.lanes(Axis(2)) {
        assert_relative_eq!(lane[0], 3000.0, max_relative = 1e-10);
        assert_relative_eq!(lane[1], 3000.0, max_relative = 1e-10);
        assert_relative_eq!(lane[2], 5000.0, max_relative = 1e-10);
    }
}

#[test]
fn test_isotropic_group_velocity_is_parallel_to_direction() {
    let material = isotropic();
    let points = sphere_points(60);
    let view = points.view().into_dyn();
    let field = solve_batch(material.stiffness(), material.density(), view.clone()).unwrap();
    let g = group_velocities_batch(material.stiffness(), material.density(), view, &field).unwrap();
    let c = field.velocities();

    assert_eq!(g.shape(), &[61, 60, 3, 3]);
    for row in 0..61 {
        for col in 0..60 {
            for k in 0..3 {
                for xyz in 0..3 {
                    let expected = c[[row, col, k]] * points[[row, col, xyz]];
                    assert_relative_eq!(g[[row, col, xyz, k]], expected, epsilon = 1e-7);
                }
            }
        }
    }
}

#[test]
fn test_modes_are_sorted_and_paired_for_random_media() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let stiffness = random_stiffness(&mut rng);
        let density = rng.random_range(500.0..20000.0);
        let direction: [f64; 3] = std::array::from_fn(|_| rng.random_range(-1.0..1.0));

        let wave = christoffel::solve(&stiffness, density, direction);
        assert!(!wave.is_null());
        assert!(wave.velocities[0] <= wave.velocities[1]);
        assert!(wave.velocities[1] <= wave.velocities[2]);

        for k in 0..3 {
            let a = wave.polarization_of(k);
            assert_relative_eq!(a.norm(), 1.0, epsilon = 1e-12);
            let w = density * wave.velocities[k].powi(2) / GPA_TO_PA;
            let residual = wave.christoffel * a - a * w;
            assert!(
                residual.norm() <= 1e-9 * wave.christoffel.norm(),
                "mode {k}: residual {}",
                residual.norm()
            );
        }
    }
}

#[test]
fn test_group_velocity_projection_for_random_media() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let stiffness = random_stiffness(&mut rng);
        let density = rng.random_range(500.0..20000.0);
        let n = Vector3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        )
        .normalize();

        let wave = christoffel::solve_vector(&stiffness, density, &n);
        let g = group_velocity(&stiffness, density, &n, &wave);
        for k in 0..3 {
            assert_relative_eq!(g.column(k).dot(&n), wave.velocities[k], max_relative = 1e-8);
        }
    }
}

#[test]
fn test_zero_direction_gives_null_for_any_medium() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10 {
        let stiffness = random_stiffness(&mut rng);
        let wave = christoffel::solve(&stiffness, 1000.0, [0.0, 0.0, 0.0]);
        assert_eq!(wave, WaveSolution::null());
    }
}

#[test]
fn test_zero_density_gives_null_for_any_direction() {
    let material = isotropic();
    let points = sphere_points(12);
    let field = solve_batch(material.stiffness(), 0.0, points.view().into_dyn()).unwrap();

    assert_eq!(field.null_count(), field.len());
    assert!(field.christoffel().iter().all(|&x| x == 0.0));
    assert!(field.velocities().iter().all(|&x| x == 0.0));
    assert!(field.polarizations().iter().all(|&x| x == 0.0));
}

#[test]
fn test_titanium_axis_velocities() {
    // along the hexagonal axis: c = sqrt(c33/ρ) and sqrt(c44/ρ)
    let material = Material::hexagonal(4507.0, 162.4, 92.0, 69.0, 180.7, 46.7);
    let wave = christoffel::solve(material.stiffness(), material.density(), [0.0, 0.0, 1.0]);

    let shear = (46.7 * GPA_TO_PA / 4507.0_f64).sqrt();
    let longitudinal = (180.7 * GPA_TO_PA / 4507.0_f64).sqrt();
    assert_relative_eq!(wave.velocities[0], shear, max_relative = 1e-12);
    assert_relative_eq!(wave.velocities[1], shear, max_relative = 1e-12);
    assert_relative_eq!(wave.velocities[2], longitudinal, max_relative = 1e-12);
}
