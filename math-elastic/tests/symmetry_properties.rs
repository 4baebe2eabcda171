//! Projection and detection properties over random matrices

use math_audio_elastic::symmetry::{self, apply_index};
use math_audio_elastic::{Material, StiffnessMatrix, SymmetryClass};
use nalgebra::Matrix6;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_symmetric(rng: &mut StdRng) -> StiffnessMatrix {
    let m = Matrix6::from_fn(|_, _| rng.random_range(-50.0..150.0));
    StiffnessMatrix::from_matrix(m).symmetrized()
}

#[test]
fn test_projection_is_at_least_as_constrained() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let c = random_symmetric(&mut rng);
        for class in SymmetryClass::ALL {
            let projected = class.apply(&c);
            let detected = projected.detect();
            assert!(
                detected >= class,
                "projection onto {class} detected as {detected}"
            );
        }
    }
}

#[test]
fn test_projection_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..200 {
        let c = random_symmetric(&mut rng);
        for class in SymmetryClass::ALL {
            let once = class.apply(&c);
            let twice = class.apply(&once);
            if class == SymmetryClass::Hexagonal {
                // when c11 <= c12 the first pass derives c11 = c12 + 2·c66 and the
                // second pass derives c66 back from it, which can move c66 by one ulp
                assert!(
                    twice.all_close(&once, 1e-12, 1e-12),
                    "{class} projection not idempotent"
                );
            } else {
                assert_eq!(twice, once, "{class} projection not idempotent");
            }
        }
    }
}

#[test]
fn test_hexagonal_projection_is_exactly_idempotent_with_positive_shear() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut checked = 0;
    while checked < 100 {
        let c = random_symmetric(&mut rng);
        if c[(0, 0)] <= c[(0, 1)] {
            continue;
        }
        let once = SymmetryClass::Hexagonal.apply(&c);
        assert_eq!(SymmetryClass::Hexagonal.apply(&once), once);
        checked += 1;
    }
}

#[test]
fn test_projection_output_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let m = Matrix6::from_fn(|_, _| rng.random_range(-50.0..150.0));
        let c = StiffnessMatrix::from_matrix(m);
        for class in SymmetryClass::ALL {
            assert!(class.apply(&c).is_symmetric());
        }
    }
}

#[test]
fn test_isotropic_relation_beats_cubic() {
    let material = Material::cubic(4000.0, 100.0, 28.0, 36.0);
    assert_eq!(material.stiffness().detect(), SymmetryClass::Isotropic);

    let cubic = Material::cubic(4000.0, 100.0, 28.0, 35.0);
    assert_eq!(cubic.stiffness().detect(), SymmetryClass::Cubic);
}

#[test]
fn test_reference_materials_are_detected() {
    let hexagonal = Material::hexagonal(1.0, 34.6, 9.4, 10.7, 28.4, 8.36);
    assert_eq!(hexagonal.stiffness().detect(), SymmetryClass::Hexagonal);

    let orthorhombic =
        Material::orthorhombic(1.0, 25.0, 5.0, 13.0, 28.0, 4.0, 26.0, 7.0, 6.0, 8.0);
    assert_eq!(orthorhombic.stiffness().detect(), SymmetryClass::Orthorhombic);
}

#[test]
fn test_hexagonal_projection_of_orthorhombic_material() {
    let orthorhombic =
        Material::orthorhombic(1.0, 25.0, 5.0, 13.0, 28.0, 4.0, 26.0, 7.0, 6.0, 8.0);
    let projected = orthorhombic.with_symmetry(SymmetryClass::Hexagonal);
    assert_eq!(projected.stiffness().detect(), SymmetryClass::Hexagonal);
    assert_eq!(projected.stiffness()[(5, 5)], 10.0);
}

#[test]
fn test_unknown_index_is_triclinic_projection() {
    let mut rng = StdRng::seed_from_u64(9);
    let m = Matrix6::from_fn(|_, _| rng.random_range(-50.0..150.0));
    let c = StiffnessMatrix::from_matrix(m);

    assert_eq!(apply_index(&c, 7), symmetry::apply(&c, SymmetryClass::Triclinic));
    assert_eq!(apply_index(&c, usize::MAX), c.symmetrized());
}

#[test]
fn test_names_parse_back() {
    for class in SymmetryClass::ALL {
        assert_eq!(class.name().parse::<SymmetryClass>().unwrap(), class);
        assert_eq!(class.index().to_string().parse::<SymmetryClass>().unwrap(), class);
        assert_eq!(SymmetryClass::from_index(class.index()), Some(class));
    }
    assert!("Trigonal".parse::<SymmetryClass>().is_err());
}
