//! Boundary functions over plain JSON-friendly values
//!
//! Matrices cross this boundary as `[[f64; 6]; 6]` rows and symmetry classes
//! as their index (0 = triclinic … 6 = isotropic). Payload types serialize to
//! nested arrays and numbers only.

use crate::error::Result;
use crate::material;
use crate::plots::{self, SurfaceMesh, VelocityCurves};
use crate::stiffness::{StiffnessMatrix, VoigtRows};
use crate::symmetry::{self, SymmetryClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stiffness matrix and density of a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialData {
    /// Stiffness matrix rows (GPa)
    #[serde(rename = "C")]
    pub matrix: VoigtRows,
    /// Density (kg/m³)
    #[serde(rename = "rho")]
    pub density: f64,
}

/// Symmetry class, catalog match and plane curves of one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Name of the detected class
    pub symmetry: String,
    /// Catalog name, empty when the material is not in the catalog
    pub material: String,
    /// Curves on the default grid
    #[serde(rename = "plotData2d")]
    pub curves: VelocityCurves,
}

/// Index of the most constrained class consistent with the matrix
pub fn detect_symmetry(matrix: &VoigtRows) -> usize {
    symmetry::detect(&StiffnessMatrix::from_rows(matrix)).index()
}

/// Project a matrix onto the class with the given index.
///
/// An unknown index only mirrors the upper triangle.
pub fn apply_symmetry(matrix: &VoigtRows, class_index: usize) -> VoigtRows {
    symmetry::apply_index(&StiffnessMatrix::from_rows(matrix), class_index).rows()
}

/// Plane curves on the default grid
pub fn compute_plane_curves(matrix: &VoigtRows, density: f64) -> Result<VelocityCurves> {
    plots::velocity_curves(&StiffnessMatrix::from_rows(matrix), density)
}

/// Surface meshes on the default grid
pub fn compute_surface_mesh(matrix: &VoigtRows, density: f64) -> Result<SurfaceMesh> {
    plots::velocity_surfaces(&StiffnessMatrix::from_rows(matrix), density)
}

/// Catalog name of the material, or an empty string
pub fn classify_material(matrix: &VoigtRows, density: f64) -> String {
    material::classify(&StiffnessMatrix::from_rows(matrix), density)
        .map(|entry| entry.name.to_string())
        .unwrap_or_default()
}

/// Class names in index order
pub fn symmetry_names() -> Vec<&'static str> {
    SymmetryClass::names()
}

/// Catalog names grouped under the name of their detected class
pub fn materials_by_symmetry() -> BTreeMap<&'static str, Vec<&'static str>> {
    material::by_symmetry()
        .into_iter()
        .map(|(class, names)| (class.name(), names))
        .collect()
}

/// Constants of a catalog material
pub fn material_constants(name: &str) -> Result<MaterialData> {
    let entry = material::find(name)?;
    Ok(MaterialData {
        matrix: entry.material.stiffness().rows(),
        density: entry.material.density(),
    })
}

/// Symmetry class, catalog name and plane curves in one call
pub fn analyze(matrix: &VoigtRows, density: f64) -> Result<Analysis> {
    let stiffness = StiffnessMatrix::from_rows(matrix);
    Ok(Analysis {
        symmetry: stiffness.detect().name().to_string(),
        material: classify_material(matrix, density),
        curves: compute_plane_curves(matrix, density)?,
    })
}
