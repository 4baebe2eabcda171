//! Triangulated velocity, slowness and group velocity surfaces

use super::{finite_or_zero, lin_space, max_or_zero};
use crate::batch::{group_velocities_batch, solve_batch};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::stiffness::StiffnessMatrix;
use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Displaced vertices of one quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// `vertices[mode][vertex] = [x, y, z]`
    pub vertices: Vec<Vec<[f64; 3]>>,
    /// Plot scaling value
    pub max: f64,
}

/// Surface payload of [`SphericalPlot3D`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMesh {
    /// Directions scaled by phase velocity, max over all velocities
    pub velocity: Surface,
    /// Directions scaled by slowness, max over all slowness values
    pub slowness: Surface,
    /// Scaled group velocity vectors, max of their components
    #[serde(rename = "groupvelocity")]
    pub group_velocity: Surface,
    /// Vertex index triples shared by the three surfaces
    pub faces: Vec<[usize; 3]>,
}

/// Latitude/longitude sampling of the unit sphere.
///
/// With `n` longitude samples the grid has `n + 1` rows of latitude, from the
/// north pole down to the south pole, and `n` columns of longitude over
/// `[-π, π]` (both ends included, so the first and last columns coincide).
/// Vertex `(row, col)` has index `row·n + col`.
#[derive(Debug, Clone)]
pub struct SphericalPlot3D {
    angle_samples: usize,
    directions: Array3<f64>,
    faces: Vec<[usize; 3]>,
    slowness_scale: f64,
    group_velocity_scale: f64,
}

impl SphericalPlot3D {
    /// Build the grid with `config.surface_angle_samples` longitudes
    pub fn new(config: &PlotConfig) -> Self {
        let n = config.surface_angle_samples;
        let longitudes = lin_space(-PI, PI, n);
        let latitudes: Vec<f64> = lin_space(-FRAC_PI_2, FRAC_PI_2, n + 1)
            .into_iter()
            .rev()
            .collect();
        let directions = Array3::from_shape_fn((n + 1, n, 3), |(row, col, xyz)| {
            let (sin_u, cos_u) = longitudes[col].sin_cos();
            let (sin_v, cos_v) = latitudes[row].sin_cos();
            [cos_u * cos_v, sin_u * cos_v, sin_v][xyz]
        });

        Self {
            angle_samples: n,
            directions,
            faces: surface_faces(n),
            slowness_scale: config.slowness_scale,
            group_velocity_scale: config.surface_group_velocity_scale,
        }
    }

    /// Longitude samples `n`
    pub fn angle_samples(&self) -> usize {
        self.angle_samples
    }

    /// Unit directions `[row, col, xyz]`
    pub fn directions(&self) -> ArrayView3<'_, f64> {
        self.directions.view()
    }

    /// Triangle list of the grid
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Surfaces of one material
    pub fn evaluate(&self, stiffness: &StiffnessMatrix, density: f64) -> Result<SurfaceMesh> {
        let directions = self.directions.view().into_dyn();
        let field = solve_batch(stiffness, density, directions.clone())?;
        let groups = group_velocities_batch(stiffness, density, directions, &field)?;
        let n = self.angle_samples;

        let mut replaced = 0;
        let mut velocity = vec![Vec::with_capacity(field.len()); 3];
        let mut slowness = vec![Vec::with_capacity(field.len()); 3];
        let mut group_velocity = vec![Vec::with_capacity(field.len()); 3];
        let (mut c_max, mut m_max, mut g_max) = (Vec::new(), Vec::new(), Vec::new());

        for (vertex, wave) in field.solutions().iter().enumerate() {
            let (row, col) = (vertex / n, vertex % n);
            let p: [f64; 3] = std::array::from_fn(|xyz| self.directions[[row, col, xyz]]);
            for k in 0..3 {
                let c = finite_or_zero(wave.velocities[k], &mut replaced);
                let m = finite_or_zero(self.slowness_scale / wave.velocities[k], &mut replaced);
                let g: [f64; 3] = std::array::from_fn(|xyz| {
                    let value = self.group_velocity_scale * groups[[row, col, xyz, k]];
                    finite_or_zero(value, &mut replaced)
                });

                velocity[k].push(p.map(|x| x * c));
                slowness[k].push(p.map(|x| x * m));
                group_velocity[k].push(g);
                c_max.push(c);
                m_max.push(m);
                g_max.extend(g);
            }
        }

        if replaced > 0 {
            log::debug!("zeroed {replaced} non-finite values in surfaces");
        }

        Ok(SurfaceMesh {
            velocity: Surface {
                vertices: velocity,
                max: max_or_zero(c_max),
            },
            slowness: Surface {
                vertices: slowness,
                max: max_or_zero(m_max),
            },
            group_velocity: Surface {
                vertices: group_velocity,
                max: max_or_zero(g_max),
            },
            faces: self.faces.clone(),
        })
    }
}

impl Default for SphericalPlot3D {
    fn default() -> Self {
        Self::new(&PlotConfig::default())
    }
}

/// Triangles joining latitude rows of an `n`-column grid.
///
/// For each band `r` in `0..n - 1` (offset `r·n`) the band contributes the
/// `n` triangles `[i, i + n, (i + 1) mod n]` followed by the `n` triangles
/// `[i, i + n, (i - 1) mod n + n]`, all shifted by the offset. Longitudes wrap
/// around. The band between the last two rows is not triangulated.
pub fn surface_faces(n: usize) -> Vec<[usize; 3]> {
    let bands = n.saturating_sub(1);
    let mut faces = Vec::with_capacity(bands * 2 * n);
    for band in 0..bands {
        let offset = band * n;
        for i in 0..n {
            faces.push([offset + i, offset + i + n, offset + (i + 1) % n]);
        }
        for i in 0..n {
            faces.push([offset + i, offset + i + n, offset + (i + n - 1) % n + n]);
        }
    }
    faces
}
