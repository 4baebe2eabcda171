//! Polar curves in the three coordinate planes

use super::{Plane, finite_or_zero, max_or_zero};
use crate::batch::{group_velocities_batch, solve_batch};
use crate::config::PlotConfig;
use crate::constants::{PI2, round_to, turn_samples};
use crate::error::Result;
use crate::stiffness::StiffnessMatrix;
use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-plane curves and their maxima
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneCurves<T> {
    /// `r[plane][t]`, one entry per sampled angle
    pub r: BTreeMap<Plane, Vec<T>>,
    /// Plot scaling value per plane
    pub max: BTreeMap<Plane, f64>,
}

impl<T> Default for PlaneCurves<T> {
    fn default() -> Self {
        Self {
            r: BTreeMap::new(),
            max: BTreeMap::new(),
        }
    }
}

/// Curve payload of [`PolarPlot2D`]
///
/// Modes are indexed in ascending phase velocity order everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityCurves {
    /// Sampled angles (radians), a full turn without the endpoint
    pub t: Vec<f64>,
    /// Phase velocity `[t][mode]` (m/s), max over angles and modes
    pub velocity: PlaneCurves<[f64; 3]>,
    /// Scaled slowness `[t][mode]`, max over angles and modes
    pub slowness: PlaneCurves<[f64; 3]>,
    /// Scaled group velocity `[t][mode][xyz]`, max of the vector norms
    #[serde(rename = "groupvelocity")]
    pub group_velocity: PlaneCurves<[[f64; 3]; 3]>,
    /// Rounded polarization `[t][mode][component]`
    #[serde(rename = "A")]
    pub polarization: BTreeMap<Plane, Vec<[[f64; 3]; 3]>>,
}

/// Angle sweep over the XY, XZ and YZ planes
#[derive(Debug, Clone)]
pub struct PolarPlot2D {
    t: Vec<f64>,
    directions: Array3<f64>,
    slowness_scale: f64,
    group_velocity_scale: f64,
    polarization_decimals: i32,
}

impl PolarPlot2D {
    /// Build the angle grid: `floor(2π·samples_per_radian)` angles per plane
    pub fn new(config: &PlotConfig) -> Self {
        let samples = turn_samples(config.samples_per_radian);
        let step = PI2 / samples as f64;
        let t: Vec<f64> = (0..samples).map(|i| i as f64 * step).collect();
        let directions = Array3::from_shape_fn((Plane::ALL.len(), samples, 3), |(p, i, xyz)| {
            Plane::ALL[p].direction(t[i])[xyz]
        });

        Self {
            t,
            directions,
            slowness_scale: config.slowness_scale,
            group_velocity_scale: config.curve_group_velocity_scale,
            polarization_decimals: config.polarization_decimals,
        }
    }

    /// Sampled angles
    pub fn angles(&self) -> &[f64] {
        &self.t
    }

    /// Unit directions `[plane, t, xyz]`
    pub fn directions(&self) -> ArrayView3<'_, f64> {
        self.directions.view()
    }

    /// Curves of one material
    pub fn evaluate(&self, stiffness: &StiffnessMatrix, density: f64) -> Result<VelocityCurves> {
        let directions = self.directions.view().into_dyn();
        let field = solve_batch(stiffness, density, directions.clone())?;
        let groups = group_velocities_batch(stiffness, density, directions, &field)?;
        let solutions = field.solutions();
        let samples = self.t.len();

        let mut replaced = 0;
        let mut velocity = PlaneCurves::default();
        let mut slowness = PlaneCurves::default();
        let mut group_velocity = PlaneCurves::default();
        let mut polarization = BTreeMap::new();

        for (p, plane) in Plane::ALL.into_iter().enumerate() {
            let mut c_curve = Vec::with_capacity(samples);
            let mut m_curve = Vec::with_capacity(samples);
            let mut g_curve = Vec::with_capacity(samples);
            let mut a_curve = Vec::with_capacity(samples);

            for (t, wave) in solutions[p * samples..(p + 1) * samples].iter().enumerate() {
                let c: [f64; 3] =
                    std::array::from_fn(|k| finite_or_zero(wave.velocities[k], &mut replaced));
                let m: [f64; 3] = std::array::from_fn(|k| {
                    finite_or_zero(self.slowness_scale / wave.velocities[k], &mut replaced)
                });
                let g: [[f64; 3]; 3] = std::array::from_fn(|k| {
                    std::array::from_fn(|xyz| {
                        let value = self.group_velocity_scale * groups[[p, t, xyz, k]];
                        finite_or_zero(value, &mut replaced)
                    })
                });
                let a: [[f64; 3]; 3] = std::array::from_fn(|k| {
                    std::array::from_fn(|i| {
                        round_to(wave.polarization[(i, k)], self.polarization_decimals)
                    })
                });
                c_curve.push(c);
                m_curve.push(m);
                g_curve.push(g);
                a_curve.push(a);
            }

            velocity
                .max
                .insert(plane, max_or_zero(c_curve.iter().flatten().copied()));
            slowness
                .max
                .insert(plane, max_or_zero(m_curve.iter().flatten().copied()));
            group_velocity
                .max
                .insert(plane, max_or_zero(g_curve.iter().flatten().map(norm)));

            velocity.r.insert(plane, c_curve);
            slowness.r.insert(plane, m_curve);
            group_velocity.r.insert(plane, g_curve);
            polarization.insert(plane, a_curve);
        }

        if replaced > 0 {
            log::debug!("zeroed {replaced} non-finite values in plane curves");
        }

        Ok(VelocityCurves {
            t: self.t.clone(),
            velocity,
            slowness,
            group_velocity,
            polarization,
        })
    }
}

impl Default for PolarPlot2D {
    fn default() -> Self {
        Self::new(&PlotConfig::default())
    }
}

fn norm(v: &[f64; 3]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
