//! Reduced ISCWSA MWD tool error model
//!
//! Each error source contributes a weighting vector `w = ∂(MD, I, A)/∂ε` per
//! station. Position sensitivities use the ISCWSA balanced-tangential
//! derivatives:
//!
//! - `∂Δr_k/∂p_k`     = `[½(t_{k-1}+t_k), ½ΔMD_k · ∂t/∂I, ½ΔMD_k · ∂t/∂A]`
//! - `∂Δr_{k+1}/∂p_k` = `[−½(t_k+t_{k+1}), ½ΔMD_{k+1} · ∂t/∂I, ½ΔMD_{k+1} · ∂t/∂A]`
//!
//! Survey station errors `e_k = σ (∂Δr_k/∂p_k + ∂Δr_{k+1}/∂p_k) w_k` accumulate
//! down the well. Systematic sources are summed before squaring; random
//! sources are squared before summing. The station itself only sees
//! `e*_K = σ ∂Δr_K/∂p_K w_K`.
//!
//! ## Sources
//! | Code | Term                     | Weight (MD, I, A)                 | Propagation |
//! |------|--------------------------|-----------------------------------|-------------|
//! | DRFR | depth reference          | (1, 0, 0)                         | random      |
//! | DSFS | depth scale              | (MD, 0, 0)                        | systematic  |
//! | SAG  | BHA sag                  | (0, sin I, 0)                     | systematic  |
//! | XYM1 | inclination misalignment | (0, \|sin I\|, 0)                 | systematic  |
//! | XYM2 | azimuth misalignment     | (0, 0, −1)                        | systematic  |
//! | DEC  | declination              | (0, 0, 1)                         | systematic  |
//! | MBZ  | axial magnetic bias      | (0, 0, −sin I sin Am / (B cos Θ)) | systematic  |

use nalgebra::{Matrix3, Vector3};
use ndarray::{Array3, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ErrorModel, ErrorModelError, ModelCovariance};
use crate::config::defaults::{
    MIN_STATIONS, MWD_AXIAL_BIAS_NT, MWD_DECLINATION_DEG, MWD_DEPTH_RANDOM_M, MWD_DEPTH_SCALE,
    MWD_MISALIGNMENT_DEG, MWD_SAG_DEG,
};
use crate::trajectory::vectors::{d_tangent_d_azi, d_tangent_d_inc, hla_basis, tangent_nev};
use crate::types::WellRefParams;

// ============================================================================
// Tool Error Budget
// ============================================================================

/// 1-sigma magnitudes of the MWD error sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MwdToolErrors {
    /// DRFR (m)
    #[serde(default = "default_depth_random")]
    pub depth_random_m: f64,

    /// DSFS (dimensionless scale)
    #[serde(default = "default_depth_scale")]
    pub depth_scale: f64,

    /// SAG (degrees)
    #[serde(default = "default_sag")]
    pub sag_deg: f64,

    /// XYM1 / XYM2 (degrees)
    #[serde(default = "default_misalignment")]
    pub misalignment_deg: f64,

    /// DEC (degrees)
    #[serde(default = "default_declination")]
    pub declination_deg: f64,

    /// MBZ (nT)
    #[serde(default = "default_axial_bias")]
    pub axial_bias_nt: f64,
}

fn default_depth_random() -> f64 {
    MWD_DEPTH_RANDOM_M
}
fn default_depth_scale() -> f64 {
    MWD_DEPTH_SCALE
}
fn default_sag() -> f64 {
    MWD_SAG_DEG
}
fn default_misalignment() -> f64 {
    MWD_MISALIGNMENT_DEG
}
fn default_declination() -> f64 {
    MWD_DECLINATION_DEG
}
fn default_axial_bias() -> f64 {
    MWD_AXIAL_BIAS_NT
}

impl Default for MwdToolErrors {
    fn default() -> Self {
        Self {
            depth_random_m: default_depth_random(),
            depth_scale: default_depth_scale(),
            sag_deg: default_sag(),
            misalignment_deg: default_misalignment(),
            declination_deg: default_declination(),
            axial_bias_nt: default_axial_bias(),
        }
    }
}

impl MwdToolErrors {
    fn as_slice(&self) -> [(&'static str, f64); 6] {
        [
            ("depth_random_m", self.depth_random_m),
            ("depth_scale", self.depth_scale),
            ("sag_deg", self.sag_deg),
            ("misalignment_deg", self.misalignment_deg),
            ("declination_deg", self.declination_deg),
            ("axial_bias_nt", self.axial_bias_nt),
        ]
    }

    /// Every sigma must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ErrorModelError> {
        for (name, value) in self.as_slice() {
            if !value.is_finite() || value < 0.0 {
                return Err(ErrorModelError::InvalidParameter(format!(
                    "tool sigma {name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Error Sources
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Propagation {
    Random,
    Systematic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Drfr,
    Dsfs,
    Sag,
    Xym1,
    Xym2,
    Dec,
    Mbz,
}

impl Source {
    const ALL: [Source; 7] = [
        Source::Drfr,
        Source::Dsfs,
        Source::Sag,
        Source::Xym1,
        Source::Xym2,
        Source::Dec,
        Source::Mbz,
    ];

    fn code(self) -> &'static str {
        match self {
            Source::Drfr => "DRFR",
            Source::Dsfs => "DSFS",
            Source::Sag => "SAG",
            Source::Xym1 => "XYM1",
            Source::Xym2 => "XYM2",
            Source::Dec => "DEC",
            Source::Mbz => "MBZ",
        }
    }

    fn propagation(self) -> Propagation {
        match self {
            Source::Drfr => Propagation::Random,
            _ => Propagation::Systematic,
        }
    }

    /// Sigma in model units: metres, dimensionless, radians or nT.
    fn sigma(self, tool: &MwdToolErrors) -> f64 {
        match self {
            Source::Drfr => tool.depth_random_m,
            Source::Dsfs => tool.depth_scale,
            Source::Sag => tool.sag_deg.to_radians(),
            Source::Xym1 | Source::Xym2 => tool.misalignment_deg.to_radians(),
            Source::Dec => tool.declination_deg.to_radians(),
            Source::Mbz => tool.axial_bias_nt,
        }
    }

    fn weight(self, station: &Station, well_ref: &WellRefParams) -> Vector3<f64> {
        match self {
            Source::Drfr => Vector3::new(1.0, 0.0, 0.0),
            Source::Dsfs => Vector3::new(station.md, 0.0, 0.0),
            Source::Sag => Vector3::new(0.0, station.inc.sin(), 0.0),
            Source::Xym1 => Vector3::new(0.0, station.inc.sin().abs(), 0.0),
            Source::Xym2 => Vector3::new(0.0, 0.0, -1.0),
            Source::Dec => Vector3::new(0.0, 0.0, 1.0),
            Source::Mbz => {
                let dip = well_ref.dip.to_radians();
                let magnetic_azi = station.azi + (well_ref.convergence - well_ref.declination).to_radians();
                Vector3::new(
                    0.0,
                    0.0,
                    -(station.inc.sin() * magnetic_azi.sin()) / (well_ref.b_total * dip.cos()),
                )
            }
        }
    }
}

struct Station {
    md: f64,
    inc: f64,
    azi: f64,
}

// ============================================================================
// Model
// ============================================================================

/// ISCWSA-style MWD error model over the sources listed in the module docs.
#[derive(Debug, Clone, Default)]
pub struct IscwsaMwd {
    tool: MwdToolErrors,
}

impl IscwsaMwd {
    pub fn new(tool: MwdToolErrors) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &MwdToolErrors {
        &self.tool
    }

    fn check_well_ref(well_ref: &WellRefParams) -> Result<(), ErrorModelError> {
        let fields = [
            ("latitude", well_ref.latitude),
            ("g", well_ref.g),
            ("b_total", well_ref.b_total),
            ("dip", well_ref.dip),
            ("declination", well_ref.declination),
            ("convergence", well_ref.convergence),
            ("vertical_inc_limit", well_ref.vertical_inc_limit),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ErrorModelError::InvalidParameter(format!(
                "well reference {name} must be finite, got {value}"
            )));
        }
        if well_ref.b_total <= 0.0 {
            return Err(ErrorModelError::InvalidParameter(format!(
                "well reference b_total must be > 0, got {}",
                well_ref.b_total
            )));
        }
        if well_ref.dip.abs() >= 90.0 {
            return Err(ErrorModelError::InvalidParameter(format!(
                "well reference dip must be within (-90, 90) degrees, got {}",
                well_ref.dip
            )));
        }
        Ok(())
    }
}

impl ErrorModel for IscwsaMwd {
    fn name(&self) -> &'static str {
        "ISCWSA_MWD"
    }

    fn covariances(
        &self,
        survey_deg: ArrayView2<f64>,
        surface_loc: [f64; 3],
        well_ref: &WellRefParams,
    ) -> Result<ModelCovariance, ErrorModelError> {
        if survey_deg.ncols() != 3 {
            return Err(ErrorModelError::Shape(format!(
                "survey table must have 3 columns (md, inc, azi), got {}",
                survey_deg.ncols()
            )));
        }
        let n = survey_deg.nrows();
        if n < MIN_STATIONS {
            return Err(ErrorModelError::InsufficientStations {
                needed: MIN_STATIONS,
                available: n,
            });
        }
        self.tool.validate()?;
        Self::check_well_ref(well_ref)?;

        let stations: Vec<Station> = survey_deg
            .rows()
            .into_iter()
            .map(|row| Station {
                md: row[0],
                inc: row[1].to_radians(),
                azi: row[2].to_radians(),
            })
            .collect();

        let t: Vec<Vector3<f64>> = stations.iter().map(|s| tangent_nev(s.inc, s.azi)).collect();
        let dt_di: Vec<Vector3<f64>> = stations.iter().map(|s| d_tangent_d_inc(s.inc, s.azi)).collect();
        let dt_da: Vec<Vector3<f64>> = stations.iter().map(|s| d_tangent_d_azi(s.inc, s.azi)).collect();

        // Sensitivity of the interval ending at k, and of the interval after k, to station k
        let mut here = vec![Matrix3::zeros(); n];
        let mut next = vec![Matrix3::zeros(); n];
        for k in 1..n {
            let half = 0.5 * (stations[k].md - stations[k - 1].md);
            here[k] = Matrix3::from_columns(&[(t[k - 1] + t[k]) * 0.5, dt_di[k] * half, dt_da[k] * half]);
        }
        for k in 0..n - 1 {
            let half = 0.5 * (stations[k + 1].md - stations[k].md);
            next[k] = Matrix3::from_columns(&[-(t[k] + t[k + 1]) * 0.5, dt_di[k] * half, dt_da[k] * half]);
        }

        let vertical_limit = well_ref.vertical_inc_limit.to_radians();
        let mut cov_nev = vec![Matrix3::<f64>::zeros(); n];
        for source in Source::ALL {
            let sigma = source.sigma(&self.tool);
            if sigma == 0.0 {
                continue;
            }
            let mut running = Vector3::zeros();
            let mut running_sq = Matrix3::zeros();
            for (k, station) in stations.iter().enumerate() {
                let mut w = source.weight(station, well_ref);
                if station.inc < vertical_limit {
                    w.z = 0.0;
                }
                let at_station = here[k] * w * sigma;
                match source.propagation() {
                    Propagation::Systematic => {
                        let total = running + at_station;
                        cov_nev[k] += total * total.transpose();
                    }
                    Propagation::Random => {
                        cov_nev[k] += running_sq + at_station * at_station.transpose();
                    }
                }
                let carried = (here[k] + next[k]) * w * sigma;
                running += carried;
                running_sq += carried * carried.transpose();
            }
            debug!(source = source.code(), sigma, "Propagated error source");
        }

        let cov_hla: Vec<Matrix3<f64>> = stations
            .iter()
            .zip(&cov_nev)
            .map(|(s, cov)| {
                let basis = hla_basis(s.inc, s.azi);
                let m = basis.transpose() * cov * basis;
                (m + m.transpose()) * 0.5
            })
            .collect();

        debug!(
            stations = n,
            surface_x = surface_loc[0],
            surface_y = surface_loc[1],
            surface_z = surface_loc[2],
            "ISCWSA MWD covariance computed"
        );

        Ok(ModelCovariance {
            cov_hla: axis_major(&cov_hla),
            cov_nev: axis_major(&cov_nev),
        })
    }
}

/// Stack per-station matrices into the `(3, 3, n)` layout error models return.
fn axis_major(stack: &[Matrix3<f64>]) -> Array3<f64> {
    Array3::from_shape_fn((3, 3, stack.len()), |(i, j, k)| stack[k][(i, j)])
}
