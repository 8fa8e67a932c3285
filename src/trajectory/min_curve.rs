//! Minimum-curvature trajectory solver
//!
//! Each interval between consecutive stations is modelled as a circular arc.
//! For stations k-1 and k:
//!
//! - dogleg `β = acos(cos(I₂ − I₁) − sin I₁ · sin I₂ · (1 − cos(A₂ − A₁)))`
//! - ratio factor `rf = 2/β · tan(β/2)` (1 for a straight interval)
//! - displacement `Δr = ΔMD/2 · rf · (t₁ + t₂)`
//!
//! Index 0 has no preceding interval and carries dogleg 0, rf 1, ΔMD 0, DLS 0.

use ndarray::{Array2, Axis};
use thiserror::Error;

use super::vectors::tangent_xyz;
use crate::config::defaults::MIN_STATIONS;
use crate::types::LengthUnit;

#[derive(Debug, Error)]
pub enum MinCurveError {
    #[error("Station arrays differ in length: md={md}, inc={inc}, azi={azi}")]
    LengthMismatch { md: usize, inc: usize, azi: usize },

    #[error("Insufficient stations: need {needed}, have {available}")]
    InsufficientStations { needed: usize, available: usize },
}

/// Output of the minimum-curvature solver.
#[derive(Debug, Clone)]
pub struct MinCurve {
    /// Dogleg angle of the interval ending at each station (radians)
    pub dogleg: Vec<f64>,
    /// Ratio factor of the interval ending at each station
    pub rf: Vec<f64>,
    /// Measured-depth length of the interval ending at each station
    pub delta_md: Vec<f64>,
    /// Dogleg severity (degrees per course length of `unit`)
    pub dls: Vec<f64>,
    /// Absolute XYZ positions (n, 3)
    pub poss: Array2<f64>,
    pub unit: LengthUnit,
}

impl MinCurve {
    /// Integrate positions from `start_xyz` along the survey (angles in radians).
    pub fn new(
        md: &[f64],
        inc: &[f64],
        azi: &[f64],
        start_xyz: [f64; 3],
        unit: LengthUnit,
    ) -> Result<Self, MinCurveError> {
        if md.len() != inc.len() || md.len() != azi.len() {
            return Err(MinCurveError::LengthMismatch {
                md: md.len(),
                inc: inc.len(),
                azi: azi.len(),
            });
        }
        if md.len() < MIN_STATIONS {
            return Err(MinCurveError::InsufficientStations {
                needed: MIN_STATIONS,
                available: md.len(),
            });
        }

        let n = md.len();
        let mut dogleg = vec![0.0; n];
        let mut rf = vec![1.0; n];
        let mut delta_md = vec![0.0; n];
        let mut dls = vec![0.0; n];

        for k in 1..n {
            delta_md[k] = md[k] - md[k - 1];
            dogleg[k] = dogleg_angle(inc[k - 1], azi[k - 1], inc[k], azi[k]);
            rf[k] = ratio_factor(dogleg[k]);
            if delta_md[k] > 0.0 {
                dls[k] = dogleg[k].to_degrees() / delta_md[k] * unit.course_length();
            }
        }

        let mut poss = Array2::zeros((n, 3));
        let mut current = nalgebra::Vector3::from(start_xyz);
        let mut prev_t = tangent_xyz(inc[0], azi[0]);
        for (k, mut row) in poss.axis_iter_mut(Axis(0)).enumerate() {
            let t = tangent_xyz(inc[k], azi[k]);
            if k > 0 {
                current += (prev_t + t) * (delta_md[k] / 2.0 * rf[k]);
            }
            row[0] = current.x;
            row[1] = current.y;
            row[2] = current.z;
            prev_t = t;
        }

        Ok(Self {
            dogleg,
            rf,
            delta_md,
            dls,
            poss,
            unit,
        })
    }
}

/// Dogleg between two stations (radians). Clamped so rounding never yields NaN.
pub fn dogleg_angle(inc1: f64, azi1: f64, inc2: f64, azi2: f64) -> f64 {
    let cos_dl = (inc2 - inc1).cos() - inc1.sin() * inc2.sin() * (1.0 - (azi2 - azi1).cos());
    cos_dl.clamp(-1.0, 1.0).acos()
}

/// Minimum-curvature ratio factor; 1 for a straight interval.
pub fn ratio_factor(dogleg: f64) -> f64 {
    if dogleg == 0.0 {
        1.0
    } else {
        2.0 / dogleg * (dogleg / 2.0).tan()
    }
}
