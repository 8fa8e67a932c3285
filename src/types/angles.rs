//! Inclination / azimuth in both degree and radian form

use serde::{Deserialize, Serialize};

/// Station angles held in degrees and radians.
///
/// Whichever unit the caller supplied is stored verbatim; the other is a single
/// direct conversion of it, so the two never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    inc_deg: Vec<f64>,
    inc_rad: Vec<f64>,
    azi_deg: Vec<f64>,
    azi_rad: Vec<f64>,
}

impl Angles {
    /// Build from inclination and azimuth given in degrees (`deg = true`) or radians.
    pub fn new(inc: &[f64], azi: &[f64], deg: bool) -> Self {
        if deg {
            Self {
                inc_deg: inc.to_vec(),
                inc_rad: inc.iter().map(|v| v.to_radians()).collect(),
                azi_deg: azi.to_vec(),
                azi_rad: azi.iter().map(|v| v.to_radians()).collect(),
            }
        } else {
            Self {
                inc_deg: inc.iter().map(|v| v.to_degrees()).collect(),
                inc_rad: inc.to_vec(),
                azi_deg: azi.iter().map(|v| v.to_degrees()).collect(),
                azi_rad: azi.to_vec(),
            }
        }
    }

    pub fn inc_deg(&self) -> &[f64] {
        &self.inc_deg
    }

    pub fn inc_rad(&self) -> &[f64] {
        &self.inc_rad
    }

    pub fn azi_deg(&self) -> &[f64] {
        &self.azi_deg
    }

    pub fn azi_rad(&self) -> &[f64] {
        &self.azi_rad
    }

    pub fn len(&self) -> usize {
        self.inc_rad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inc_rad.is_empty()
    }
}
