//! Well reference parameters forwarded to directional error models

use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    DEFAULT_B_TOTAL_NT, DEFAULT_DIP_DEG, DEFAULT_G, DEFAULT_LATITUDE_DEG,
    DEFAULT_VERTICAL_INC_LIMIT_DEG,
};

/// Site geomagnetic / gravity reference for a well.
///
/// The survey never interprets these; they are handed to the error model as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRefParams {
    /// Site latitude (degrees)
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Local gravity (m/s²)
    #[serde(default = "default_g")]
    pub g: f64,

    /// Total magnetic field strength (nT)
    #[serde(default = "default_b_total")]
    pub b_total: f64,

    /// Magnetic dip (degrees)
    #[serde(default = "default_dip")]
    pub dip: f64,

    /// Magnetic declination (degrees, east positive)
    #[serde(default)]
    pub declination: f64,

    /// Grid convergence (degrees)
    #[serde(default)]
    pub convergence: f64,

    /// Inclinations below this (degrees) are treated as vertical and carry no azimuth error
    #[serde(default = "default_vertical_inc_limit")]
    pub vertical_inc_limit: f64,
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE_DEG
}
fn default_g() -> f64 {
    DEFAULT_G
}
fn default_b_total() -> f64 {
    DEFAULT_B_TOTAL_NT
}
fn default_dip() -> f64 {
    DEFAULT_DIP_DEG
}
fn default_vertical_inc_limit() -> f64 {
    DEFAULT_VERTICAL_INC_LIMIT_DEG
}

impl Default for WellRefParams {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            g: default_g(),
            b_total: default_b_total(),
            dip: default_dip(),
            declination: 0.0,
            convergence: 0.0,
            vertical_inc_limit: default_vertical_inc_limit(),
        }
    }
}
