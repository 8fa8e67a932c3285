//! Error Model Module
//!
//! Positional uncertainty for survey stations.
//!
//! - `ErrorModelKind` - closed set of supported directional error models
//! - `ErrorModel` - trait every model implements; returns axis-major `(3, 3, n)` stacks
//! - `resolve_covariances()` - adapter used by survey construction; reshapes
//!   the model output to station-major `(n, 3, 3)`
//! - `covariance` - `make_cov()`, HLA/NEV rotation and sigma extraction

pub mod covariance;
pub mod iscwsa_mwd;

pub use covariance::{get_sigmas, hla_to_nev, make_cov, nev_to_hla};
pub use iscwsa_mwd::{IscwsaMwd, MwdToolErrors};

use ndarray::{Array3, ArrayView2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::SurveyError;
use crate::types::WellRefParams;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ErrorModelError {
    #[error("Insufficient stations for error model: need {needed}, have {available}")]
    InsufficientStations { needed: usize, available: usize },

    #[error("Invalid error model parameter: {0}")]
    InvalidParameter(String),

    #[error("Unexpected survey table shape: {0}")]
    Shape(String),
}

// ============================================================================
// Model Selection
// ============================================================================

/// Supported directional error models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorModelKind {
    #[serde(rename = "ISCWSA_MWD")]
    IscwsaMwd,
}

impl ErrorModelKind {
    pub const ALL: [ErrorModelKind; 1] = [ErrorModelKind::IscwsaMwd];

    /// Configuration tag of the model.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorModelKind::IscwsaMwd => "ISCWSA_MWD",
        }
    }

    /// Instantiate the model with the given tool error budget.
    pub fn model(self, tool: MwdToolErrors) -> Box<dyn ErrorModel> {
        match self {
            ErrorModelKind::IscwsaMwd => Box::new(IscwsaMwd::new(tool)),
        }
    }
}

impl std::fmt::Display for ErrorModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ErrorModelKind {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                SurveyError::InvalidConfiguration(format!(
                    "Unrecognized error model '{s}' (known: {})",
                    known.join(", ")
                ))
            })
    }
}

// ============================================================================
// Model Interface
// ============================================================================

/// Per-station covariance as returned by an error model, axis-major `(3, 3, n)`.
#[derive(Debug, Clone)]
pub struct ModelCovariance {
    pub cov_hla: Array3<f64>,
    pub cov_nev: Array3<f64>,
}

/// A directional survey error model.
pub trait ErrorModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Covariance for every station of `survey_deg` (`(n, 3)` of md, inc°, azi°).
    fn covariances(
        &self,
        survey_deg: ArrayView2<f64>,
        surface_loc: [f64; 3],
        well_ref: &WellRefParams,
    ) -> Result<ModelCovariance, ErrorModelError>;
}

/// Run `model` and return `(cov_hla, cov_nev)` reshaped to station-major `(n, 3, 3)`.
pub fn resolve_covariances(
    model: &dyn ErrorModel,
    survey_deg: ArrayView2<f64>,
    surface_loc: [f64; 3],
    well_ref: &WellRefParams,
) -> Result<(Array3<f64>, Array3<f64>), ErrorModelError> {
    let out = model.covariances(survey_deg, surface_loc, well_ref)?;
    debug!(model = model.name(), stations = survey_deg.nrows(), "Error model resolved");
    Ok((station_major(out.cov_hla), station_major(out.cov_nev)))
}

/// Reverse all axes: `(3, 3, n)` → `(n, 3, 3)`.
fn station_major(cov: Array3<f64>) -> Array3<f64> {
    cov.reversed_axes().as_standard_layout().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_parse_known_tag() {
        let kind: ErrorModelKind = "ISCWSA_MWD".parse().expect("known tag");
        assert_eq!(kind, ErrorModelKind::IscwsaMwd);
        assert_eq!(kind.to_string(), "ISCWSA_MWD");
    }

    #[test]
    fn test_parse_unknown_tag() {
        let result = "ISCWSA_GYRO".parse::<ErrorModelKind>();
        match result {
            Err(SurveyError::InvalidConfiguration(msg)) => assert!(msg.contains("ISCWSA_GYRO")),
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_station_major_reshape() {
        // Element [i, j, k] of the model output lands at [k, j, i]
        let axis_major = Array3::from_shape_fn((3, 3, 2), |(i, j, k)| (100 * k + 10 * i + j) as f64);
        let station = station_major(axis_major);
        assert_eq!(station.shape(), &[2, 3, 3]);
        assert_eq!(station[[1, 2, 0]], 102.0);
        assert_eq!(station[[0, 0, 1]], 10.0);
    }

    #[test]
    fn test_resolve_returns_station_major() {
        let survey = array![[0.0, 0.0, 0.0], [100.0, 5.0, 30.0], [200.0, 10.0, 30.0], [300.0, 15.0, 30.0]];
        let model = ErrorModelKind::IscwsaMwd.model(MwdToolErrors::default());
        let (hla, nev) = resolve_covariances(model.as_ref(), survey.view(), [0.0; 3], &WellRefParams::default())
            .expect("valid survey");
        assert_eq!(hla.shape(), &[4, 3, 3]);
        assert_eq!(nev.shape(), &[4, 3, 3]);
    }
}
