//! Survey error taxonomy
//!
//! Precondition failures raised by survey construction and interpolation, plus
//! transparent pass-through of failures from the trajectory solver and the
//! error model.

use thiserror::Error;

use crate::error_model::ErrorModelError;
use crate::trajectory::MinCurveError;

/// Errors from building or interpolating a [`Survey`](crate::Survey).
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Unrecognized error model tag.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Interpolation index must address an interval, i.e. `index < stations - 1`.
    #[error("Index {index} is out of range for a survey with {stations} stations")]
    IndexOutOfRange { index: usize, stations: usize },

    /// Interpolation distance falls outside the bracketing interval.
    #[error("Interpolation distance {x} is out of range (interval delta MD {delta_md})")]
    OutOfRange { x: f64, delta_md: f64 },

    /// Structurally invalid input arrays (length mismatch, too few stations, ...).
    #[error("Invalid survey input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    MinCurve(#[from] MinCurveError),

    #[error(transparent)]
    ErrorModel(#[from] ErrorModelError),
}
