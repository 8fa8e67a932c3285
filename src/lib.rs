//! SAIREN-OS Survey: directional survey trajectory and positional uncertainty
//!
//! Turns measured depth, inclination and azimuth into a wellbore trajectory
//! and, optionally, a per-station position covariance.
//!
//! ## Architecture
//!
//! - **Survey**: immutable survey built in one ordered pass, plus station interpolation
//! - **Trajectory**: minimum-curvature integration, NEV projection, tangent vectors
//! - **Error Model**: ISCWSA MWD tool model and covariance stack utilities
//! - **Config**: TOML survey conventions, well reference and tool error budget

pub mod config;
pub mod error;
pub mod error_model;
pub mod survey;
pub mod trajectory;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, SurveyConfig};

// Re-export errors
pub use error::SurveyError;

// Re-export survey construction
pub use survey::{build_surveys, interpolate_survey, Survey, SurveyParams};

// Re-export error model components
pub use error_model::{
    get_sigmas, hla_to_nev, make_cov, nev_to_hla, ErrorModel, ErrorModelError, ErrorModelKind,
    IscwsaMwd, MwdToolErrors,
};

// Re-export trajectory helpers
pub use trajectory::{get_angles, get_nev, get_vec, MinCurve, MinCurveError};

// Re-export commonly used types
pub use types::{Angles, LengthUnit, WellRefParams};
