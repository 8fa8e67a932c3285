//! Trajectory Module
//!
//! Deterministic wellbore geometry. All math here is pure geometry - no
//! uncertainty involved.
//!
//! - `MinCurve` - minimum-curvature dogleg, ratio factor, DLS and positions
//! - `get_nev()` - translation of local XYZ into North/East/TVD
//! - `get_vec()` / `get_angles()` - tangent vectors and their inverse

pub mod min_curve;
pub mod nev;
pub mod vectors;

pub use min_curve::{dogleg_angle, ratio_factor, MinCurve, MinCurveError};
pub use nev::get_nev;
pub use vectors::{get_angles, get_vec};
