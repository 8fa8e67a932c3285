//! Station interpolation along a minimum-curvature arc
//!
//! The tangent at distance `x` past station `i` is the great-circle (slerp)
//! blend of the bracketing tangents:
//!
//! `t = sin(D − d)/sin(D) · t₁ + sin(d)/sin(D) · t₂`, with `d = x · D / ΔMD`
//!
//! where `D` is the interval dogleg. A straight interval (`D = 0`) keeps the
//! start station's angles.

use nalgebra::Vector3;
use tracing::debug;

use super::{Survey, SurveyParams};
use crate::error::SurveyError;
use crate::trajectory::vectors::angles_from_xyz;

/// Build a 3-station survey: station `index`, the point `x` further along the
/// hole, and station `index + 1`.
///
/// The result is a fresh survey anchored at station `index` (its XYZ and NEV
/// become the new frame origin) with minimum curvature re-run over the two
/// sub-intervals. `survey` is not modified.
pub fn interpolate_survey(survey: &Survey, x: f64, index: usize) -> Result<Survey, SurveyError> {
    let stations = survey.len();
    if index >= stations.saturating_sub(1) {
        return Err(SurveyError::IndexOutOfRange { index, stations });
    }

    let next = index + 1;
    let delta_md = survey.delta_md()[next];
    if !x.is_finite() || x < 0.0 || x > delta_md {
        return Err(SurveyError::OutOfRange { x, delta_md });
    }

    let total_dogleg = survey.dogleg()[next];
    let (inc, azi) = if total_dogleg == 0.0 {
        (survey.inc_rad()[index], survey.azi_rad()[index])
    } else {
        let vec = survey.vec();
        let tangent = |k: usize| {
            let row = vec.row(k);
            Vector3::new(row[0], row[1], row[2])
        };
        let dogleg = if delta_md > 0.0 { x * total_dogleg / delta_md } else { 0.0 };
        let t = tangent(index) * ((total_dogleg - dogleg).sin() / total_dogleg.sin())
            + tangent(next) * (dogleg.sin() / total_dogleg.sin());
        angles_from_xyz(&t)
    };

    let md = survey.md();
    let mut params = SurveyParams::new(
        vec![md[index], md[index] + x, md[next]],
        vec![survey.inc_rad()[index], inc, survey.inc_rad()[next]],
        vec![survey.azi_rad()[index], azi, survey.azi_rad()[next]],
    );
    params.deg = false;
    params.unit = survey.unit();
    params.start_xyz = [survey.x()[index], survey.y()[index], survey.z()[index]];
    params.start_nev = [survey.n()[index], survey.e()[index], survey.tvd()[index]];

    debug!(index, x, inc, azi, "Interpolated survey station");
    Survey::new(params)
}
