//! Survey Module
//!
//! A `Survey` is built once from measured depth, inclination and azimuth and
//! is immutable afterwards. Construction is a single ordered pass:
//!
//! 1. Resolve the error model tag (unknown tags fail before any computation)
//! 2. Validate station arrays and caller overrides
//! 3. Normalise angles into degree and radian form
//! 4. Minimum curvature: dogleg, ratio factor, ΔMD, DLS, positions
//! 5. NEV projection and tangent vectors (unless supplied)
//! 6. Covariance from the error model, or caller covariance passed through
//!
//! `interpolate_survey()` derives a new 3-station survey between two stations;
//! `build_surveys()` constructs independent surveys in parallel.

mod batch;
mod interpolate;

pub use batch::build_surveys;
pub use interpolate::interpolate_survey;

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use serde::Serialize;
use tracing::debug;

use crate::config::defaults::MIN_STATIONS;
use crate::error::SurveyError;
use crate::error_model::{get_sigmas, resolve_covariances, ErrorModelKind, MwdToolErrors};
use crate::trajectory::{get_nev, get_vec, MinCurve};
use crate::types::{Angles, LengthUnit, WellRefParams};

// ============================================================================
// Construction Parameters
// ============================================================================

/// Everything a survey can be built from.
///
/// Only `md`, `inc` and `azi` are required; every `Option` is "derive it if
/// absent". Use [`SurveyParams::new`] for defaults and override fields as needed.
#[derive(Debug, Clone)]
pub struct SurveyParams {
    pub md: Vec<f64>,
    pub inc: Vec<f64>,
    pub azi: Vec<f64>,
    /// `inc` / `azi` are in degrees (otherwise radians)
    pub deg: bool,
    pub unit: LengthUnit,
    pub start_xyz: [f64; 3],
    pub start_nev: [f64; 3],

    /// NEV override; all three or none
    pub n: Option<Vec<f64>>,
    pub e: Option<Vec<f64>>,
    pub tvd: Option<Vec<f64>>,
    /// XYZ override; all three or none
    pub x: Option<Vec<f64>>,
    pub y: Option<Vec<f64>>,
    pub z: Option<Vec<f64>>,
    /// (n, 3) tangent vectors in the XYZ frame
    pub vec: Option<Array2<f64>>,
    pub radius: Option<Vec<f64>>,

    /// (n, 3, 3); replaced when an error model is set
    pub cov_nev: Option<Array3<f64>>,
    pub cov_hla: Option<Array3<f64>>,

    /// Error model tag, e.g. `"ISCWSA_MWD"`
    pub error_model: Option<String>,
    /// Tool error budget for the error model; ISCWSA defaults when absent
    pub tool_errors: Option<MwdToolErrors>,
    pub well_ref_params: Option<WellRefParams>,
}

impl SurveyParams {
    pub fn new(md: Vec<f64>, inc: Vec<f64>, azi: Vec<f64>) -> Self {
        Self {
            md,
            inc,
            azi,
            deg: true,
            unit: LengthUnit::default(),
            start_xyz: [0.0; 3],
            start_nev: [0.0; 3],
            n: None,
            e: None,
            tvd: None,
            x: None,
            y: None,
            z: None,
            vec: None,
            radius: None,
            cov_nev: None,
            cov_hla: None,
            error_model: None,
            tool_errors: None,
            well_ref_params: None,
        }
    }

    /// Select an error model by kind.
    pub fn with_error_model(mut self, kind: ErrorModelKind) -> Self {
        self.error_model = Some(kind.as_str().to_string());
        self
    }

    pub fn build(self) -> Result<Survey, SurveyError> {
        Survey::new(self)
    }
}

// ============================================================================
// Survey
// ============================================================================

/// A fully computed directional survey.
#[derive(Debug, Clone, Serialize)]
pub struct Survey {
    md: Vec<f64>,
    angles: Angles,
    unit: LengthUnit,
    deg: bool,
    start_xyz: [f64; 3],
    start_nev: [f64; 3],

    survey_deg: Array2<f64>,
    survey_rad: Array2<f64>,

    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    n: Vec<f64>,
    e: Vec<f64>,
    tvd: Vec<f64>,
    vec: Array2<f64>,
    radius: Option<Vec<f64>>,

    dogleg: Vec<f64>,
    rf: Vec<f64>,
    delta_md: Vec<f64>,
    dls: Vec<f64>,

    cov_hla: Option<Array3<f64>>,
    cov_nev: Option<Array3<f64>>,
    error_model: Option<ErrorModelKind>,
    well_ref_params: Option<WellRefParams>,
}

impl Survey {
    pub fn new(params: SurveyParams) -> Result<Self, SurveyError> {
        let error_model = params
            .error_model
            .as_deref()
            .map(str::parse::<ErrorModelKind>)
            .transpose()?;

        validate_params(&params)?;

        let SurveyParams {
            md,
            inc,
            azi,
            deg,
            unit,
            start_xyz,
            start_nev,
            n,
            e,
            tvd,
            x,
            y,
            z,
            vec,
            radius,
            cov_nev,
            cov_hla,
            tool_errors,
            well_ref_params,
            ..
        } = params;

        let angles = Angles::new(&inc, &azi, deg);
        let survey_deg = stack_columns(&md, angles.inc_deg(), angles.azi_deg());
        let survey_rad = stack_columns(&md, angles.inc_rad(), angles.azi_rad());

        let mc = MinCurve::new(&md, angles.inc_rad(), angles.azi_rad(), start_xyz, unit)?;

        let (x, y, z) = match (x, y, z) {
            (Some(x), Some(y), Some(z)) => (x, y, z),
            _ => {
                let column = |i: usize| mc.poss.column(i).to_vec();
                (column(0), column(1), column(2))
            }
        };

        let (n, e, tvd) = match (n, e, tvd) {
            (Some(n), Some(e), Some(tvd)) => (n, e, tvd),
            _ => {
                let nev = get_nev(stack_columns(&x, &y, &z).view(), start_xyz, start_nev);
                let column = |i: usize| nev.column(i).to_vec();
                (column(0), column(1), column(2))
            }
        };

        let vec = vec.unwrap_or_else(|| get_vec(angles.inc_rad(), angles.azi_rad(), false));

        let (cov_hla, cov_nev) = match error_model {
            Some(kind) => {
                let model = kind.model(tool_errors.unwrap_or_default());
                let well_ref = well_ref_params.clone().unwrap_or_default();
                let (hla, nev) = resolve_covariances(model.as_ref(), survey_deg.view(), start_xyz, &well_ref)?;
                (Some(hla), Some(nev))
            }
            None => (cov_hla, cov_nev),
        };

        debug!(
            stations = md.len(),
            unit = %unit,
            error_model = ?error_model,
            max_dls = mc.dls.iter().copied().fold(0.0_f64, f64::max),
            "Survey constructed"
        );

        Ok(Self {
            md,
            angles,
            unit,
            deg,
            start_xyz,
            start_nev,
            survey_deg,
            survey_rad,
            x,
            y,
            z,
            n,
            e,
            tvd,
            vec,
            radius,
            dogleg: mc.dogleg,
            rf: mc.rf,
            delta_md: mc.delta_md,
            dls: mc.dls,
            cov_hla,
            cov_nev,
            error_model,
            well_ref_params,
        })
    }

    /// Derive a 3-station survey with a station interpolated `x` beyond station `index`.
    pub fn interpolate(&self, x: f64, index: usize) -> Result<Survey, SurveyError> {
        interpolate_survey(self, x, index)
    }

    pub fn len(&self) -> usize {
        self.md.len()
    }

    pub fn is_empty(&self) -> bool {
        self.md.is_empty()
    }

    pub fn md(&self) -> &[f64] {
        &self.md
    }

    pub fn inc_deg(&self) -> &[f64] {
        self.angles.inc_deg()
    }

    pub fn inc_rad(&self) -> &[f64] {
        self.angles.inc_rad()
    }

    pub fn azi_deg(&self) -> &[f64] {
        self.angles.azi_deg()
    }

    pub fn azi_rad(&self) -> &[f64] {
        self.angles.azi_rad()
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Whether the input angles were given in degrees.
    pub fn deg(&self) -> bool {
        self.deg
    }

    pub fn start_xyz(&self) -> [f64; 3] {
        self.start_xyz
    }

    pub fn start_nev(&self) -> [f64; 3] {
        self.start_nev
    }

    /// (n, 3) of md, inc°, azi°
    pub fn survey_deg(&self) -> ArrayView2<'_, f64> {
        self.survey_deg.view()
    }

    /// (n, 3) of md, inc, azi in radians
    pub fn survey_rad(&self) -> ArrayView2<'_, f64> {
        self.survey_rad.view()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    pub fn n(&self) -> &[f64] {
        &self.n
    }

    pub fn e(&self) -> &[f64] {
        &self.e
    }

    pub fn tvd(&self) -> &[f64] {
        &self.tvd
    }

    /// XYZ position of station `index`.
    pub fn xyz_at(&self, index: usize) -> Option<[f64; 3]> {
        Some([*self.x.get(index)?, *self.y.get(index)?, *self.z.get(index)?])
    }

    /// NEV position of station `index`.
    pub fn nev_at(&self, index: usize) -> Option<[f64; 3]> {
        Some([*self.n.get(index)?, *self.e.get(index)?, *self.tvd.get(index)?])
    }

    /// (n, 3) unit tangent vectors in the XYZ frame
    pub fn vec(&self) -> ArrayView2<'_, f64> {
        self.vec.view()
    }

    pub fn radius(&self) -> Option<&[f64]> {
        self.radius.as_deref()
    }

    pub fn dogleg(&self) -> &[f64] {
        &self.dogleg
    }

    pub fn rf(&self) -> &[f64] {
        &self.rf
    }

    pub fn delta_md(&self) -> &[f64] {
        &self.delta_md
    }

    pub fn dls(&self) -> &[f64] {
        &self.dls
    }

    /// (n, 3, 3) HLA covariance
    pub fn cov_hla(&self) -> Option<ArrayView3<'_, f64>> {
        self.cov_hla.as_ref().map(Array3::view)
    }

    /// (n, 3, 3) NEV covariance
    pub fn cov_nev(&self) -> Option<ArrayView3<'_, f64>> {
        self.cov_nev.as_ref().map(Array3::view)
    }

    /// 1-sigma H, L, A per station.
    pub fn sigmas_hla(&self) -> Option<(Vec<f64>, Vec<f64>, Vec<f64>)> {
        self.cov_hla().map(get_sigmas)
    }

    /// 1-sigma N, E, V per station.
    pub fn sigmas_nev(&self) -> Option<(Vec<f64>, Vec<f64>, Vec<f64>)> {
        self.cov_nev().map(get_sigmas)
    }

    pub fn error_model(&self) -> Option<ErrorModelKind> {
        self.error_model
    }

    pub fn well_ref_params(&self) -> Option<&WellRefParams> {
        self.well_ref_params.as_ref()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// `(n, 3)` table with `a`, `b`, `c` as columns.
fn stack_columns(a: &[f64], b: &[f64], c: &[f64]) -> Array2<f64> {
    let columns = [a, b, c];
    Array2::from_shape_fn((a.len(), 3), |(k, j)| columns[j][k])
}

fn validate_params(p: &SurveyParams) -> Result<(), SurveyError> {
    let n = p.md.len();
    if p.inc.len() != n || p.azi.len() != n {
        return Err(SurveyError::InvalidInput(format!(
            "md, inc and azi differ in length: {}, {}, {}",
            n,
            p.inc.len(),
            p.azi.len()
        )));
    }
    if n < MIN_STATIONS {
        return Err(SurveyError::InvalidInput(format!(
            "need at least {MIN_STATIONS} stations, got {n}"
        )));
    }
    if let Some(bad) = p.md.iter().chain(&p.inc).chain(&p.azi).find(|v| !v.is_finite()) {
        return Err(SurveyError::InvalidInput(format!(
            "md, inc and azi must be finite, got {bad}"
        )));
    }
    if let Some(k) = p.md.windows(2).position(|w| w[1] < w[0]) {
        return Err(SurveyError::InvalidInput(format!(
            "md must be non-decreasing: md[{}] = {} < md[{}] = {}",
            k + 1,
            p.md[k + 1],
            k,
            p.md[k]
        )));
    }

    check_triplet("x, y, z", [&p.x, &p.y, &p.z], n)?;
    check_triplet("n, e, tvd", [&p.n, &p.e, &p.tvd], n)?;
    if let Some(v) = &p.vec {
        if v.shape() != &[n, 3] {
            return Err(SurveyError::InvalidInput(format!(
                "vec has shape {:?}, expected [{n}, 3]",
                v.shape()
            )));
        }
    }
    if let Some(r) = &p.radius {
        if r.len() != n {
            return Err(SurveyError::InvalidInput(format!(
                "radius has {} values, expected {n}",
                r.len()
            )));
        }
    }
    Ok(())
}

/// Overrides come as complete triplets of station-length arrays.
fn check_triplet(name: &str, parts: [&Option<Vec<f64>>; 3], n: usize) -> Result<(), SurveyError> {
    let present = parts.iter().filter(|p| p.is_some()).count();
    if present != 0 && present != 3 {
        return Err(SurveyError::InvalidInput(format!(
            "{name} must be supplied together ({present} of 3 given)"
        )));
    }
    if let Some(len) = parts.into_iter().flatten().map(Vec::len).find(|&len| len != n) {
        return Err(SurveyError::InvalidInput(format!(
            "{name} override has {len} values, expected {n}"
        )));
    }
    Ok(())
}
