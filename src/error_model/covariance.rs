//! Covariance stacks: construction from 1-sigma values, frame rotation, sigma extraction
//!
//! All stacks here are station-major `(n, 3, 3)`.

use nalgebra::Matrix3;
use ndarray::{Array3, ArrayView2, ArrayView3, Axis};

use crate::error::SurveyError;
use crate::trajectory::vectors::hla_basis;

/// Build an `(n, 3, 3)` covariance stack from three 1-sigma sequences.
///
/// `a`, `b`, `c` are the H/L/A or N/E/V axis errors. With `diag` only the
/// variances are populated; otherwise every entry is the product of the two
/// axis sigmas, i.e. the axes are treated as fully correlated.
pub fn make_cov(a: &[f64], b: &[f64], c: &[f64], diag: bool) -> Result<Array3<f64>, SurveyError> {
    if a.len() != b.len() || a.len() != c.len() {
        return Err(SurveyError::InvalidInput(format!(
            "sigma sequences differ in length: a={}, b={}, c={}",
            a.len(),
            b.len(),
            c.len()
        )));
    }

    Ok(Array3::from_shape_fn((a.len(), 3, 3), |(k, i, j)| {
        if diag && i != j {
            return 0.0;
        }
        let sigma = [a[k], b[k], c[k]];
        sigma[i] * sigma[j]
    }))
}

/// Rotate HLA covariance into NEV using each station's inclination/azimuth.
///
/// `survey_rad` is the `(n, 3)` table of `(md, inc, azi)` in radians.
pub fn hla_to_nev(survey_rad: ArrayView2<f64>, cov_hla: ArrayView3<f64>) -> Result<Array3<f64>, SurveyError> {
    rotate(survey_rad, cov_hla, |t, cov| t * cov * t.transpose())
}

/// Rotate NEV covariance into HLA; inverse of [`hla_to_nev`].
pub fn nev_to_hla(survey_rad: ArrayView2<f64>, cov_nev: ArrayView3<f64>) -> Result<Array3<f64>, SurveyError> {
    rotate(survey_rad, cov_nev, |t, cov| t.transpose() * cov * t)
}

fn rotate(
    survey_rad: ArrayView2<f64>,
    cov: ArrayView3<f64>,
    apply: impl Fn(&Matrix3<f64>, &Matrix3<f64>) -> Matrix3<f64>,
) -> Result<Array3<f64>, SurveyError> {
    check_stack(cov, survey_rad.nrows())?;
    let mut out = Array3::zeros(cov.raw_dim());
    for ((station, src), mut dst) in survey_rad
        .axis_iter(Axis(0))
        .zip(cov.axis_iter(Axis(0)))
        .zip(out.axis_iter_mut(Axis(0)))
    {
        let t = hla_basis(station[1], station[2]);
        let m = Matrix3::from_fn(|i, j| src[[i, j]]);
        let rotated = apply(&t, &m);
        for i in 0..3 {
            for j in 0..3 {
                dst[[i, j]] = rotated[(i, j)];
            }
        }
    }
    Ok(out)
}

/// Per-axis 1-sigma values (square roots of the diagonal) of a covariance stack.
pub fn get_sigmas(cov: ArrayView3<f64>) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let axis = |i: usize| -> Vec<f64> {
        cov.axis_iter(Axis(0))
            .map(|m| m[[i, i]].max(0.0).sqrt())
            .collect()
    };
    (axis(0), axis(1), axis(2))
}

fn check_stack(cov: ArrayView3<f64>, stations: usize) -> Result<(), SurveyError> {
    if cov.shape() != &[stations, 3, 3] {
        return Err(SurveyError::InvalidInput(format!(
            "covariance stack has shape {:?}, expected [{stations}, 3, 3]",
            cov.shape()
        )));
    }
    Ok(())
}
