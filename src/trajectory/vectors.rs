//! Tangent vectors from inclination / azimuth and back
//!
//! Two frames are used:
//! - **XYZ** (`get_vec`, `get_angles`): x = East, y = North, z = down. This is the
//!   frame of survey positions and stored tangent vectors.
//! - **NEV** (`tangent_nev` and its derivatives): N, E, V ordering used by the
//!   error model and the HLA basis.

use nalgebra::{Matrix3, Vector3};
use ndarray::{Array2, ArrayView2, Axis};

use std::f64::consts::TAU;

/// Unit tangent vectors (n, 3) in the XYZ frame.
///
/// Rows are `[sin I · sin A, sin I · cos A, cos I]`, normalised.
pub fn get_vec(inc: &[f64], azi: &[f64], deg: bool) -> Array2<f64> {
    let n = inc.len().min(azi.len());
    let mut out = Array2::zeros((n, 3));
    for (mut row, (&i, &a)) in out.axis_iter_mut(Axis(0)).zip(inc.iter().zip(azi)) {
        let (i, a) = if deg { (i.to_radians(), a.to_radians()) } else { (i, a) };
        let t = tangent_xyz(i, a);
        row[0] = t.x;
        row[1] = t.y;
        row[2] = t.z;
    }
    out
}

/// Inclination and azimuth (radians) of each row of an (n, 3) XYZ vector array.
///
/// Returns (n, 2) with columns `[inc, azi]`; azimuth is wrapped to `[0, 2π)`.
/// Rows need not be unit length.
pub fn get_angles(vec: ArrayView2<f64>) -> Array2<f64> {
    let mut out = Array2::zeros((vec.nrows(), 2));
    for (mut row, v) in out.axis_iter_mut(Axis(0)).zip(vec.axis_iter(Axis(0))) {
        let (inc, azi) = angles_from_xyz(&Vector3::new(v[0], v[1], v[2]));
        row[0] = inc;
        row[1] = azi;
    }
    out
}

/// Unit tangent in the XYZ frame for a single station (radians).
pub fn tangent_xyz(inc: f64, azi: f64) -> Vector3<f64> {
    let v = Vector3::new(inc.sin() * azi.sin(), inc.sin() * azi.cos(), inc.cos());
    let norm = v.norm();
    if norm > 0.0 {
        v / norm
    } else {
        v
    }
}

/// Inverse of [`tangent_xyz`]: (inc, azi) in radians.
pub fn angles_from_xyz(v: &Vector3<f64>) -> (f64, f64) {
    let horizontal = v.x.hypot(v.y);
    let inc = horizontal.atan2(v.z);
    let azi = v.x.atan2(v.y).rem_euclid(TAU);
    (inc, azi)
}

/// Unit tangent in the NEV frame.
pub fn tangent_nev(inc: f64, azi: f64) -> Vector3<f64> {
    Vector3::new(inc.sin() * azi.cos(), inc.sin() * azi.sin(), inc.cos())
}

/// ∂t/∂I of the NEV tangent. Also the highside axis of the HLA frame.
pub fn d_tangent_d_inc(inc: f64, azi: f64) -> Vector3<f64> {
    Vector3::new(inc.cos() * azi.cos(), inc.cos() * azi.sin(), -inc.sin())
}

/// ∂t/∂A of the NEV tangent.
pub fn d_tangent_d_azi(inc: f64, azi: f64) -> Vector3<f64> {
    Vector3::new(-inc.sin() * azi.sin(), inc.sin() * azi.cos(), 0.0)
}

/// HLA → NEV rotation for a station; columns are the H, L and A axes in NEV.
pub fn hla_basis(inc: f64, azi: f64) -> Matrix3<f64> {
    let h = d_tangent_d_inc(inc, azi);
    let l = Vector3::new(-azi.sin(), azi.cos(), 0.0);
    let a = tangent_nev(inc, azi);
    Matrix3::from_columns(&[h, l, a])
}
