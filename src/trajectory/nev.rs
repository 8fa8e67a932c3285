//! Local XYZ → North/East/TVD projection
//!
//! Pure translation: `N = y − y₀ + n₀`, `E = x − x₀ + e₀`, `V = z − z₀ + v₀`.

use ndarray::{arr1, Array2, ArrayView2, Axis};

/// Project (n, 3) XYZ positions into (n, 3) NEV coordinates.
pub fn get_nev(poss: ArrayView2<f64>, start_xyz: [f64; 3], start_nev: [f64; 3]) -> Array2<f64> {
    let relative = &poss - &arr1(&start_xyz);
    relative.select(Axis(1), &[1, 0, 2]) + &arr1(&start_nev)
}
