//! Shared data structures for survey construction
//!
//! - `Angles`: inclination/azimuth in synchronized degree and radian form
//! - `LengthUnit`: unit tag forwarded to the trajectory solver
//! - `WellRefParams`: geomagnetic reference handed to error models

mod angles;
mod units;
mod well_ref;

pub use angles::*;
pub use units::*;
pub use well_ref::*;
