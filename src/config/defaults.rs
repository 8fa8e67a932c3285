//! System-wide default constants.
//!
//! Centralises the magic numbers used by the trajectory solver and the
//! directional error model. Grouped by subsystem for easy discovery.

// ============================================================================
// Trajectory
// ============================================================================

/// DLS course length for metric surveys (degrees per 30 m).
pub const DLS_COURSE_LENGTH_METERS: f64 = 30.0;

/// DLS course length for imperial surveys (degrees per 100 ft).
pub const DLS_COURSE_LENGTH_FEET: f64 = 100.0;

/// Minimum number of stations needed to define an interval.
pub const MIN_STATIONS: usize = 2;

// ============================================================================
// Well Reference
// ============================================================================

/// Site latitude used when no well reference is supplied (degrees).
pub const DEFAULT_LATITUDE_DEG: f64 = 60.0;

/// Standard gravity (m/s²).
pub const DEFAULT_G: f64 = 9.806_65;

/// Total geomagnetic field strength (nT).
pub const DEFAULT_B_TOTAL_NT: f64 = 50_000.0;

/// Magnetic dip (degrees).
pub const DEFAULT_DIP_DEG: f64 = 72.0;

/// Below this inclination (degrees) a station counts as vertical for azimuth error terms.
pub const DEFAULT_VERTICAL_INC_LIMIT_DEG: f64 = 0.0001;

// ============================================================================
// ISCWSA MWD Tool Errors (1-sigma)
// ============================================================================

/// DRFR: depth reference, random (m).
pub const MWD_DEPTH_RANDOM_M: f64 = 0.35;

/// DSFS: depth scale factor, systematic (dimensionless).
pub const MWD_DEPTH_SCALE: f64 = 0.000_56;

/// SAG: BHA sag (degrees).
pub const MWD_SAG_DEG: f64 = 0.2;

/// XYM1 / XYM2: tool misalignment (degrees).
pub const MWD_MISALIGNMENT_DEG: f64 = 0.1;

/// DEC: declination uncertainty (degrees).
pub const MWD_DECLINATION_DEG: f64 = 0.36;

/// MBZ: axial magnetic interference (nT).
pub const MWD_AXIAL_BIAS_NT: f64 = 70.0;
