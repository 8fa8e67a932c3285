//! Length unit tag carried by a survey

use serde::{Deserialize, Serialize};

use crate::config::defaults::{DLS_COURSE_LENGTH_FEET, DLS_COURSE_LENGTH_METERS};

/// Length unit of measured depth and positions.
///
/// Values are never converted; the tag only selects the course length used to
/// normalise dogleg severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Meters,
    Feet,
}

impl LengthUnit {
    /// Course length for DLS: degrees per 30 m or per 100 ft.
    pub fn course_length(self) -> f64 {
        match self {
            LengthUnit::Meters => DLS_COURSE_LENGTH_METERS,
            LengthUnit::Feet => DLS_COURSE_LENGTH_FEET,
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthUnit::Meters => write!(f, "meters"),
            LengthUnit::Feet => write!(f, "feet"),
        }
    }
}
