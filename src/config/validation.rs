//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for SurveyConfig.
///
/// Maintained by hand to match the struct hierarchy in survey_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [survey]
        "survey",
        "survey.unit",
        "survey.deg",
        "survey.start_xyz",
        "survey.start_nev",
        // [well_ref]
        "well_ref",
        "well_ref.latitude",
        "well_ref.g",
        "well_ref.b_total",
        "well_ref.dip",
        "well_ref.declination",
        "well_ref.convergence",
        "well_ref.vertical_inc_limit",
        // [error_model]
        "error_model",
        "error_model.model",
        "error_model.depth_random_m",
        "error_model.depth_scale",
        "error_model.sag_deg",
        "error_model.misalignment_deg",
        "error_model.declination_deg",
        "error_model.axial_bias_nt",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// A table `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Never fails on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new(); // parse errors are reported by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed SurveyConfig.
///
/// Returns (errors, warnings): errors are impossible values, warnings are
/// suspicious but usable.
pub fn validate_physical_ranges(
    config: &super::SurveyConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let r = &config.well_ref;

    for (name, value) in [
        ("latitude", r.latitude),
        ("g", r.g),
        ("b_total", r.b_total),
        ("dip", r.dip),
        ("declination", r.declination),
        ("convergence", r.convergence),
        ("vertical_inc_limit", r.vertical_inc_limit),
    ] {
        if !value.is_finite() {
            errors.push(format!("well_ref.{name} = {value} must be a finite number"));
        }
    }

    if r.latitude.abs() > 90.0 {
        errors.push(format!(
            "well_ref.latitude = {:.2} is outside -90..90 degrees",
            r.latitude
        ));
    }

    // Field strength is a divisor in the magnetic error terms
    if r.b_total <= 0.0 {
        errors.push(format!("well_ref.b_total = {:.1} must be > 0 nT", r.b_total));
    }

    // cos(dip) is a divisor too
    if r.dip.abs() >= 90.0 {
        errors.push(format!(
            "well_ref.dip = {:.2} must be strictly between -90 and 90 degrees",
            r.dip
        ));
    }

    if r.vertical_inc_limit < 0.0 {
        errors.push(format!(
            "well_ref.vertical_inc_limit = {} cannot be negative",
            r.vertical_inc_limit
        ));
    }

    // Earth's field is roughly 22 000-67 000 nT
    if r.b_total > 0.0 && !(20_000.0..=70_000.0).contains(&r.b_total) {
        warnings.push(ValidationWarning {
            field: "well_ref.b_total".to_string(),
            message: format!(
                "b_total = {:.0} nT is outside the geomagnetic range (20000-70000 nT)",
                r.b_total
            ),
            suggestion: None,
        });
    }

    if r.g > 0.0 && !(9.7..=9.9).contains(&r.g) {
        warnings.push(ValidationWarning {
            field: "well_ref.g".to_string(),
            message: format!("g = {:.4} m/s² is outside the terrestrial range (9.7-9.9)", r.g),
            suggestion: None,
        });
    } else if r.g <= 0.0 {
        errors.push(format!("well_ref.g = {:.4} must be > 0", r.g));
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
