//! Survey Configuration - survey defaults, well reference and tool error budget as TOML
//!
//! Each struct implements `Default`, so a missing file or a partial file always
//! yields a complete, valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::error_model::{ErrorModelKind, MwdToolErrors};
use crate::survey::SurveyParams;
use crate::types::{LengthUnit, WellRefParams};

/// Environment variable pointing at a survey config file.
pub const CONFIG_ENV_VAR: &str = "SAIREN_SURVEY_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "survey_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for survey processing.
///
/// Load with `SurveyConfig::load()` which searches:
/// 1. `$SAIREN_SURVEY_CONFIG` env var
/// 2. `./survey_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Survey input conventions and frame origin
    #[serde(default)]
    pub survey: SurveyDefaults,

    /// Geomagnetic reference forwarded to the error model
    #[serde(default)]
    pub well_ref: WellRefParams,

    /// Error model selection and tool error budget
    #[serde(default)]
    pub error_model: ErrorModelConfig,
}

impl SurveyConfig {
    /// Load configuration using the standard search order:
    /// 1. `$SAIREN_SURVEY_CONFIG` environment variable
    /// 2. `./survey_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded survey config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded survey config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged, not rejected.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Survey config saved");
        Ok(())
    }

    /// Validate all values for physical sense.
    ///
    /// Rules:
    /// - Frame offsets and reference values must be finite
    /// - Field strength must be positive, dip strictly inside ±90°
    /// - Tool sigmas must be non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        for (name, values) in [("survey.start_xyz", self.survey.start_xyz), ("survey.start_nev", self.survey.start_nev)] {
            if values.iter().any(|v| !v.is_finite()) {
                errors.push(format!("{name} must contain finite values, got {values:?}"));
            }
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if let Err(e) = self.error_model.tool.validate() {
            errors.push(format!("error_model: {e}"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Seed survey construction parameters from this config.
    pub fn params(&self, md: Vec<f64>, inc: Vec<f64>, azi: Vec<f64>) -> SurveyParams {
        let mut params = SurveyParams::new(md, inc, azi);
        params.deg = self.survey.deg;
        params.unit = self.survey.unit;
        params.start_xyz = self.survey.start_xyz;
        params.start_nev = self.survey.start_nev;
        if let Some(kind) = self.error_model.model {
            params = params.with_error_model(kind);
            params.tool_errors = Some(self.error_model.tool.clone());
            params.well_ref_params = Some(self.well_ref.clone());
        }
        params
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {1}", .0.display())]
    Io(PathBuf, std::io::Error),

    #[error("Config parse error ({}): {1}", .0.display())]
    Parse(PathBuf, toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Survey Defaults
// ============================================================================

/// How raw survey angles are interpreted and where the survey starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDefaults {
    /// Length unit of MD and positions
    #[serde(default)]
    pub unit: LengthUnit,

    /// Inclination / azimuth given in degrees
    #[serde(default = "default_deg")]
    pub deg: bool,

    /// Local XYZ of the first station
    #[serde(default)]
    pub start_xyz: [f64; 3],

    /// NEV of the first station
    #[serde(default)]
    pub start_nev: [f64; 3],
}

fn default_deg() -> bool {
    true
}

impl Default for SurveyDefaults {
    fn default() -> Self {
        Self {
            unit: LengthUnit::default(),
            deg: default_deg(),
            start_xyz: [0.0; 3],
            start_nev: [0.0; 3],
        }
    }
}

// ============================================================================
// Error Model
// ============================================================================

/// Error model selection. No model means no covariance is computed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorModelConfig {
    /// e.g. `model = "ISCWSA_MWD"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ErrorModelKind>,

    /// 1-sigma tool errors
    #[serde(flatten)]
    pub tool: MwdToolErrors,
}

// ============================================================================
// Tests
// ============================================================================
