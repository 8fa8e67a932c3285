//! Survey Configuration Module
//!
//! Survey conventions, the geomagnetic well reference and the tool error
//! budget, loaded from TOML instead of being repeated at every call site.
//!
//! ## Loading Order
//!
//! 1. `SAIREN_SURVEY_CONFIG` environment variable (path to TOML file)
//! 2. `survey_config.toml` in the current working directory
//! 3. Built-in defaults (ISCWSA MWD reference values)
//!
//! ## Usage
//!
//! ```ignore
//! config::init(SurveyConfig::load());
//!
//! let params = config::get().map(|c| c.params(md, inc, azi));
//! let survey = Survey::new(params)?;
//! ```

mod survey_config;
pub mod defaults;
pub mod validation;

pub use survey_config::*;

use std::sync::OnceLock;

/// Process-wide survey configuration.
static SURVEY_CONFIG: OnceLock<SurveyConfig> = OnceLock::new();

/// Initialize the global survey configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: SurveyConfig) {
    if SURVEY_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get the global survey configuration.
///
/// `None` until `init()` has been called. Loading is left to the caller so
/// library code never reads the environment or the filesystem on its own.
pub fn get() -> Option<&'static SurveyConfig> {
    SURVEY_CONFIG.get()
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    SURVEY_CONFIG.get().is_some()
}
