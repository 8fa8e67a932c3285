//! Parallel construction of independent surveys

use rayon::prelude::*;
use tracing::debug;

use super::{Survey, SurveyParams};
use crate::error::SurveyError;

/// Build every survey in `params` on the rayon pool.
///
/// Results keep the input order; one failing survey does not affect the others.
pub fn build_surveys(params: Vec<SurveyParams>) -> Vec<Result<Survey, SurveyError>> {
    let count = params.len();
    let results: Vec<_> = params.into_par_iter().map(Survey::new).collect();
    debug!(
        surveys = count,
        failed = results.iter().filter(|r| r.is_err()).count(),
        "Batch survey build complete"
    );
    results
}
