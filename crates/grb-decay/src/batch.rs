use grb_core::errors::{DecayError, ErrorInfo};
use grb_core::DecayParams;
use rayon::prelude::*;
use tracing::debug;

use crate::model::{evaluate, TemporalDecayModel};

/// Inputs at or above this length are processed on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Maps `f` over `0..len`, in parallel for large inputs, preserving order.
pub(crate) fn map_indexed<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if len >= PARALLEL_THRESHOLD {
        debug!(len, "parallel batch");
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}

/// Returns the first error in index order, tagged with its position.
pub(crate) fn first_error<T>(results: Vec<Result<T, DecayError>>) -> Result<Vec<T>, DecayError> {
    let mut values = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        values.push(result.map_err(|err| err.with_context("index", index))?);
    }
    Ok(values)
}

/// Element-wise unchecked evaluation of the decay factor.
pub fn evaluate_many(times: &[f64], params: &DecayParams) -> Vec<f64> {
    map_indexed(times.len(), |i| evaluate(times[i], params))
}

impl TemporalDecayModel {
    /// Element-wise checked evaluation; fails on the first non-finite value.
    pub fn evaluate_many_checked(&self, times: &[f64]) -> Result<Vec<f64>, DecayError> {
        first_error(map_indexed(times.len(), |i| self.evaluate_checked(times[i])))
    }

    /// Time-averaged values for paired arrays of window bounds.
    pub fn integral_many(&self, t_min: &[f64], t_max: &[f64]) -> Result<Vec<f64>, DecayError> {
        if t_min.len() != t_max.len() {
            return Err(DecayError::Shape(
                ErrorInfo::new("length_mismatch", "t_min and t_max must have equal length")
                    .with_context("t_min_len", t_min.len())
                    .with_context("t_max_len", t_max.len()),
            ));
        }
        first_error(map_indexed(t_min.len(), |i| {
            self.integral(t_min[i], t_max[i])
        }))
    }
}
