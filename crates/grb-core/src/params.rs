use serde::{Deserialize, Serialize};

use crate::errors::{DecayError, ErrorInfo};

fn parameter_error(code: &str, message: impl Into<String>) -> DecayError {
    DecayError::Parameter(ErrorInfo::new(code, message.into()))
}

/// Parameters of the power-law decay `((t - t_ref) / t0) ^ t_index`.
///
/// All time-like fields are expressed in seconds on the same epoch as the
/// times the model is evaluated at. No unit conversion is performed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayParams {
    /// Decay timescale, strictly positive.
    pub t0: f64,
    /// Reference epoch (e.g. trigger time).
    pub t_ref: f64,
    /// Power-law decay index, usually negative.
    pub t_index: f64,
}

impl DecayParams {
    /// Creates a validated parameter set.
    pub fn new(t0: f64, t_ref: f64, t_index: f64) -> Result<Self, DecayError> {
        let params = Self { t0, t_ref, t_index };
        params.validate()?;
        Ok(params)
    }

    /// Checks the construction invariants: all fields finite and `t0 > 0`.
    pub fn validate(&self) -> Result<(), DecayError> {
        for (name, value) in [
            ("t0", self.t0),
            ("t_ref", self.t_ref),
            ("t_index", self.t_index),
        ] {
            if !value.is_finite() {
                return Err(
                    parameter_error("non_finite_param", format!("{name} must be finite"))
                        .with_context(name, value),
                );
            }
        }
        if self.t0 <= 0.0 {
            return Err(DecayError::Parameter(
                ErrorInfo::new("non_positive_t0", "decay timescale t0 must be positive")
                    .with_context("t0", self.t0)
                    .with_hint("t0 is a duration in seconds, e.g. 1.0"),
            ));
        }
        Ok(())
    }

    /// Returns the elapsed time `time - t_ref` scaled by `t0`.
    pub fn scaled_elapsed(&self, time: f64) -> f64 {
        (time - self.t_ref) / self.t0
    }
}

/// Whether an external optimiser may vary a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamState {
    /// Held fixed during fitting.
    Frozen,
    /// Varied by the optimiser.
    Free,
}

impl ParamState {
    /// Returns `true` for [`ParamState::Free`].
    pub fn is_free(self) -> bool {
        matches!(self, ParamState::Free)
    }
}

/// Free/frozen flags running parallel to [`DecayParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamFlags {
    /// State of the decay timescale.
    #[serde(default = "frozen")]
    pub t0: ParamState,
    /// State of the reference epoch.
    #[serde(default = "frozen")]
    pub t_ref: ParamState,
    /// State of the decay index.
    #[serde(default = "free")]
    pub t_index: ParamState,
}

fn frozen() -> ParamState {
    ParamState::Frozen
}

fn free() -> ParamState {
    ParamState::Free
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self {
            t0: frozen(),
            t_ref: frozen(),
            t_index: free(),
        }
    }
}

impl ParamFlags {
    /// Names of the parameters an optimiser may vary, in declaration order.
    pub fn free_names(&self) -> Vec<&'static str> {
        [
            ("t0", self.t0),
            ("t_ref", self.t_ref),
            ("t_index", self.t_index),
        ]
        .into_iter()
        .filter(|(_, state)| state.is_free())
        .map(|(name, _)| name)
        .collect()
    }
}
