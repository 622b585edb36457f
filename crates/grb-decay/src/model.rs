use grb_core::errors::{DecayError, ErrorInfo};
use grb_core::{DecayParams, ParamFlags};
use serde::Serialize;
use tracing::trace;

use crate::validate::{check_finite, divergent_crossing, Evaluation};
use crate::window::ObservationWindow;

/// Evaluates `((time - t_ref) / t0) ^ t_index` from its four scalars.
///
/// No validation is performed. At `time == t_ref` with a negative index the
/// result is `+inf`; for `time < t_ref` with a non-integer index it is `NaN`.
/// Use [`TemporalDecayModel::evaluate_checked`] to turn these into errors.
pub fn evaluate_raw(time: f64, t0: f64, t_ref: f64, t_index: f64) -> f64 {
    ((time - t_ref) / t0).powf(t_index)
}

/// Evaluates the decay factor at `time` for the given parameter set.
pub fn evaluate(time: f64, params: &DecayParams) -> f64 {
    evaluate_raw(time, params.t0, params.t_ref, params.t_index)
}

/// Power-law temporal decay model holding one immutable parameter snapshot.
///
/// Times passed to any method are seconds on the same epoch as `t_ref`.
/// Fitting loops derive a new snapshot per iteration with
/// [`TemporalDecayModel::with_t_index`] instead of mutating shared state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemporalDecayModel {
    params: DecayParams,
    flags: ParamFlags,
}

impl TemporalDecayModel {
    /// Creates a validated model with the default free/frozen flags.
    pub fn new(t0: f64, t_ref: f64, t_index: f64) -> Result<Self, DecayError> {
        Self::from_params(DecayParams::new(t0, t_ref, t_index)?, ParamFlags::default())
    }

    /// Creates a model from an existing parameter set and flags.
    pub fn from_params(params: DecayParams, flags: ParamFlags) -> Result<Self, DecayError> {
        params.validate()?;
        Ok(Self { params, flags })
    }

    /// Current parameter snapshot.
    pub fn params(&self) -> &DecayParams {
        &self.params
    }

    /// Free/frozen flags exposed to an external optimiser.
    pub fn flags(&self) -> &ParamFlags {
        &self.flags
    }

    /// Returns a new snapshot with a different decay index.
    pub fn with_t_index(&self, t_index: f64) -> Result<Self, DecayError> {
        self.with_params(DecayParams {
            t_index,
            ..self.params
        })
    }

    /// Returns a new snapshot with an entirely new parameter set.
    pub fn with_params(&self, params: DecayParams) -> Result<Self, DecayError> {
        Self::from_params(params, self.flags)
    }

    /// Unchecked pointwise evaluation; see [`evaluate_raw`].
    pub fn evaluate(&self, time: f64) -> f64 {
        evaluate(time, &self.params)
    }

    /// Pointwise evaluation that rejects non-finite results.
    pub fn evaluate_checked(&self, time: f64) -> Result<f64, DecayError> {
        let value = self.evaluate(time);
        check_finite(Evaluation {
            value,
            time,
            base: self.params.scaled_elapsed(time),
            exponent: self.params.t_index,
        })
    }

    /// Partial derivative of the decay factor with respect to `t_index`.
    pub fn d_index(&self, time: f64) -> Result<f64, DecayError> {
        let base = self.params.scaled_elapsed(time);
        if base == 0.0 && self.params.t_index > 0.0 {
            // f(t_ref) == 0 and f·ln(base) -> 0 as the base vanishes.
            return Ok(0.0);
        }
        let value = self.evaluate(time) * base.ln();
        check_finite(Evaluation {
            value,
            time,
            base,
            exponent: self.params.t_index,
        })
    }

    /// Definite integral of the decay factor over `[t_min, t_max]`.
    pub fn integral_raw(&self, t_min: f64, t_max: f64) -> Result<f64, DecayError> {
        let p = self.shifted_exponent()?;
        check_interval(t_min, t_max)?;
        let DecayParams { t0, t_ref, .. } = self.params;
        let upper = evaluate_raw(t_max, t0, t_ref, p);
        let lower = evaluate_raw(t_min, t0, t_ref, p);
        let raw = (t0 / p) * (upper - lower);
        trace!(t_min, t_max, p, upper, lower, raw, "definite integral");
        if raw.is_finite() {
            // Finite endpoints on both sides of t_ref still hide a non-integrable pole.
            let spans_reference = self.params.scaled_elapsed(t_min) < 0.0
                && self.params.scaled_elapsed(t_max) > 0.0;
            if p < 0.0 && spans_reference {
                return Err(divergent_crossing(t_min, t_max, self.params.t_index));
            }
            return Ok(raw);
        }
        // Report against whichever endpoint broke the antiderivative.
        let culprit = if lower.is_finite() { t_max } else { t_min };
        check_finite(Evaluation {
            value: raw,
            time: culprit,
            base: self.params.scaled_elapsed(culprit),
            exponent: p,
        })
    }

    /// Time-averaged value of the decay factor over `[t_min, t_max]`.
    ///
    /// This is the mean flux normalisation applicable to an observation
    /// window. Fails when `t_index == -1`, when `t_max <= t_min`, and when the
    /// window touches a singular or undefined region of the power law.
    pub fn integral(&self, t_min: f64, t_max: f64) -> Result<f64, DecayError> {
        let raw = self.integral_raw(t_min, t_max)?;
        let norm = raw / (t_max - t_min);
        check_finite(Evaluation {
            value: norm,
            time: t_min,
            base: self.params.scaled_elapsed(t_min),
            exponent: self.params.t_index + 1.0,
        })
    }

    /// Time-averaged value over an observation window.
    pub fn integral_window(&self, window: &ObservationWindow) -> Result<f64, DecayError> {
        self.integral(window.t_min, window.t_max)
            .map_err(|err| err.with_context("window", window))
    }

    fn shifted_exponent(&self) -> Result<f64, DecayError> {
        let p = self.params.t_index + 1.0;
        if p == 0.0 {
            return Err(DecayError::DegenerateExponent(
                ErrorInfo::new(
                    "index_minus_one",
                    "t_index + 1 is zero; the power-law antiderivative is logarithmic",
                )
                .with_context("t_index", self.params.t_index)
                .with_hint("this model has no closed form for t_index = -1"),
            ));
        }
        Ok(p)
    }
}

/// Rejects non-finite, empty and inverted intervals.
pub(crate) fn check_interval(t_min: f64, t_max: f64) -> Result<(), DecayError> {
    let invalid = |code: &str, message: &str| {
        DecayError::InvalidInterval(
            ErrorInfo::new(code, message)
                .with_context("t_min", t_min)
                .with_context("t_max", t_max),
        )
    };
    if !t_min.is_finite() || !t_max.is_finite() {
        return Err(invalid("non_finite_bound", "interval bounds must be finite"));
    }
    if t_max == t_min {
        return Err(invalid(
            "empty_interval",
            "interval has zero duration; the time average is undefined",
        ));
    }
    if t_max < t_min {
        return Err(invalid("inverted_interval", "t_max must exceed t_min"));
    }
    Ok(())
}
