//! Boundary checks that turn non-finite results into typed errors.

use grb_core::errors::{DecayError, ErrorInfo};
use tracing::warn;

/// A computed value together with the inputs needed to diagnose it.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    /// The computed value.
    pub value: f64,
    /// Absolute time the value was computed at.
    pub time: f64,
    /// Scaled elapsed time `(time - t_ref) / t0`.
    pub base: f64,
    /// Exponent the base was raised to.
    pub exponent: f64,
}

/// Reason a power-law evaluation left the real, finite domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainFault {
    /// Zero base raised to a negative power.
    SingularAtReference,
    /// Negative base raised to a non-integer power.
    NegativeBaseFractionalIndex,
    /// Overflow or any other non-finite outcome.
    NonFinite,
}

impl DomainFault {
    /// Classifies a non-finite result from its base and exponent.
    pub fn classify(base: f64, exponent: f64) -> Self {
        if base == 0.0 && exponent < 0.0 {
            DomainFault::SingularAtReference
        } else if base < 0.0 && exponent.fract() != 0.0 {
            DomainFault::NegativeBaseFractionalIndex
        } else {
            DomainFault::NonFinite
        }
    }

    /// Stable error code for the fault.
    pub fn code(self) -> &'static str {
        match self {
            DomainFault::SingularAtReference => "singular_at_reference",
            DomainFault::NegativeBaseFractionalIndex => "negative_base_fractional_index",
            DomainFault::NonFinite => "non_finite",
        }
    }

    fn message(self) -> &'static str {
        match self {
            DomainFault::SingularAtReference => {
                "time equals the reference epoch and the exponent is negative"
            }
            DomainFault::NegativeBaseFractionalIndex => {
                "time precedes the reference epoch and the exponent is not an integer"
            }
            DomainFault::NonFinite => "decay factor is not finite",
        }
    }

    fn hint(self) -> Option<&'static str> {
        match self {
            DomainFault::SingularAtReference | DomainFault::NegativeBaseFractionalIndex => {
                Some("evaluation times must be strictly after t_ref")
            }
            DomainFault::NonFinite => None,
        }
    }
}

/// Passes finite values through and reports everything else as
/// [`DecayError::Domain`].
pub fn check_finite(eval: Evaluation) -> Result<f64, DecayError> {
    if eval.value.is_finite() {
        return Ok(eval.value);
    }
    let fault = DomainFault::classify(eval.base, eval.exponent);
    warn!(
        time = eval.time,
        base = eval.base,
        exponent = eval.exponent,
        value = eval.value,
        code = fault.code(),
        "decay factor left the finite domain"
    );
    let mut info = ErrorInfo::new(fault.code(), fault.message())
        .with_context("time", eval.time)
        .with_context("base", eval.base)
        .with_context("exponent", eval.exponent)
        .with_context("value", eval.value);
    if let Some(hint) = fault.hint() {
        info = info.with_hint(hint);
    }
    Err(DecayError::Domain(info))
}

/// Error for a window that spans `t_ref` while the integrand has a
/// non-integrable pole there (`t_index <= -1`).
pub fn divergent_crossing(t_min: f64, t_max: f64, t_index: f64) -> DecayError {
    let fault = DomainFault::SingularAtReference;
    warn!(t_min, t_max, t_index, code = fault.code(), "window spans the pole at t_ref");
    DecayError::Domain(
        ErrorInfo::new(
            fault.code(),
            "window spans the reference epoch where the integral diverges",
        )
        .with_context("t_min", t_min)
        .with_context("t_max", t_max)
        .with_context("t_index", t_index)
        .with_hint("observation windows must start after t_ref"),
    )
}
