use grb_core::errors::DecayError;
use grb_core::{DecayParams, ParamFlags, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::batch::{first_error, map_indexed};
use crate::hash::stable_hash_string;
use crate::model::TemporalDecayModel;
use crate::window::ObservationWindow;

/// Schema version of [`NormalisationReport`] payloads.
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Time-averaged normalisation for a single observation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowNorm {
    /// Window start.
    pub t_min: f64,
    /// Window stop.
    pub t_max: f64,
    /// Window duration.
    pub duration: f64,
    /// Mean decay factor over the window.
    pub norm: f64,
    /// Decay factor at `t_min`, absent when it is not finite.
    pub f_start: Option<f64>,
    /// Decay factor at `t_max`, absent when it is not finite.
    pub f_end: Option<f64>,
    /// Whether `norm` lies between the two endpoint values.
    pub bracketed: bool,
}

/// Per-window normalisation factors for one parameter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalisationReport {
    /// Payload schema version.
    pub schema_version: SchemaVersion,
    /// Tools that produced the report.
    pub provenance: RunProvenance,
    /// Parameter snapshot the factors were computed with.
    pub params: DecayParams,
    /// Free/frozen flags of the snapshot.
    pub flags: ParamFlags,
    /// One entry per window, in input order.
    pub windows: Vec<WindowNorm>,
    /// SHA-256 of the canonical parameters, flags and window entries.
    pub digest: String,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn bracketed(norm: f64, f_start: Option<f64>, f_end: Option<f64>) -> bool {
    match (f_start, f_end) {
        (Some(a), Some(b)) => {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            // Relative slack for the closed-form cancellation in F(t_max) - F(t_min).
            let slack = 1e-12 * hi.abs().max(lo.abs());
            norm >= lo - slack && norm <= hi + slack
        }
        _ => false,
    }
}

/// Computes the mean normalisation of every window for one model snapshot.
pub fn normalise(
    model: &TemporalDecayModel,
    windows: &[ObservationWindow],
) -> Result<NormalisationReport, DecayError> {
    let results = map_indexed(windows.len(), |i| -> Result<WindowNorm, DecayError> {
        let window = &windows[i];
        let norm = model.integral_window(window)?;
        let f_start = finite(model.evaluate(window.t_min));
        let f_end = finite(model.evaluate(window.t_max));
        Ok(WindowNorm {
            t_min: window.t_min,
            t_max: window.t_max,
            duration: window.duration(),
            norm,
            f_start,
            f_end,
            bracketed: bracketed(norm, f_start, f_end),
        })
    });
    let entries = first_error(results)?;

    let unbracketed = entries
        .iter()
        .filter(|entry| entry.f_start.is_some() && entry.f_end.is_some() && !entry.bracketed)
        .count();
    if unbracketed > 0 {
        warn!(unbracketed, "normalisation outside endpoint values");
    }

    let params = *model.params();
    let flags = *model.flags();
    let digest = stable_hash_string(&(&params, &flags, &entries))?;
    debug!(windows = entries.len(), %digest, "normalisation report");
    Ok(NormalisationReport {
        schema_version: REPORT_SCHEMA,
        provenance: RunProvenance::for_tool(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        params,
        flags,
        windows: entries,
        digest,
    })
}
