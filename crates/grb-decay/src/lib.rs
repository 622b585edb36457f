#![deny(missing_docs)]
#![doc = "Power-law temporal decay model for gamma-ray-burst afterglows: pointwise evaluation, closed-form time-averaged integrals over observation windows, and per-window normalisation reports."]

/// Order-preserving batch evaluation, parallel for large inputs.
pub mod batch;
/// YAML model configuration.
pub mod config;
/// Canonical hashing helpers.
pub mod hash;
/// Decay function and model snapshot.
pub mod model;
/// Per-window normalisation reports.
pub mod report;
/// Canonical JSON and YAML serde helpers.
pub mod serde;
pub mod validate;
/// Observation windows and window schedules.
pub mod window;

pub use batch::{evaluate_many, PARALLEL_THRESHOLD};
pub use config::ModelConfig;
pub use crate::serde::{from_json_slice, to_canonical_json_bytes};
pub use grb_core::{DecayError, DecayParams, ErrorInfo, ParamFlags, ParamState};
pub use hash::stable_hash_string;
pub use model::{evaluate, evaluate_raw, TemporalDecayModel};
pub use report::{normalise, NormalisationReport, WindowNorm, REPORT_SCHEMA};
pub use validate::{check_finite, divergent_crossing, DomainFault, Evaluation};
pub use window::{ObservationWindow, WindowSchedule, MAX_SCHEDULE_WINDOWS};
