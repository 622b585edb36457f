#![deny(missing_docs)]
#![doc = "Core types for the GRB temporal decay model: parameter records, error taxonomy and report provenance."]

pub mod errors;
/// Decay parameters and free/frozen flags.
pub mod params;
pub mod provenance;

pub use errors::{DecayError, ErrorInfo};
pub use params::{DecayParams, ParamFlags, ParamState};
pub use provenance::{RunProvenance, SchemaVersion};
