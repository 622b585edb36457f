use std::fs;
use std::path::Path;

use grb_core::errors::{DecayError, ErrorInfo};
use grb_core::{DecayParams, ParamFlags};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::TemporalDecayModel;
use crate::serde::{from_yaml_slice, to_yaml_string};
use crate::window::{ObservationWindow, WindowSchedule};

/// YAML-configurable description of a decay model and its observation plan.
///
/// ```yaml
/// params:
///   t0: 1.0
///   t_ref: 0.0
///   t_index: -1.6
/// schedule:
///   type: log
///   start: 80.0
///   stop: 1000.0
///   count: 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Decay parameters, all in seconds on one epoch.
    pub params: DecayParams,
    /// Free/frozen flags forwarded to an external optimiser.
    #[serde(default)]
    pub flags: ParamFlags,
    /// Observation windows, as offsets from `t_ref`.
    #[serde(default)]
    pub schedule: WindowSchedule,
}

impl ModelConfig {
    /// Parses and validates a YAML payload.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, DecayError> {
        let config: Self = from_yaml_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn load(path: &Path) -> Result<Self, DecayError> {
        let data = fs::read(path).map_err(|err| {
            DecayError::Config(
                ErrorInfo::new("config_read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        let config = Self::from_yaml_slice(&data)?;
        debug!(path = %path.display(), "loaded model config");
        Ok(config)
    }

    /// Serializes the configuration, defaults included, back to YAML.
    pub fn to_yaml(&self) -> Result<String, DecayError> {
        to_yaml_string(self)
    }

    /// Checks the parameters and that the schedule expands cleanly.
    pub fn validate(&self) -> Result<(), DecayError> {
        self.params.validate()?;
        self.windows().map(|_| ())
    }

    /// Builds the model snapshot described by the configuration.
    pub fn model(&self) -> Result<TemporalDecayModel, DecayError> {
        TemporalDecayModel::from_params(self.params, self.flags)
    }

    /// Absolute observation windows described by the schedule.
    pub fn windows(&self) -> Result<Vec<ObservationWindow>, DecayError> {
        self.schedule.windows(self.params.t_ref)
    }
}
