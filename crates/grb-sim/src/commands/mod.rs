use std::error::Error;
use std::path::Path;

use grb_decay::{ModelConfig, TemporalDecayModel};

pub mod config;
pub mod eval;
pub mod integrate;
pub mod version;

/// Loads the config and builds its snapshot, optionally overriding `t_index`.
pub fn load_model(
    path: &Path,
    t_index: Option<f64>,
) -> Result<(ModelConfig, TemporalDecayModel), Box<dyn Error>> {
    let config = ModelConfig::load(path)?;
    let mut model = config.model()?;
    if let Some(t_index) = t_index {
        model = model.with_t_index(t_index)?;
    }
    Ok((config, model))
}
