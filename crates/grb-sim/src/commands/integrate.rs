use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use grb_decay::{normalise, stable_hash_string, to_canonical_json_bytes};
use tracing::info;

use super::load_model;

#[derive(Args, Debug)]
pub struct IntegrateArgs {
    /// YAML model configuration with an observation schedule.
    #[arg(long)]
    pub config: PathBuf,
    /// Write the report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Override the configured decay index.
    #[arg(long, allow_negative_numbers = true)]
    pub t_index: Option<f64>,
}

pub fn run(args: &IntegrateArgs) -> Result<(), Box<dyn Error>> {
    let (config, model) = load_model(&args.config, args.t_index)?;
    let windows = config.windows()?;
    let mut report = normalise(&model, &windows)?;
    report.provenance.config_hash = Some(stable_hash_string(&config)?);
    report.provenance.tool_versions.insert(
        env!("CARGO_PKG_NAME").to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    let bytes = to_canonical_json_bytes(&report)?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &bytes)?;
            info!(path = %path.display(), windows = windows.len(), "wrote normalisation report");
        }
        None => println!("{}", String::from_utf8(bytes)?),
    }
    Ok(())
}
