use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use grb_decay::ModelConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// YAML model configuration.
    #[arg(long)]
    pub config: PathBuf,
}

pub fn run(args: &ConfigArgs) -> Result<(), Box<dyn Error>> {
    let config = ModelConfig::load(&args.config)?;
    print!("{}", config.to_yaml()?);
    Ok(())
}
