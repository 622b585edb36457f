use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::load_model;

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// YAML model configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Times to evaluate at, in seconds on the same epoch as `t_ref`.
    #[arg(long = "time", required = true, num_args = 1.., allow_negative_numbers = true)]
    pub times: Vec<f64>,
    /// Interpret times as elapsed seconds since `t_ref`.
    #[arg(long)]
    pub elapsed: bool,
    /// Fail on non-finite values instead of printing `null`.
    #[arg(long)]
    pub checked: bool,
    /// Override the configured decay index.
    #[arg(long, allow_negative_numbers = true)]
    pub t_index: Option<f64>,
}

#[derive(Debug, Serialize)]
struct Sample {
    time: f64,
    value: Option<f64>,
}

pub fn run(args: &EvalArgs) -> Result<(), Box<dyn Error>> {
    let (_, model) = load_model(&args.config, args.t_index)?;
    let offset = if args.elapsed {
        model.params().t_ref
    } else {
        0.0
    };
    let times: Vec<f64> = args.times.iter().map(|t| t + offset).collect();
    let values = if args.checked {
        model.evaluate_many_checked(&times)?
    } else {
        grb_decay::evaluate_many(&times, model.params())
    };
    let samples: Vec<Sample> = times
        .iter()
        .zip(values)
        .map(|(&time, value)| Sample {
            time,
            value: value.is_finite().then_some(value),
        })
        .collect();
    println!("{}", serde_json::to_string(&samples)?);
    Ok(())
}
