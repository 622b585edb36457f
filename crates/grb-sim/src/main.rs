use std::error::Error;
use std::io::stderr;

use clap::{Parser, Subcommand};
use commands::{
    config::{self, ConfigArgs},
    eval::{self, EvalArgs},
    integrate::{self, IntegrateArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "grb-sim", about = "GRB temporal decay model CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate the decay factor at one or more times.
    Eval(EvalArgs),
    /// Compute the mean normalisation of every scheduled observation window.
    Integrate(IntegrateArgs),
    /// Print the effective configuration with defaults filled in.
    Config(ConfigArgs),
    /// Print version information.
    Version(VersionArgs),
}

/// Logs go to stderr so stdout stays machine readable.
/// Filter comes from `GRB_LOG`, falling back to `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("GRB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Eval(args) => eval::run(&args),
        Command::Integrate(args) => integrate::run(&args),
        Command::Config(args) => config::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
