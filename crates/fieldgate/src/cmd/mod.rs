use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to the gateway and run the dispatch loop.
    Run(RunArgs),
    /// Decode a single inbound frame and print it.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Gateway host to connect to.
    pub host: String,

    /// Gateway port.
    #[arg(long, short = 'p')]
    pub port: u16,

    /// Light readings below this switch the lights on.
    #[arg(long, default_value_t = 20)]
    pub light_threshold: i64,

    /// Duration of emitted LIGHT_ON commands, in seconds.
    #[arg(long, default_value_t = 2)]
    pub light_on_secs: i64,

    /// Duration of scheduled IRRIGATION_ON commands, in seconds.
    #[arg(long, default_value_t = 10)]
    pub irrigation_on_secs: i64,

    /// Loop iterations between scheduled irrigation commands.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_interval: u64,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame contents; a trailing newline is stripped if present.
    pub frame: String,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended package metadata.
    #[arg(long)]
    pub extended: bool,
}
