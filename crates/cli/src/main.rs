use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::{Command, OutputOptions, TransportOptions};
use filemgr_runtime::logging;

#[derive(Debug, Parser)]
#[command(name = "filemgr", version, about = "Touch, remove, list and inspect files through the filemgr agent")]
pub struct Cli {
    #[command(flatten)]
    pub transport: TransportOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    commands::run(cli.command.into_request(), &cli.transport, &cli.output)
}
