//! Main execution logic: parse arguments and dispatch to the subcommand

use clap::Parser;
use tracing::info;

use crate::assemble;
use crate::cli::{Args, Command};
use crate::enhance;
use crate::errors::Result;
use crate::scaffold;
use crate::status::ExitStatus;

/// Parse arguments and run the selected subcommand, mapping errors to an
/// exit status
pub fn run() -> ExitStatus {
    let args = Args::parse();

    match dispatch(&args) {
        Ok(()) => ExitStatus::Success,
        Err(e) => {
            eprintln!("postforge: error: {}", e);
            ExitStatus::Error
        }
    }
}

fn dispatch(args: &Args) -> Result<()> {
    match &args.command {
        Command::FromCurl => assemble::curls::run(&args.collections_dir, &args.output_dir),
        Command::Combine => assemble::combine::run(&args.collections_dir, &args.output_dir),
        Command::Scaffold { priority } => {
            let created = scaffold::run(&args.collections_dir, *priority)?;
            info!(created, "scaffolding complete");
            Ok(())
        }
        Command::Enhance => enhance::run(&args.collections_dir),
    }
}
