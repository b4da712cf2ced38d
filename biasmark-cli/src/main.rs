//! biasmark - bias annotation segmentation CLI
//!
//! ```bash
//! # Segment a text under model annotations
//! biasmark segment --annotations anns.json "The old guy won't get it."
//!
//! # Inline markers, offsets counted in UTF-16 units
//! biasmark segment -f post.txt -a anns.json --utf16 --format inline
//!
//! # Place the spans of a raw model reply
//! biasmark parse --response reply.txt -f post.txt
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod parser;
mod utils;

use output::error_line;
use parser::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // The library logs through `log`; try_init installs the bridge.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (operation, result) = match cli.command {
        Commands::Segment(args) => ("segment", commands::segment::run(args)),
        Commands::Parse(args) => ("parse", commands::parse::run(args)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_line(operation, &e));
            ExitCode::FAILURE
        }
    }
}
