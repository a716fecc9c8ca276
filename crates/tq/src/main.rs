//! Command-line interface for the `tq` query parser.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use crate::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};

/// Maps the `-v` count to a default log filter.
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(log_filter(cli.verbose)))
        .init();

    let loaded = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load(cli.config.as_deref())
    };
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(&cli.command, &ctx)
}
