//! Implementation of `tq init`.

use std::{fs, process::ExitCode};

use textquery_config::{CONFIG_FILENAME, config_template, global_config_path};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Writes a commented-out `.textquery.toml` template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let config_path = if cmd.global {
        match global_config_path() {
            Some(path) => path,
            None => {
                eprintln!("error: could not determine home directory");
                return ExitCode::FAILURE;
            }
        }
    } else {
        ctx.cwd.join(CONFIG_FILENAME)
    };

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    if let Err(e) = fs::write(&config_path, config_template()) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", config_path.display());
    ExitCode::SUCCESS
}
