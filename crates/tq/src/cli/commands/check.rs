//! Implementation of `tq check`.

use std::process::ExitCode;

use textquery_config::{ConfigWarning, is_global_config};

use crate::cli::context::CommandContext;

/// Exit codes for `tq check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// Configuration has errors and cannot be used.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and reports issues.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("Checking configuration...");
    println!();

    if config.files.is_empty() {
        println!("No configuration files found; using defaults.");
        println!();
        println!("Run 'tq init' to create a configuration file.");
    } else {
        println!("Config files:");
        for path in &config.files {
            let scope = if is_global_config(path) { " (global)" } else { "" };
            println!("  {}{scope}", path.display());
        }
    }
    println!();

    let syntax = match config.parser_config() {
        Ok(syntax) => syntax,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_codes::ERROR;
        }
    };
    println!("Operators: {}", syntax.operators().join(", "));
    println!(
        "Groups: {}...{}",
        syntax.open_parenthesis(),
        syntax.close_parenthesis()
    );
    println!(
        "Fields: name{}modifier{}{}operator{}{}value",
        syntax.field_open_modifier(),
        syntax.field_close_modifier(),
        syntax.field_open_parenthesis(),
        syntax.field_close_parenthesis(),
        syntax.field_delimiter()
    );
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return exit_codes::OK;
    }

    println!("Warnings ({}):", warnings.len());
    for warning in &warnings {
        println!("  - {warning}");
    }
    println!();
    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|warning| match warning {
            ConfigWarning::OperatorNotUppercase { .. } => {
                "Use upper-case keywords so operators stand out from ordinary words."
            }
            ConfigWarning::SharedFirstCharacter { .. } => {
                "Prefer keywords with distinct first characters."
            }
            ConfigWarning::DuplicateOperator { .. } => "Remove repeated entries from operators.",
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
