//! Implementation of `tq scan`.

use std::process::ExitCode;

use serde::Serialize;
use textquery::{Part, PartKind};

use crate::cli::{args::ScanCommand, context::CommandContext};

/// JSON form of a scanned part, including its source position.
#[derive(Serialize)]
struct JsonPart<'a> {
    /// Byte offset of the part in the scanned text.
    position: usize,
    /// The part itself.
    #[serde(flatten)]
    part: &'a Part,
}

/// Returns a short label for a part kind.
fn kind_label(kind: PartKind) -> &'static str {
    match kind {
        PartKind::OpenParen => "open",
        PartKind::CloseParen => "close",
        PartKind::Operator => "operator",
        PartKind::Operand => "operand",
    }
}

/// Scans a query and prints its parts, one per line.
pub fn run(ctx: &CommandContext, cmd: &ScanCommand) -> ExitCode {
    let parser = match ctx.parser() {
        Ok(parser) => parser,
        Err(code) => return code,
    };

    let parts = match parser.scan(&cmd.query) {
        Ok(parts) => parts,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        let output: Vec<_> = parts
            .iter()
            .map(|part| JsonPart {
                position: part.position,
                part,
            })
            .collect();
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize output: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let config = parser.config();
        for part in &parts {
            println!(
                "{:>4}  {:<8}  {}",
                part.position,
                kind_label(part.kind),
                part.render(config)
            );
        }
    }

    ExitCode::SUCCESS
}
