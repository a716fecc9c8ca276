//! Implementation of `tq parse`.

use std::process::ExitCode;

use log::debug;
use serde::Serialize;
use textquery::{Node, QueryError};

use crate::cli::{args::ParseCommand, context::CommandContext};

/// JSON output for a single query.
#[derive(Serialize)]
struct JsonParseResult<'a> {
    /// The query as given.
    query: &'a str,
    /// Parsed tree, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<Node>,
    /// Failure details, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

/// JSON form of a query syntax error.
#[derive(Serialize)]
struct JsonError {
    /// Error message without the query excerpt.
    message: String,
    /// Byte offset of the error in the query, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
    /// Suggested fix, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

impl From<&QueryError> for JsonError {
    fn from(err: &QueryError) -> Self {
        Self {
            message: err.message(),
            position: err.kind.position(),
            hint: err.kind.suggestion(),
        }
    }
}

/// Parses each query and prints its tree.
///
/// Every query is attempted; the exit code reports failure if any query was rejected.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let parser = match ctx.parser() {
        Ok(parser) => parser,
        Err(code) => return code,
    };

    let results: Vec<_> = cmd
        .queries
        .iter()
        .map(|query| (query.as_str(), parser.parse(query)))
        .collect();
    let failed = results.iter().filter(|(_, result)| result.is_err()).count();
    debug!("parsed {} queries, {failed} failed", results.len());

    if cmd.json {
        let output: Vec<JsonParseResult<'_>> = results
            .into_iter()
            .map(|(query, result)| match result {
                Ok(tree) => JsonParseResult {
                    query,
                    tree: Some(tree),
                    error: None,
                },
                Err(err) => JsonParseResult {
                    query,
                    tree: None,
                    error: Some(JsonError::from(&err)),
                },
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
        let show_headers = results.len() > 1;
        for (i, (query, result)) in results.iter().enumerate() {
            match result {
                Ok(tree) => {
                    if show_headers {
                        if i > 0 {
                            println!();
                        }
                        println!("{query}");
                    }
                    if cmd.normalize {
                        println!("{}", tree.render(parser.config()));
                    } else {
                        print!("{}", tree.render_tree(parser.config()));
                    }
                }
                Err(err) => eprintln!("{err}"),
            }
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
