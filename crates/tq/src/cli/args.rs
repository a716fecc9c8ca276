//! Clap argument definitions for the `tq` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "tq")]
#[command(about = "Parse boolean search queries into trees")]
pub struct Cli {
    /// Verbosity level (-v for debug logging, -vv for trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this configuration file instead of discovering .textquery.toml files
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `tq parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Queries to parse
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Print each tree back as a normalized query string
    #[arg(long, conflicts_with = "json")]
    pub normalize: bool,
}

/// Arguments for `tq scan`.
#[derive(Args, Debug, Clone)]
pub struct ScanCommand {
    /// Query to scan
    pub query: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.textquery.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `tq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse queries and print their trees
    #[command(after_help = "\
QUERY SYNTAX:
  simple text               Free text operand
  a AND b AND c             One operator, any number of operands
  (a AND b) OR c            Parentheses combine different operators
  title:guide               Field-scoped operand
  title[exact]:guide        Field with comparison operator
  title{raw}[exact]:guide   Field with modifier and operator")]
    Parse(ParseCommand),

    /// Print the parts a query is split into
    Scan(ScanCommand),

    /// Initialize configuration in the current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and report issues
    Check,
}
