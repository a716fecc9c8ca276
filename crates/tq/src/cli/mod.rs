//! CLI support for the `tq` binary.

pub mod args;
pub mod commands;
pub mod context;

pub use context::CommandContext;
