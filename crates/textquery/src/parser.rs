//! Query parser.
//!
//! Runs the scanner and the tree builder in sequence. A [`Parser`] only holds an immutable
//! [`ParserConfig`]; every call allocates its own cursor, stack, and tree, so one parser can
//! be shared across threads.

use log::debug;

use crate::{
    builder::build,
    config::ParserConfig,
    error::QueryError,
    node::Node,
    part::Part,
    scanner::scan,
};

/// Parses query strings with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    /// Scanner configuration.
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser's configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Scans a query into parts without building a tree.
    pub fn scan(&self, query: &str) -> Result<Vec<Part>, QueryError> {
        scan(query, &self.config).map_err(|err| QueryError::new(err, query))
    }

    /// Parses a query into a tree.
    pub fn parse(&self, query: &str) -> Result<Node, QueryError> {
        let parts = self.scan(query)?;
        let count = parts.len();
        let tree = build(parts, &self.config).map_err(|err| QueryError::new(err, query))?;
        debug!(
            "parsed {query:?}: {count} parts, {} nodes, depth {}",
            tree.node_count(),
            tree.depth()
        );
        Ok(tree)
    }
}

/// Parses a query string with the default configuration.
pub fn parse(query: &str) -> Result<Node, QueryError> {
    Parser::default().parse(query)
}
