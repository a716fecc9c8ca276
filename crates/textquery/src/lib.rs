//! Boolean search query parsing.
//!
//! This crate parses a small query language into a tree suitable for translation into a
//! search-engine or database filter:
//!
//! - **Operands**: `simple text` - free text up to the next operator or parenthesis
//! - **Operators**: `a AND b`, `a OR b` - configurable keywords
//! - **Grouping**: `(a AND b) OR c` - the only way to combine different operators
//! - **Fields**: `title:guide` - scope an operand to a field
//! - **Field operators**: `title[exact]:guide` - refine the field comparison
//! - **Field modifiers**: `title{raw}[exact]:guide` - extra free-form qualifier
//!
//! Repeating one operator inside a group yields a single node with one child per operand:
//! `a AND b AND c` is one AND node with three children, not a nested chain.
//!
//! # Example
//!
//! ```
//! use textquery::parse;
//!
//! let tree = parse("(a-1 AND a-2 AND a-3) OR title[exact]:a-4").unwrap();
//! assert_eq!(tree.value(), "OR");
//! assert_eq!(tree.children()[0].children().len(), 3);
//! assert_eq!(tree.children()[1].key().field_operator, "exact");
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod node;
mod parser;
mod part;
mod scanner;

pub use builder::{TreeBuilder, build};
pub use config::{DEFAULT_OPERATORS, ParserConfig, ParserConfigBuilder};
pub use error::{ConfigError, ParseError, QueryError};
pub use node::{Leaves, Node};
pub use parser::{Parser, parse};
pub use part::{Part, PartKind};
pub use scanner::scan;
