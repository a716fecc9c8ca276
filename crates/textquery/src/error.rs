//! Error types for query scanning, tree building, and parser configuration.

use std::{error, fmt};

use thiserror::Error;

/// A failure raised while scanning or building a query tree.
///
/// Positions are byte offsets into the original query string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A field-operator or field-modifier close bracket with no matching open bracket.
    #[error("malformed field syntax in '{field}'")]
    MalformedFieldSyntax {
        /// The field-name text that could not be split.
        field: String,
        /// Byte position of the operand carrying the field.
        position: usize,
    },

    /// A close parenthesis with no open group, or a group that is never closed.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses {
        /// Byte position of the unmatched parenthesis (or end of input).
        position: usize,
    },

    /// A part the tree builder cannot classify.
    #[error("internal parse error: unexpected part '{part}'")]
    Internal {
        /// Text of the offending part.
        part: String,
        /// Byte position of the offending part.
        position: usize,
    },

    /// An operator with nothing on one of its sides.
    #[error("operator {operator} is missing an operand")]
    MissingOperand {
        /// The operator keyword.
        operator: String,
        /// Byte position of the operator.
        position: usize,
    },

    /// Two operands or groups with no operator between them.
    #[error("expected an operator before '{part}'")]
    MissingOperator {
        /// Text of the part that follows without an operator.
        part: String,
        /// Byte position of that part.
        position: usize,
    },

    /// Two different operator keywords in the same group.
    #[error("cannot mix {expected} and {found} without parentheses")]
    MixedOperators {
        /// The keyword already governing the group.
        expected: String,
        /// The conflicting keyword.
        found: String,
        /// Byte position of the conflicting keyword.
        position: usize,
    },

    /// A pair of parentheses with nothing inside.
    #[error("empty group")]
    EmptyGroup {
        /// Byte position of the open parenthesis.
        position: usize,
    },

    /// A query with no operands at all.
    #[error("empty query")]
    EmptyQuery,
}

impl ParseError {
    /// Returns the byte position the error refers to, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::MalformedFieldSyntax { position, .. }
            | Self::UnbalancedParentheses { position }
            | Self::Internal { position, .. }
            | Self::MissingOperand { position, .. }
            | Self::MissingOperator { position, .. }
            | Self::MixedOperators { position, .. }
            | Self::EmptyGroup { position } => Some(*position),
            Self::EmptyQuery => None,
        }
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MalformedFieldSyntax { .. } => {
                Some("Field qualifiers look like field:value or field[operator]:value")
            }
            Self::UnbalancedParentheses { .. } => {
                Some("Check that every opening parenthesis has a matching closing one")
            }
            Self::MixedOperators { .. } => {
                Some("Group operands with parentheses, e.g. '(a AND b) OR c'")
            }
            Self::MissingOperand { .. } => {
                Some("Operators require expressions on both sides, e.g. 'a AND b'")
            }
            _ => None,
        }
    }
}

/// A parse failure together with the query that produced it.
///
/// `Display` shows the message, the query, and a caret under the offending position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// The underlying failure.
    pub kind: ParseError,
    /// The original query string.
    pub query: String,
}

impl QueryError {
    /// Creates a query error for the given query text.
    pub fn new(kind: ParseError, query: impl Into<String>) -> Self {
        Self {
            kind,
            query: query.into(),
        }
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "query syntax error: {}", self.kind)?;
        writeln!(f, "  {}", self.query)?;
        if let Some(pos) = self.kind.position() {
            let column = self.query.char_indices().take_while(|(i, _)| *i < pos).count();
            writeln!(f, "  {}^", " ".repeat(column))?;
        }
        if let Some(suggestion) = self.kind.suggestion() {
            write!(f, "hint: {suggestion}")?;
        }
        Ok(())
    }
}

impl error::Error for QueryError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// An invalid parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No operator keywords were configured.
    #[error("at least one operator keyword is required")]
    NoOperators,

    /// An operator keyword is empty or contains whitespace.
    #[error("invalid operator keyword {0:?}")]
    InvalidOperator(String),

    /// An operator keyword contains one of the configured syntax characters.
    #[error("operator keyword {keyword:?} contains reserved character {ch:?}")]
    ReservedInOperator {
        /// The offending keyword.
        keyword: String,
        /// The reserved character it contains.
        ch: char,
    },

    /// Two syntax options share the same character.
    #[error("{first} and {second} both use {ch:?}")]
    DuplicateCharacter {
        /// Name of the first option.
        first: &'static str,
        /// Name of the second option.
        second: &'static str,
        /// The shared character.
        ch: char,
    },

    /// A syntax option uses a whitespace character.
    #[error("{option} cannot be whitespace")]
    WhitespaceCharacter {
        /// Name of the option.
        option: &'static str,
    },
}
