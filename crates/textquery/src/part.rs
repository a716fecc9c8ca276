//! Scanned query parts.
//!
//! A [`Part`] is one unit produced by the scanner: an operator keyword, a parenthesis marker,
//! or an operand word decomposed into its field qualifiers and bare value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;

/// Classification of a scanned part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    /// A group-open marker.
    OpenParen,
    /// A group-close marker.
    CloseParen,
    /// A configured operator keyword.
    Operator,
    /// An operand word.
    Operand,
}

/// One scanned unit of a query.
///
/// Absent field qualifiers are represented by empty strings. Equality compares the kind and
/// text of two parts; the source position is ignored.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Part {
    /// What kind of part this is.
    pub kind: PartKind,
    /// Operand text, operator keyword, or the parenthesis character.
    pub value: String,
    /// Field the operand is scoped to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field_name: String,
    /// Qualifier refining how the field comparison is interpreted.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field_operator: String,
    /// Additional free-form qualifier written as `field{modifier}`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field_modifier: String,
    /// Byte offset of the part in the original query.
    #[serde(skip)]
    pub position: usize,
}

impl Part {
    /// Creates an operand with no field qualifiers.
    pub fn operand(value: impl Into<String>) -> Self {
        Self::new(PartKind::Operand, value)
    }

    /// Creates an operand scoped to a field.
    pub fn field(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Self::operand(value)
        }
    }

    /// Creates an operator part.
    pub fn operator(keyword: impl Into<String>) -> Self {
        Self::new(PartKind::Operator, keyword)
    }

    /// Creates a group-open marker.
    pub fn open(ch: char) -> Self {
        Self::new(PartKind::OpenParen, ch.to_string())
    }

    /// Creates a group-close marker.
    pub fn close(ch: char) -> Self {
        Self::new(PartKind::CloseParen, ch.to_string())
    }

    /// Creates a part of the given kind with empty field qualifiers.
    fn new(kind: PartKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            field_name: String::new(),
            field_operator: String::new(),
            field_modifier: String::new(),
            position: 0,
        }
    }

    /// Sets the field operator.
    pub fn with_operator(mut self, field_operator: impl Into<String>) -> Self {
        self.field_operator = field_operator.into();
        self
    }

    /// Sets the field modifier.
    pub fn with_modifier(mut self, field_modifier: impl Into<String>) -> Self {
        self.field_modifier = field_modifier.into();
        self
    }

    /// Sets the source position.
    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Returns true for operand parts.
    pub fn is_operand(&self) -> bool {
        self.kind == PartKind::Operand
    }

    /// Returns true for operator parts.
    pub fn is_operator(&self) -> bool {
        self.kind == PartKind::Operator
    }

    /// Returns true if the operand is scoped to a field.
    pub fn has_field(&self) -> bool {
        !self.field_name.is_empty()
    }

    /// Writes the part back in query syntax using the characters of `config`.
    ///
    /// Operands keep their field qualifiers, e.g. `title{raw}[exact]:guide` with the default
    /// syntax. Other parts render as their value.
    pub fn render(&self, config: &ParserConfig) -> String {
        if !self.has_field() {
            return self.value.clone();
        }
        let mut out = self.field_name.clone();
        if !self.field_modifier.is_empty() {
            out.push(config.field_open_modifier());
            out.push_str(&self.field_modifier);
            out.push(config.field_close_modifier());
        }
        if !self.field_operator.is_empty() {
            out.push(config.field_open_parenthesis());
            out.push_str(&self.field_operator);
            out.push(config.field_close_parenthesis());
        }
        out.push(config.field_delimiter());
        out.push_str(&self.value);
        out
    }
}

impl PartialEq for Part {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.value == other.value
            && self.field_name == other.field_name
            && self.field_operator == other.field_operator
            && self.field_modifier == other.field_modifier
    }
}

/// Renders the part with the default syntax.
impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_field() {
            return f.write_str(&self.value);
        }
        f.write_str(&self.render(&ParserConfig::default()))
    }
}
