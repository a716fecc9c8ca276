//! Parser configuration.
//!
//! A [`ParserConfig`] fixes the operator vocabulary and the syntax characters used by the
//! scanner. It is validated once at construction and never mutated afterwards, so a single
//! configuration can be shared by any number of concurrent parses.

use std::collections::{HashMap, HashSet};

use crate::error::ConfigError;

/// Operator keywords recognized by default.
pub const DEFAULT_OPERATORS: &[&str] = &["AND", "OR"];

/// Immutable scanner configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Operator keywords in the order they were configured.
    operators: Vec<String>,
    /// Group-open marker.
    open_parenthesis: char,
    /// Group-close marker.
    close_parenthesis: char,
    /// Separates a field name from its value.
    field_delimiter: char,
    /// Begins an inline field-operator qualifier.
    field_open_parenthesis: char,
    /// Ends an inline field-operator qualifier.
    field_close_parenthesis: char,
    /// Begins an inline field-modifier qualifier.
    field_open_modifier: char,
    /// Ends an inline field-modifier qualifier.
    field_close_modifier: char,
    /// Operator keywords keyed by first character, longest first.
    index: HashMap<char, Vec<String>>,
    /// Characters that end an operand word: operator starts and both parentheses.
    terminators: HashSet<char>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfigBuilder::default()
            .build()
            .expect("default parser configuration is valid")
    }
}

impl PartialEq for ParserConfig {
    fn eq(&self, other: &Self) -> bool {
        self.operators == other.operators
            && self.open_parenthesis == other.open_parenthesis
            && self.close_parenthesis == other.close_parenthesis
            && self.field_delimiter == other.field_delimiter
            && self.field_open_parenthesis == other.field_open_parenthesis
            && self.field_close_parenthesis == other.field_close_parenthesis
            && self.field_open_modifier == other.field_open_modifier
            && self.field_close_modifier == other.field_close_modifier
    }
}

impl ParserConfig {
    /// Starts building a configuration from the defaults.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    /// Returns a builder seeded with this configuration's options.
    pub fn to_builder(&self) -> ParserConfigBuilder {
        ParserConfigBuilder {
            operators: self.operators.clone(),
            open_parenthesis: self.open_parenthesis,
            close_parenthesis: self.close_parenthesis,
            field_delimiter: self.field_delimiter,
            field_open_parenthesis: self.field_open_parenthesis,
            field_close_parenthesis: self.field_close_parenthesis,
            field_open_modifier: self.field_open_modifier,
            field_close_modifier: self.field_close_modifier,
        }
    }

    /// Configured operator keywords.
    pub fn operators(&self) -> &[String] {
        &self.operators
    }

    /// Group-open marker.
    pub fn open_parenthesis(&self) -> char {
        self.open_parenthesis
    }

    /// Group-close marker.
    pub fn close_parenthesis(&self) -> char {
        self.close_parenthesis
    }

    /// Field name / value separator.
    pub fn field_delimiter(&self) -> char {
        self.field_delimiter
    }

    /// Field-operator open bracket.
    pub fn field_open_parenthesis(&self) -> char {
        self.field_open_parenthesis
    }

    /// Field-operator close bracket.
    pub fn field_close_parenthesis(&self) -> char {
        self.field_close_parenthesis
    }

    /// Field-modifier open bracket.
    pub fn field_open_modifier(&self) -> char {
        self.field_open_modifier
    }

    /// Field-modifier close bracket.
    pub fn field_close_modifier(&self) -> char {
        self.field_close_modifier
    }

    /// Returns true if `keyword` is one of the configured operators.
    pub fn is_operator(&self, keyword: &str) -> bool {
        self.operators.iter().any(|op| op == keyword)
    }

    /// Returns the operator keyword that `text` starts with, if any.
    ///
    /// Candidates are looked up by first character and verified against the full keyword.
    /// When several keywords share a first character the longest match wins.
    pub fn operator_at<'a>(&'a self, text: &str) -> Option<&'a str> {
        let first = text.chars().next()?;
        self.index
            .get(&first)?
            .iter()
            .find(|keyword| text.starts_with(keyword.as_str()))
            .map(String::as_str)
    }

    /// Returns true if `ch` may end an operand word.
    ///
    /// This is a cheap pre-check: an operator start still has to be verified with
    /// [`Self::operator_at`].
    pub fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }

    /// Returns true if `ch` is either parenthesis marker.
    pub fn is_parenthesis(&self, ch: char) -> bool {
        ch == self.open_parenthesis || ch == self.close_parenthesis
    }

    /// Returns the syntax characters with their option names.
    fn syntax_chars(&self) -> [(&'static str, char); 7] {
        [
            ("open_parenthesis", self.open_parenthesis),
            ("close_parenthesis", self.close_parenthesis),
            ("field_delimiter", self.field_delimiter),
            ("field_open_parenthesis", self.field_open_parenthesis),
            ("field_close_parenthesis", self.field_close_parenthesis),
            ("field_open_modifier", self.field_open_modifier),
            ("field_close_modifier", self.field_close_modifier),
        ]
    }

    /// Checks the options for conflicts.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.operators.is_empty() {
            return Err(ConfigError::NoOperators);
        }

        let syntax = self.syntax_chars();
        for (i, &(first, ch)) in syntax.iter().enumerate() {
            if ch.is_whitespace() {
                return Err(ConfigError::WhitespaceCharacter { option: first });
            }
            if let Some(&(second, _)) = syntax[i + 1..].iter().find(|(_, other)| *other == ch) {
                return Err(ConfigError::DuplicateCharacter { first, second, ch });
            }
        }

        for keyword in &self.operators {
            if keyword.is_empty() || keyword.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidOperator(keyword.clone()));
            }
            if let Some(&(_, ch)) = syntax.iter().find(|(_, ch)| keyword.contains(*ch)) {
                return Err(ConfigError::ReservedInOperator {
                    keyword: keyword.clone(),
                    ch,
                });
            }
        }

        Ok(())
    }

    /// Computes the derived lookup tables.
    fn index_operators(&mut self) {
        let mut index: HashMap<char, Vec<String>> = HashMap::new();
        for keyword in &self.operators {
            if let Some(first) = keyword.chars().next() {
                let entry = index.entry(first).or_default();
                if !entry.contains(keyword) {
                    entry.push(keyword.clone());
                }
            }
        }
        for keywords in index.values_mut() {
            keywords.sort_by(|a, b| b.len().cmp(&a.len()));
        }

        let mut terminators: HashSet<char> = index.keys().copied().collect();
        terminators.insert(self.open_parenthesis);
        terminators.insert(self.close_parenthesis);

        self.index = index;
        self.terminators = terminators;
    }
}

/// Builder for [`ParserConfig`].
#[derive(Debug, Clone)]
pub struct ParserConfigBuilder {
    /// Operator keywords.
    operators: Vec<String>,
    /// Group-open marker.
    open_parenthesis: char,
    /// Group-close marker.
    close_parenthesis: char,
    /// Field name / value separator.
    field_delimiter: char,
    /// Field-operator open bracket.
    field_open_parenthesis: char,
    /// Field-operator close bracket.
    field_close_parenthesis: char,
    /// Field-modifier open bracket.
    field_open_modifier: char,
    /// Field-modifier close bracket.
    field_close_modifier: char,
}

impl Default for ParserConfigBuilder {
    fn default() -> Self {
        Self {
            operators: DEFAULT_OPERATORS.iter().map(|s| s.to_string()).collect(),
            open_parenthesis: '(',
            close_parenthesis: ')',
            field_delimiter: ':',
            field_open_parenthesis: '[',
            field_close_parenthesis: ']',
            field_open_modifier: '{',
            field_close_modifier: '}',
        }
    }
}

impl ParserConfigBuilder {
    /// Replaces the operator vocabulary.
    pub fn operators<I, S>(mut self, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operators = operators.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the group-open marker.
    pub fn open_parenthesis(mut self, ch: char) -> Self {
        self.open_parenthesis = ch;
        self
    }

    /// Sets the group-close marker.
    pub fn close_parenthesis(mut self, ch: char) -> Self {
        self.close_parenthesis = ch;
        self
    }

    /// Sets the field name / value separator.
    pub fn field_delimiter(mut self, ch: char) -> Self {
        self.field_delimiter = ch;
        self
    }

    /// Sets the field-operator open bracket.
    pub fn field_open_parenthesis(mut self, ch: char) -> Self {
        self.field_open_parenthesis = ch;
        self
    }

    /// Sets the field-operator close bracket.
    pub fn field_close_parenthesis(mut self, ch: char) -> Self {
        self.field_close_parenthesis = ch;
        self
    }

    /// Sets the field-modifier open bracket.
    pub fn field_open_modifier(mut self, ch: char) -> Self {
        self.field_open_modifier = ch;
        self
    }

    /// Sets the field-modifier close bracket.
    pub fn field_close_modifier(mut self, ch: char) -> Self {
        self.field_close_modifier = ch;
        self
    }

    /// Validates the options and computes the lookup tables.
    pub fn build(self) -> Result<ParserConfig, ConfigError> {
        let mut config = ParserConfig {
            operators: self.operators,
            open_parenthesis: self.open_parenthesis,
            close_parenthesis: self.close_parenthesis,
            field_delimiter: self.field_delimiter,
            field_open_parenthesis: self.field_open_parenthesis,
            field_close_parenthesis: self.field_close_parenthesis,
            field_open_modifier: self.field_open_modifier,
            field_close_modifier: self.field_close_modifier,
            index: HashMap::new(),
            terminators: HashSet::new(),
        };
        config.validate()?;
        config.index_operators();
        Ok(config)
    }
}
