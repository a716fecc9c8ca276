//! Query scanner.
//!
//! Converts raw query text into an ordered sequence of [`Part`]s: operator keywords,
//! parenthesis markers, and operand words carrying their field qualifiers.
//!
//! Queries that are not already a single parenthesized group are scanned as if they were
//! wrapped in one pair of parentheses, so the tree builder always starts inside a group.

use log::trace;

use crate::{config::ParserConfig, error::ParseError, part::Part};

/// Left-to-right cursor over a query.
struct Scanner<'a> {
    /// The original query string.
    input: &'a str,
    /// Active configuration.
    config: &'a ParserConfig,
    /// Current byte position in input.
    position: usize,
    /// Byte position where trailing whitespace begins.
    end: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over the trimmed region of `input`.
    fn new(input: &'a str, config: &'a ParserConfig) -> Self {
        let start = input.len() - input.trim_start().len();
        Self {
            input,
            config,
            position: start,
            end: start + input.trim().len(),
        }
    }

    /// Scans the entire input, returning all parts or an error.
    fn scan(mut self) -> Result<Vec<Part>, ParseError> {
        let wrap = self.needs_wrap()?;
        let mut parts = Vec::new();

        if wrap {
            parts.push(Part::open(self.config.open_parenthesis()).at(self.position));
        }
        while let Some(part) = self.next_part()? {
            trace!("scanned {:?} {:?} at {}", part.kind, part.value, part.position);
            parts.push(part);
        }
        if wrap {
            parts.push(Part::close(self.config.close_parenthesis()).at(self.end));
        }

        Ok(parts)
    }

    /// Checks parenthesis balance and decides whether the query needs the implicit wrap.
    ///
    /// No wrap is needed when the query opens a group whose matching close is the final
    /// character. Parentheses never appear inside operands or keywords, so counting them is
    /// exact.
    fn needs_wrap(&self) -> Result<bool, ParseError> {
        let open = self.config.open_parenthesis();
        let close = self.config.close_parenthesis();
        let text = self.remaining();

        let mut single_group = text.starts_with(open) && text.ends_with(close);
        let mut opened = Vec::new();

        for (offset, ch) in text.char_indices() {
            if ch == open {
                opened.push(self.position + offset);
            } else if ch == close {
                if opened.pop().is_none() {
                    return Err(ParseError::UnbalancedParentheses {
                        position: self.position + offset,
                    });
                }
                if opened.is_empty() && offset + ch.len_utf8() < text.len() {
                    single_group = false;
                }
            }
        }

        if let Some(&position) = opened.last() {
            return Err(ParseError::UnbalancedParentheses { position });
        }

        Ok(!single_group)
    }

    /// Returns the next part, or None at end of input.
    fn next_part(&mut self) -> Result<Option<Part>, ParseError> {
        loop {
            let Some(ch) = self.peek() else {
                return Ok(None);
            };

            if let Some(keyword) = self.config.operator_at(self.remaining()) {
                let part = Part::operator(keyword).at(self.position);
                self.advance(keyword.len());
                return Ok(Some(part));
            }

            if self.config.is_parenthesis(ch) {
                let part = if ch == self.config.open_parenthesis() {
                    Part::open(ch)
                } else {
                    Part::close(ch)
                };
                let part = part.at(self.position);
                self.advance(ch.len_utf8());
                return Ok(Some(part));
            }

            // Whitespace between markers reads as an empty word; keep going.
            if let Some(part) = self.read_operand()? {
                return Ok(Some(part));
            }
        }
    }

    /// Reads an operand word up to the next parenthesis, operator keyword, or end of input.
    ///
    /// Returns None if the word is blank.
    fn read_operand(&mut self) -> Result<Option<Part>, ParseError> {
        let input = self.input;
        let start = self.position;
        let mut value_start = start;
        let mut field = None;

        while let Some(ch) = self.peek() {
            if self.at_word_end(ch) {
                break;
            }
            if ch == self.config.field_delimiter() && field.is_none() {
                field = Some(&input[start..self.position]);
                self.advance(ch.len_utf8());
                value_start = self.position;
                continue;
            }
            self.advance(ch.len_utf8());
        }

        let raw = &input[value_start..self.position];
        let value = raw.trim();
        if value.is_empty() {
            return Ok(None);
        }

        let Some(field) = field else {
            let position = value_start + leading_whitespace(raw);
            return Ok(Some(Part::operand(value).at(position)));
        };

        let position = start + leading_whitespace(field);
        let (name, operator, modifier) = self.split_field(field, position)?;
        Ok(Some(
            Part::field(name, value)
                .with_operator(operator)
                .with_modifier(modifier)
                .at(position),
        ))
    }

    /// Splits a field-name candidate into `(name, operator, modifier)`.
    ///
    /// Accepts `name`, `name[operator]`, `name{modifier}`, and `name{modifier}[operator]`.
    fn split_field<'t>(
        &self,
        field: &'t str,
        position: usize,
    ) -> Result<(&'t str, &'t str, &'t str), ParseError> {
        let malformed = || ParseError::MalformedFieldSyntax {
            field: field.trim().to_string(),
            position,
        };

        let (rest, operator) = split_qualifier(
            field.trim(),
            self.config.field_open_parenthesis(),
            self.config.field_close_parenthesis(),
        )
        .ok_or_else(malformed)?;

        let (name, modifier) = split_qualifier(
            rest.trim_end(),
            self.config.field_open_modifier(),
            self.config.field_close_modifier(),
        )
        .ok_or_else(malformed)?;

        let (name, operator, modifier) = (name.trim(), operator.trim(), modifier.trim());
        if name.is_empty() && !(operator.is_empty() && modifier.is_empty()) {
            return Err(malformed());
        }
        Ok((name, operator, modifier))
    }

    /// Checks if `ch` at the cursor ends the current word.
    fn at_word_end(&self, ch: char) -> bool {
        self.config.is_parenthesis(ch)
            || (self.config.is_terminator(ch)
                && self.config.operator_at(self.remaining()).is_some())
    }

    /// Returns the unscanned part of the trimmed input.
    fn remaining(&self) -> &'a str {
        &self.input[self.position..self.end]
    }

    /// Returns the character at the cursor.
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Advances the cursor by `bytes`.
    fn advance(&mut self, bytes: usize) {
        self.position = (self.position + bytes).min(self.end);
    }
}

/// Splits a trailing `open ... close` qualifier off `text`.
///
/// Text without the trailing close character is returned whole with an empty qualifier.
/// Returns None when the close character has no matching open character.
fn split_qualifier(text: &str, open: char, close: char) -> Option<(&str, &str)> {
    let Some(inner) = text.strip_suffix(close) else {
        return Some((text, ""));
    };
    let start = inner.rfind(open)?;
    Some((&inner[..start], &inner[start + open.len_utf8()..]))
}

/// Byte length of the leading whitespace in `text`.
fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

/// Scans a query into parts.
pub fn scan(query: &str, config: &ParserConfig) -> Result<Vec<Part>, ParseError> {
    Scanner::new(query, config).scan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::PartKind;

    fn scan_default(query: &str) -> Vec<Part> {
        scan(query, &ParserConfig::default()).unwrap()
    }

    fn kinds(parts: &[Part]) -> Vec<PartKind> {
        parts.iter().map(|part| part.kind).collect()
    }

    fn values(parts: &[Part]) -> Vec<&str> {
        parts.iter().map(|part| part.value.as_str()).collect()
    }

    #[test]
    fn wraps_bare_query() {
        let parts = scan_default("simple text");
        assert_eq!(values(&parts), ["(", "simple text", ")"]);
        assert_eq!(
            kinds(&parts),
            [PartKind::OpenParen, PartKind::Operand, PartKind::CloseParen]
        );
    }

    #[test]
    fn does_not_wrap_single_group() {
        assert_eq!(values(&scan_default("(simple text)")), ["(", "simple text", ")"]);
        assert_eq!(
            values(&scan_default("  ((a))  ")),
            ["(", "(", "a", ")", ")"]
        );
    }

    #[test]
    fn wraps_adjacent_groups() {
        assert_eq!(
            values(&scan_default("(a) OR (b)")),
            ["(", "(", "a", ")", "OR", "(", "b", ")", ")"]
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(values(&scan_default("")), ["(", ")"]);
        assert_eq!(values(&scan_default("   ")), ["(", ")"]);
    }

    #[test]
    fn operators_and_groups() {
        assert_eq!(
            values(&scan_default("(a-1 AND a-2 AND a-3) OR a-4")),
            ["(", "(", "a-1", "AND", "a-2", "AND", "a-3", ")", "OR", "a-4", ")"]
        );
    }

    #[test]
    fn operator_kinds() {
        let parts = scan_default("a OR b");
        assert_eq!(
            kinds(&parts),
            [
                PartKind::OpenParen,
                PartKind::Operand,
                PartKind::Operator,
                PartKind::Operand,
                PartKind::CloseParen
            ]
        );
    }

    #[test]
    fn operators_are_case_sensitive() {
        assert_eq!(values(&scan_default("rust or golang")), ["(", "rust or golang", ")"]);
    }

    #[test]
    fn keyword_start_without_full_match_stays_in_word() {
        assert_eq!(values(&scan_default("ANT AND Orca")), ["(", "ANT", "AND", "Orca", ")"]);
    }

    #[test]
    fn field_name() {
        let parts = scan_default("field_1:test");
        assert_eq!(parts[1], Part::field("field_1", "test"));
    }

    #[test]
    fn field_operator() {
        let parts = scan_default("field_1[exact]:test");
        assert_eq!(parts[1], Part::field("field_1", "test").with_operator("exact"));
    }

    #[test]
    fn field_modifier_and_operator() {
        let parts = scan_default("title{raw}[prefix]:gui");
        assert_eq!(
            parts[1],
            Part::field("title", "gui")
                .with_operator("prefix")
                .with_modifier("raw")
        );
    }

    #[test]
    fn field_pieces_are_trimmed() {
        let parts = scan_default("a OR  title [ exact ] :  guide ");
        assert_eq!(parts[3], Part::field("title", "guide").with_operator("exact"));
    }

    #[test]
    fn later_delimiters_belong_to_value() {
        let parts = scan_default("url:http://example.com");
        assert_eq!(parts[1], Part::field("url", "http://example.com"));
    }

    #[test]
    fn empty_value_is_discarded() {
        assert_eq!(values(&scan_default("title: AND b")), ["(", "AND", "b", ")"]);
    }

    #[test]
    fn unmatched_field_bracket() {
        let err = scan("a AND field]:x", &ParserConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedFieldSyntax {
                field: "field]".into(),
                position: 6
            }
        );
    }

    #[test]
    fn qualifiers_need_a_field_name() {
        let err = scan("[exact]:x", &ParserConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedFieldSyntax {
                field: "[exact]".into(),
                position: 0
            }
        );

        let err = scan("a OR {raw}:x", &ParserConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedFieldSyntax {
                field: "{raw}".into(),
                position: 5
            }
        );
    }

    #[test]
    fn empty_field_name_is_plain_operand() {
        let parts = scan_default(":x");
        let operand = parts.iter().find(|part| part.is_operand()).unwrap();
        assert_eq!(operand, &Part::operand("x"));
    }

    #[test]
    fn unmatched_modifier_bracket() {
        let err = scan("field}[op]:x", &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, ParseError::MalformedFieldSyntax { .. }));
    }

    #[test]
    fn positions_point_into_original_query() {
        let parts = scan_default("  a AND title:b");
        let positions: Vec<usize> = parts.iter().map(|part| part.position).collect();
        assert_eq!(positions, [2, 2, 4, 8, 15]);
    }

    #[test]
    fn unbalanced_close() {
        let err = scan("(a))", &ParserConfig::default()).unwrap_err();
        assert_eq!(err, ParseError::UnbalancedParentheses { position: 3 });

        let err = scan("a) OR (b", &ParserConfig::default()).unwrap_err();
        assert_eq!(err, ParseError::UnbalancedParentheses { position: 1 });
    }

    #[test]
    fn unbalanced_open() {
        let err = scan("(a AND (b", &ParserConfig::default()).unwrap_err();
        assert_eq!(err, ParseError::UnbalancedParentheses { position: 7 });
    }

    #[test]
    fn custom_syntax() {
        let config = ParserConfig::builder()
            .operators(["&&", "||"])
            .open_parenthesis('<')
            .close_parenthesis('>')
            .field_delimiter('=')
            .build()
            .unwrap();
        let parts = scan("<a && b> || kind=x", &config).unwrap();
        assert_eq!(
            values(&parts),
            ["<", "<", "a", "&&", "b", ">", "||", "x", ">"]
        );
        assert_eq!(parts[7], Part::field("kind", "x"));
    }

    #[test]
    fn multibyte_text() {
        assert_eq!(
            values(&scan_default("café AND naïve:über")),
            ["(", "café", "AND", "über", ")"]
        );
    }
}
