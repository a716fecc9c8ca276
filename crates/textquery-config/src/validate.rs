//! Configuration validation.
//!
//! Reports settings that the parser accepts but that are likely to surprise. Settings the
//! parser rejects outright surface as errors from [`Config::parser_config`](crate::Config).

use std::fmt;

use crate::ParserSettings;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// An operator keyword contains lower-case letters.
    ///
    /// Keywords match anywhere in the query, so lower-case keywords split ordinary words.
    OperatorNotUppercase {
        /// The keyword.
        keyword: String,
    },
    /// Two operator keywords start with the same character.
    SharedFirstCharacter {
        /// The keyword listed first.
        first: String,
        /// The keyword listed second.
        second: String,
    },
    /// A keyword is listed more than once.
    DuplicateOperator {
        /// The repeated keyword.
        keyword: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperatorNotUppercase { keyword } => {
                write!(
                    f,
                    "operator '{keyword}' is not upper case and will match inside ordinary words"
                )
            }
            Self::SharedFirstCharacter { first, second } => {
                write!(
                    f,
                    "operators '{first}' and '{second}' start with the same character; the longer one wins"
                )
            }
            Self::DuplicateOperator { keyword } => {
                write!(f, "operator '{keyword}' is listed more than once")
            }
        }
    }
}

/// Validates the parser settings and returns any warnings.
pub fn validate_parser(settings: &ParserSettings) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let operators = &settings.operators;

    for (i, keyword) in operators.iter().enumerate() {
        if operators[..i].contains(keyword) {
            warnings.push(ConfigWarning::DuplicateOperator {
                keyword: keyword.clone(),
            });
            continue;
        }
        if keyword.chars().any(char::is_lowercase) {
            warnings.push(ConfigWarning::OperatorNotUppercase {
                keyword: keyword.clone(),
            });
        }
        let first_char = keyword.chars().next();
        if let Some(earlier) = operators[..i]
            .iter()
            .find(|other| *other != keyword && other.chars().next() == first_char)
        {
            warnings.push(ConfigWarning::SharedFirstCharacter {
                first: earlier.clone(),
                second: keyword.clone(),
            });
        }
    }

    warnings
}
