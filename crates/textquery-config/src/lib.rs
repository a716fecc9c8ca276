//! Configuration files for textquery parsers.
//!
//! Parser syntax is configured with TOML files named `.textquery.toml`. Configuration is
//! resolved by walking up the directory tree from the current working directory, collecting
//! any `.textquery.toml` files found, then loading `~/.textquery.toml` as the global config
//! with lowest precedence.
//!
//! ```toml
//! [parser]
//! operators = ["AND", "OR", "NOT"]
//! open_parenthesis = "<"
//! close_parenthesis = ">"
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawParserSettings, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
pub use templates::config_template;
use textquery::{Parser, ParserConfig};
pub use validate::ConfigWarning;
use validate::validate_parser;

/// Merged configuration.
///
/// The fully resolved result of merging every discovered `.textquery.toml` file according to
/// precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parser syntax settings.
    pub parser: ParserSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Files that contributed to this configuration, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.textquery.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Builds the parser configuration described by these settings.
    pub fn parser_config(&self) -> Result<ParserConfig, ConfigError> {
        let settings = &self.parser;
        let config = ParserConfig::builder()
            .operators(settings.operators.iter().cloned())
            .open_parenthesis(settings.open_parenthesis)
            .close_parenthesis(settings.close_parenthesis)
            .field_delimiter(settings.field_delimiter)
            .field_open_parenthesis(settings.field_open_parenthesis)
            .field_close_parenthesis(settings.field_close_parenthesis)
            .field_open_modifier(settings.field_open_modifier)
            .field_close_modifier(settings.field_close_modifier)
            .build()?;
        Ok(config)
    }

    /// Builds a parser for these settings.
    pub fn parser(&self) -> Result<Parser, ConfigError> {
        self.parser_config().map(Parser::new)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_parser(&self.parser)
    }

    /// Serializes the effective settings in `.textquery.toml` format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            parser: self.parser.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Parser syntax settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Operator keywords.
    pub operators: Vec<String>,
    /// Group-open marker.
    pub open_parenthesis: char,
    /// Group-close marker.
    pub close_parenthesis: char,
    /// Field name / value separator.
    pub field_delimiter: char,
    /// Field-operator open bracket.
    pub field_open_parenthesis: char,
    /// Field-operator close bracket.
    pub field_close_parenthesis: char,
    /// Field-modifier open bracket.
    pub field_open_modifier: char,
    /// Field-modifier close bracket.
    pub field_close_modifier: char,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self::from(&ParserConfig::default())
    }
}

impl From<&ParserConfig> for ParserSettings {
    fn from(config: &ParserConfig) -> Self {
        Self {
            operators: config.operators().to_vec(),
            open_parenthesis: config.open_parenthesis(),
            close_parenthesis: config.close_parenthesis(),
            field_delimiter: config.field_delimiter(),
            field_open_parenthesis: config.field_open_parenthesis(),
            field_close_parenthesis: config.field_close_parenthesis(),
            field_open_modifier: config.field_open_modifier(),
            field_close_modifier: config.field_close_modifier(),
        }
    }
}

/// Wrapper for serializing settings in file layout.
#[derive(Serialize)]
struct SerializableSettings {
    /// Parser syntax settings.
    parser: ParserSettings,
}
