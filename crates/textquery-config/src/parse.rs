//! Configuration file parsing.
//!
//! Parses individual `.textquery.toml` files into `RawConfig` structures that keep every
//! field optional until merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Parser syntax section.
    pub parser: Option<RawParserSettings>,
}

/// Raw parser settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawParserSettings {
    /// Operator keywords.
    pub operators: Option<Vec<String>>,
    /// Group-open marker.
    pub open_parenthesis: Option<char>,
    /// Group-close marker.
    pub close_parenthesis: Option<char>,
    /// Field name / value separator.
    pub field_delimiter: Option<char>,
    /// Field-operator open bracket.
    pub field_open_parenthesis: Option<char>,
    /// Field-operator close bracket.
    pub field_close_parenthesis: Option<char>,
    /// Field-modifier open bracket.
    pub field_open_modifier: Option<char>,
    /// Field-modifier close bracket.
    pub field_close_modifier: Option<char>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
