//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::PathBuf;

use crate::{
    Config, ParserSettings,
    parse::{RawConfig, RawParserSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to the
/// working directory), lowest precedence last (global config). Every setting takes the value
/// from the first file that defines it; the operator list is replaced as a whole, never
/// concatenated.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut parser = ParserSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.parser {
            apply_raw_parser(&mut parser, raw);
        }
    }

    Config {
        parser,
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(|dir| dir.to_path_buf()),
        files: configs.iter().map(|c| c.path.clone()).collect(),
    }
}

/// Applies raw parser settings to result, overwriting any present values.
fn apply_raw_parser(result: &mut ParserSettings, raw: &RawParserSettings) {
    if let Some(ref v) = raw.operators {
        result.operators = v.clone();
    }
    if let Some(v) = raw.open_parenthesis {
        result.open_parenthesis = v;
    }
    if let Some(v) = raw.close_parenthesis {
        result.close_parenthesis = v;
    }
    if let Some(v) = raw.field_delimiter {
        result.field_delimiter = v;
    }
    if let Some(v) = raw.field_open_parenthesis {
        result.field_open_parenthesis = v;
    }
    if let Some(v) = raw.field_close_parenthesis {
        result.field_close_parenthesis = v;
    }
    if let Some(v) = raw.field_open_modifier {
        result.field_open_modifier = v;
    }
    if let Some(v) = raw.field_close_modifier {
        result.field_close_modifier = v;
    }
}
