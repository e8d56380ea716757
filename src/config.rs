//! Configuration management for HashLedger

use crate::error::ChainError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConsoleConfig {
    #[serde(default = "default_banner")]
    pub banner: bool,
    #[serde(default)]
    pub payload_trim: PayloadTrim,
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            banner: default_banner(),
            payload_trim: PayloadTrim::default(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

/// How a payload line read from the console is cleaned up before appending.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadTrim {
    /// Strip the trailing `\n` or `\r\n` only.
    #[default]
    LineEnding,
    /// Strip leading and trailing ASCII whitespace.
    Whitespace,
    /// Keep the line exactly as read, terminator included.
    Keep,
}

impl PayloadTrim {
    pub fn apply<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        match self {
            PayloadTrim::LineEnding => {
                let line = line.strip_suffix(b"\n").unwrap_or(line);
                line.strip_suffix(b"\r").unwrap_or(line)
            }
            PayloadTrim::Whitespace => line.trim_ascii(),
            PayloadTrim::Keep => line,
        }
    }
}

fn default_banner() -> bool {
    true
}

fn default_max_payload_bytes() -> usize {
    1024
}

/// Loads configuration from `path`, or returns defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<Config, ChainError> {
    let config = match path {
        Some(path) => {
            let config_str = fs::read_to_string(path).map_err(|e| {
                ChainError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
            })?;
            toml::from_str(&config_str)?
        }
        None => Config::default(),
    };

    // Validate critical values
    if config.console.max_payload_bytes == 0 {
        return Err(ChainError::ConfigError(
            "console.max_payload_bytes must be greater than zero".to_string(),
        ));
    }

    Ok(config)
}
