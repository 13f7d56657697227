//! Tool configuration for the `xcb` CLI
//!
//! A small TOML file (`.xcb.toml` by default) supplies defaults the CLI
//! would otherwise take from flags: the tool to invoke, the working
//! directory, and the destination lookup timeout. A missing file yields
//! the built-in defaults; a malformed one is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".xcb.toml";

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// CLI configuration with built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Program to invoke. Defaults to `xcodebuild`.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Directory invocations run in. Defaults to the current directory.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Seconds to wait for a destination device before giving up; passed
    /// through as `-destination-timeout` when set.
    #[serde(default)]
    pub destination_timeout: Option<f64>,
}

fn default_tool() -> String {
    "xcodebuild".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tool: default_tool(),
            working_dir: None,
            destination_timeout: None,
        }
    }
}

impl Config {
    /// Load from `path`. A missing file is not an error and yields the
    /// defaults.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
