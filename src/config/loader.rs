//! Configuration file loading with precedence handling.

use crate::layout::LayoutParameters;
use crate::source::{HeightSource, InvalidHeightSource};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WATERFALL_CONFIG";
/// Environment variable overriding the column count.
pub const COLUMNS_ENV: &str = "WATERFALL_COLUMNS";
/// Environment variable overriding the content width.
pub const WIDTH_ENV: &str = "WATERFALL_WIDTH";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// The configured height source cannot produce heights.
    #[error("Invalid height source: {0}")]
    HeightSource(#[from] InvalidHeightSource),

    /// An override environment variable holds a value that does not parse.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnvValue {
        /// Variable name.
        var: String,
        /// Raw value as set.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/waterfall/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of columns.
    #[serde(default)]
    pub columns: Option<usize>,

    /// Inset applied to every side of each item frame.
    #[serde(default)]
    pub cell_padding: Option<f64>,

    /// Total content width shared by the columns.
    #[serde(default)]
    pub content_width: Option<f64>,

    /// Number of items to lay out.
    #[serde(default)]
    pub item_count: Option<usize>,

    /// Where item heights come from.
    #[serde(default)]
    pub heights: Option<HeightSource>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Number of columns.
    pub columns: usize,
    /// Cell padding.
    pub cell_padding: f64,
    /// Content width.
    pub content_width: f64,
    /// Number of items.
    pub item_count: usize,
    /// Height source.
    pub heights: HeightSource,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            cell_padding: 4.0,
            content_width: 320.0,
            item_count: 24,
            heights: HeightSource::default(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Layout parameters described by this config.
    pub fn layout_parameters(&self) -> LayoutParameters {
        LayoutParameters::new(self.columns, self.cell_padding, self.content_width)
    }

    /// Check the parts of the config that the layout engine does not.
    ///
    /// Column count, width and padding are validated by the engine itself
    /// when a layout pass starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heights.validate()?;
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/waterfall/waterfall.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("waterfall").join("waterfall.log")
    } else {
        PathBuf::from("waterfall.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/waterfall/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if no config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("waterfall").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `WATERFALL_CONFIG` environment variable
/// 3. Default path `~/.config/waterfall/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `WATERFALL_COLUMNS`: Override column count
/// - `WATERFALL_WIDTH`: Override content width
///
/// # Errors
/// `InvalidEnvValue` if a set variable does not parse. This runs before
/// logging is up, so a bad override fails the run instead of being skipped.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(columns) = env_override(COLUMNS_ENV)? {
        config.columns = columns;
    }

    if let Some(width) = env_override(WIDTH_ENV)? {
        config.content_width = width;
    }

    Ok(config)
}

/// Parse `var` if it is set.
fn env_override<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };

    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            value: raw.clone(),
        })
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        columns: config.columns.unwrap_or(defaults.columns),
        cell_padding: config.cell_padding.unwrap_or(defaults.cell_padding),
        content_width: config.content_width.unwrap_or(defaults.content_width),
        item_count: config.item_count.unwrap_or(defaults.item_count),
        heights: config.heights.unwrap_or(defaults.heights),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Overrides taken from command-line flags. `None` leaves the value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--columns`
    pub columns: Option<usize>,
    /// `--padding`
    pub cell_padding: Option<f64>,
    /// `--width`
    pub content_width: Option<f64>,
    /// `--items`
    pub item_count: Option<usize>,
    /// `--heights`
    pub heights: Option<HeightSource>,
    /// `--log-file`
    pub log_file_path: Option<PathBuf>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(columns) = overrides.columns {
        config.columns = columns;
    }
    if let Some(padding) = overrides.cell_padding {
        config.cell_padding = padding;
    }
    if let Some(width) = overrides.content_width {
        config.content_width = width;
    }
    if let Some(count) = overrides.item_count {
        config.item_count = count;
    }
    if let Some(heights) = overrides.heights {
        config.heights = heights;
    }
    if let Some(path) = overrides.log_file_path {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
