//! Configuration management for bracedepth.
//!
//! This module provides the [`Config`] struct which controls annotation.
//! Configuration can be loaded from:
//! - TOML files (`bracedepth.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching every directory from the
//! filesystem root down to the working directory, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::annotate::DEFAULT_PREVIEW_WIDTH;

/// Config file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["bracedepth.toml"];

/// Input annotated when no path is given anywhere
pub const DEFAULT_INPUT: &str = "src/ml.rs";

/// Default maximum input size in bytes (100 MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Home directory from `HOME`, or `USERPROFILE` where `HOME` is unset
fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .find_map(std::env::var_os)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

// Serde default functions
fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}
fn default_preview_width() -> usize {
    DEFAULT_PREVIEW_WIDTH
}
fn default_extensions() -> Vec<String> {
    vec!["rs".to_string()]
}
fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

/// Main configuration struct for bracedepth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Input annotated when no path is given on the command line
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Characters of trimmed line content shown per record (default: 40)
    #[serde(default = "default_preview_width")]
    pub preview_width: usize,

    /// File extensions picked up when a directory is given (default: `["rs"]`)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Inputs larger than this many bytes are refused
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub input: Option<PathBuf>,
    pub preview_width: Option<usize>,
    pub extensions: Option<Vec<String>>,
    pub max_file_size: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: default_input(),
            preview_width: DEFAULT_PREVIEW_WIDTH,
            extensions: default_extensions(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl Config {
    /// Maximum reasonable preview width
    const MAX_PREVIEW_WIDTH: usize = 1000;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.preview_width == 0 {
            return Some("preview_width must be at least 1".to_string());
        }
        if self.preview_width > Self::MAX_PREVIEW_WIDTH {
            return Some(format!(
                "preview_width {} exceeds maximum of {}",
                self.preview_width,
                Self::MAX_PREVIEW_WIDTH
            ));
        }
        if self.max_file_size == 0 {
            return Some("max_file_size must be at least 1".to_string());
        }
        if self.extensions.iter().any(|ext| ext.trim_start_matches('.').is_empty()) {
            return Some("extensions must not contain empty entries".to_string());
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text, filling unset keys with defaults
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let partial: PartialConfig = toml::from_str(contents)?;
        let mut config = Self::default();
        config.apply_partial(partial);
        Ok(config)
    }

    /// Render the configuration as TOML (used for debug output)
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(v) = partial.input {
            self.input = v;
        }
        if let Some(v) = partial.preview_width {
            self.preview_width = v;
        }
        if let Some(v) = partial.extensions {
            self.extensions = v;
        }
        if let Some(v) = partial.max_file_size {
            self.max_file_size = v;
        }
    }

    /// Discover config files for a starting directory
    ///
    /// Returns list of config file paths in order of priority (least specific first):
    /// the home directory config, then each ancestor from the root down to `start_dir`.
    #[must_use]
    pub fn discover_config_files(start_dir: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = home_dir() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let mut ancestors: Vec<&Path> = start_dir.ancestors().collect();
        ancestors.reverse();

        for ancestor in ancestors {
            for config_name in CONFIG_FILE_NAMES {
                let config_path = ancestor.join(config_name);
                if config_path.is_file() && !config_files.contains(&config_path) {
                    config_files.push(config_path);
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Unreadable or malformed files are skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_dir: &Path) -> Self {
        let mut config = Self::default();
        for path in Self::discover_config_files(start_dir) {
            debug!(path = %path.display(), "loading config file");
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(partial),
                    Err(e) => warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
