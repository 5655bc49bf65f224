//! Configuration file support for checkgen.
//!
//! This module provides functionality to load configuration from TOML files
//! and merge them with command-line arguments. CLI arguments take precedence
//! over config file values.
//!
//! It also defines [`ExportSettings`], the read-only lookup the exporter
//! consumes: the tab width and the two filter fragments that get spliced
//! into the generated document.

use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names to search for.
const DEFAULT_CONFIG_FILES: &[&str] = &["Checkgen.toml", ".checkgen.toml", "checkgen.toml"];

/// Main configuration structure representing a checkgen configuration file.
///
/// Configuration files use a merge strategy where:
/// 1. CLI arguments (highest priority)
/// 2. Config file values
/// 3. Default values (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CheckgenConfig {
    /// General settings that apply to the whole invocation.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Settings spliced into the generated document.
    #[serde(default)]
    pub export: ExportSection,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Output file path for the generated document.
    /// When specified, writes output to the file instead of stdout.
    pub output_file: Option<PathBuf>,

    /// Enable verbose output.
    #[serde(default)]
    pub verbose: bool,
}

/// The `[export]` section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ExportSection {
    /// Value for the `tabWidth` property on the root module.
    pub tab_width: Option<String>,

    /// XML filter fragment spliced verbatim under the root module.
    pub checker_filters: Option<String>,

    /// XML filter fragment spliced verbatim into the tree-walker module.
    pub tree_walker_filters: Option<String>,
}

/// Read-only settings lookup consumed by the exporter.
///
/// All entries are optional strings; an absent or blank entry means the
/// corresponding piece of the document is simply not emitted. The filter
/// fragments are trusted, already well-formed XML authored by the platform
/// and are spliced in verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSettings {
    tab_width: Option<String>,
    checker_filters: Option<String>,
    tree_walker_filters: Option<String>,
}

impl ExportSettings {
    /// Returns the configured tab width, if any.
    #[must_use]
    pub fn tab_width(&self) -> Option<&str> {
        self.tab_width.as_deref()
    }

    /// Returns the checker-level filter fragment, if any.
    #[must_use]
    pub fn checker_filters(&self) -> Option<&str> {
        self.checker_filters.as_deref()
    }

    /// Returns the tree-walker filter fragment, if any.
    #[must_use]
    pub fn tree_walker_filters(&self) -> Option<&str> {
        self.tree_walker_filters.as_deref()
    }

    /// Sets the tab width.
    #[must_use]
    pub fn with_tab_width(mut self, value: impl Into<String>) -> Self {
        self.tab_width = Some(value.into());
        self
    }

    /// Sets the checker-level filter fragment.
    #[must_use]
    pub fn with_checker_filters(mut self, value: impl Into<String>) -> Self {
        self.checker_filters = Some(value.into());
        self
    }

    /// Sets the tree-walker filter fragment.
    #[must_use]
    pub fn with_tree_walker_filters(mut self, value: impl Into<String>) -> Self {
        self.tree_walker_filters = Some(value.into());
        self
    }
}

/// Load configuration from a specific file path.
///
/// # Returns
///
/// Returns a `CheckgenConfig` if the file exists and can be parsed.
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns an error if the file exists but cannot be parsed.
pub fn load_config_from_path(path: &Path) -> Result<Option<CheckgenConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;

    let config: CheckgenConfig = toml::from_str(&content).map_err(|e| {
        ExportError::config_error_with_path(
            format!("Failed to parse TOML: {}", e),
            path.to_path_buf(),
        )
    })?;

    Ok(Some(config))
}

/// Discover and load configuration from default locations.
///
/// Searches for configuration files in the current directory and parent
/// directories, using the default config file names: `Checkgen.toml`,
/// `.checkgen.toml`, `checkgen.toml`.
pub fn discover_and_load_config() -> Result<Option<(PathBuf, CheckgenConfig)>> {
    discover_from(std::env::current_dir()?)
}

fn discover_from(start_dir: PathBuf) -> Result<Option<(PathBuf, CheckgenConfig)>> {
    let mut current_dir = start_dir;

    // Search up the directory tree for a config file
    loop {
        for config_name in DEFAULT_CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if let Some(config) = load_config_from_path(&config_path)? {
                return Ok(Some((config_path, config)));
            }
        }

        // Move to parent directory
        if !current_dir.pop() {
            // Reached the root without finding a config file
            break;
        }
    }

    Ok(None)
}

/// Load configuration from a specified path or discover from default
/// locations.
///
/// If `config_path` is `Some`, loads from that specific path.
/// If `config_path` is `None`, searches for default config files.
pub fn load_config(config_path: Option<&Path>) -> Result<Option<(PathBuf, CheckgenConfig)>> {
    if let Some(path) = config_path {
        load_config_from_path(path).map(|opt| opt.map(|config| (path.to_path_buf(), config)))
    } else {
        discover_and_load_config()
    }
}

/// Merge export CLI args with config file values.
///
/// Priority order:
/// 1. CLI arguments (highest priority)
/// 2. Config file values
/// 3. Default values (lowest priority)
pub fn merge_export_args(cli_args: &crate::cli::Cli, config: &CheckgenConfig) -> ExportSettings {
    let mut settings = ExportSettings {
        tab_width: config.export.tab_width.clone(),
        checker_filters: config.export.checker_filters.clone(),
        tree_walker_filters: config.export.tree_walker_filters.clone(),
    };

    // Merge tab width: the only setting with a CLI counterpart
    if cli_args.tab_width.is_some() {
        settings.tab_width = cli_args.tab_width.clone();
    }

    settings
}
