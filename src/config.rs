//! Configuration file support for jar-hell.
//!
//! Provides YAML-based configuration through `jar-hell.config.yml` files,
//! including data structures, file loading, validation and merging with
//! command-line flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::filesystem::JsonFileRecentlyViewedStore;
use crate::adapters::outbound::network::DEFAULT_TIMEOUT_SECS;
use crate::application::dto::OutputFormat;
use crate::application::use_cases::DEFAULT_MAX_CONCURRENT_FETCHES;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "jar-hell.config.yml";

/// Backend used when neither the command line nor a config file names one
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8060";

/// State file used when the platform has no data directory
const FALLBACK_STATE_FILE: &str = ".jar-hell-state.json";

/// Tree levels shown by `show` and `tree` by default
pub const DEFAULT_TREE_DEPTH: usize = 1;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub server_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub format: Option<String>,
    pub tree_depth: Option<usize>,
    pub max_concurrent_requests: Option<usize>,
    pub state_file: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(url) = &config.server_url {
        if url.trim().is_empty() {
            bail!(
                "Invalid config: server_url must not be empty.\n\n\
                 💡 Hint: Use the base URL of a jar hell server, e.g. \"{}\".",
                DEFAULT_SERVER_URL
            );
        }
    }
    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: Remove the field to use the default of {} seconds.",
            DEFAULT_TIMEOUT_SECS
        );
    }
    if config.max_concurrent_requests == Some(0) {
        bail!(
            "Invalid config: max_concurrent_requests must be greater than 0.\n\n\
             💡 Hint: Remove the field to use the default of {}.",
            DEFAULT_MAX_CONCURRENT_FETCHES
        );
    }
    if let Some(format) = &config.format {
        format.parse::<OutputFormat>().map_err(|e| {
            anyhow::anyhow!(
                "Invalid config: {}\n\n💡 Hint: Use 'text' or 'json'.",
                e
            )
        })?;
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub format: Option<OutputFormat>,
    pub tree_depth: Option<usize>,
    pub state_file: Option<PathBuf>,
}

/// Effective settings: command line, then config file, then built-in defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub timeout: Duration,
    pub format: OutputFormat,
    pub tree_depth: usize,
    pub max_concurrent_requests: usize,
    pub state_file: PathBuf,
}

impl Settings {
    pub fn resolve(overrides: Overrides, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();
        let format = match (overrides.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(format)) => format.parse().map_err(anyhow::Error::msg)?,
            (None, None) => OutputFormat::default(),
        };

        Ok(Self {
            server_url: overrides
                .server_url
                .or(config.server_url)
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            format,
            tree_depth: overrides
                .tree_depth
                .or(config.tree_depth)
                .unwrap_or(DEFAULT_TREE_DEPTH),
            max_concurrent_requests: config
                .max_concurrent_requests
                .unwrap_or(DEFAULT_MAX_CONCURRENT_FETCHES),
            state_file: overrides
                .state_file
                .or(config.state_file)
                .or_else(JsonFileRecentlyViewedStore::default_path)
                .unwrap_or_else(|| PathBuf::from(FALLBACK_STATE_FILE)),
        })
    }
}
